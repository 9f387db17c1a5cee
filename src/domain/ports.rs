use crate::domain::model::{DecodedRecords, DomainRecord};
use crate::utils::error::Result;
use std::path::Path;

/// File access used by save, load and delete.
pub trait Storage {
    /// Reads the whole file. A missing file is `DashboardError::FileNotFound`.
    fn read_file(&self, path: &Path) -> Result<String>;
    /// Creates or truncates the file.
    fn write_file(&self, path: &Path, data: &str) -> Result<()>;
    /// Removes the file. A missing file is `DashboardError::FileNotFound`.
    fn delete_file(&self, path: &Path) -> Result<()>;
}

/// Converts records to and from the text of a saved file.
pub trait RecordCodec {
    fn encode(&self, records: &[DomainRecord]) -> Result<String>;
    fn decode(&self, content: &str) -> Result<DecodedRecords>;
}
