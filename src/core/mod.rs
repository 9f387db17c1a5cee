pub mod chart;
pub mod codec;
pub mod local_storage;
pub mod store;

pub use crate::domain::model::{DomainRecord, FileFormat, LoadReport};
pub use crate::domain::ports::{RecordCodec, Storage};
pub use crate::utils::error::Result;
