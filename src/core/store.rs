use crate::core::codec::codec_for;
use crate::core::local_storage::LocalStorage;
use crate::domain::model::{ChartPoint, DomainRecord, FileFormat, LoadReport, RecordPolicy};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_no_delimiter, validate_non_empty_string, validate_range, validate_single_line,
    validate_trimmed,
};
use std::path::Path;

/// Ordered list of domain records owned by one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainStore {
    records: Vec<DomainRecord>,
}

impl DomainStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: DomainRecord) {
        tracing::debug!("Adding domain '{}'", record.name);
        self.records.push(record);
    }

    /// Adds the record only if it satisfies `policy`; the store is unchanged on error.
    pub fn try_add(&mut self, record: DomainRecord, policy: &RecordPolicy) -> Result<()> {
        validate_non_empty_string("name", &record.name)?;
        validate_range(
            "readiness score",
            record.readiness_score,
            policy.min_score,
            policy.max_score,
        )?;
        if policy.format == FileFormat::Plain {
            for (field, value) in [("name", &record.name), ("description", &record.description)] {
                validate_no_delimiter(field, value, ',')?;
                validate_single_line(field, value)?;
                validate_trimmed(field, value)?;
            }
        }
        self.add(record);
        Ok(())
    }

    pub fn list_all(&self) -> Vec<String> {
        self.records.iter().map(DomainRecord::describe).collect()
    }

    /// Updates the earliest record named `name`. Returns whether one was found.
    pub fn update_score_by_name(&mut self, name: &str, new_score: i32) -> bool {
        match self.records.iter_mut().find(|r| r.name == name) {
            Some(record) => {
                tracing::debug!(
                    "Updating '{}' score {} -> {}",
                    name,
                    record.readiness_score,
                    new_score
                );
                record.update_score(new_score);
                true
            }
            None => {
                tracing::debug!("No domain named '{}'", name);
                false
            }
        }
    }

    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.records
            .iter()
            .map(|r| ChartPoint {
                name: r.name.clone(),
                score: r.readiness_score,
            })
            .collect()
    }

    pub fn records(&self) -> &[DomainRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes the store to `path` on the local filesystem in the plain format.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_with(&LocalStorage::default(), path, FileFormat::Plain)
    }

    /// Replaces the store with the plain-format file at `path`.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadReport> {
        self.load_with(&LocalStorage::default(), path, FileFormat::Plain)
    }

    pub fn save_with<S: Storage, P: AsRef<Path>>(
        &self,
        storage: &S,
        path: P,
        format: FileFormat,
    ) -> Result<()> {
        let path = path.as_ref();
        let content = codec_for(format).encode(&self.records)?;
        storage.write_file(path, &content)?;
        tracing::info!(
            "Saved {} domains to {} ({})",
            self.records.len(),
            path.display(),
            format
        );
        Ok(())
    }

    /// Nothing is replaced unless the file was read and decoded.
    pub fn load_with<S: Storage, P: AsRef<Path>>(
        &mut self,
        storage: &S,
        path: P,
        format: FileFormat,
    ) -> Result<LoadReport> {
        let path = path.as_ref();
        let content = storage.read_file(path)?;
        let decoded = codec_for(format).decode(&content)?;

        let report = LoadReport {
            loaded: decoded.records.len(),
            skipped: decoded.skipped,
        };
        self.records = decoded.records;

        tracing::info!(
            "Loaded {} domains from {} ({} lines skipped)",
            report.loaded,
            path.display(),
            report.skipped_count()
        );
        Ok(report)
    }
}
