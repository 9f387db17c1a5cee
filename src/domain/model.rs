use serde::{Deserialize, Serialize};
use std::fmt;

/// A named continuity domain with its readiness score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    pub name: String,
    pub readiness_score: i32,
    pub description: String,
}

impl DomainRecord {
    pub fn new(name: impl Into<String>, readiness_score: i32, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            readiness_score,
            description: description.into(),
        }
    }

    pub fn update_score(&mut self, new_score: i32) {
        self.readiness_score = new_score;
    }

    pub fn describe(&self) -> String {
        format!(
            "Domain: {} | Readiness: {} | Description: {}",
            self.name, self.readiness_score, self.description
        )
    }
}

/// One bar of the readiness chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub score: i32,
}

/// On-disk layout used by save and load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum FileFormat {
    /// `name,score,description` with no quoting.
    #[default]
    Plain,
    /// Quoted CSV fields.
    Csv,
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Plain => write!(f, "plain"),
            FileFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Why a line of a saved file did not become a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    FieldCount { found: usize },
    InvalidScore { value: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FieldCount { found } => write!(f, "expected 3 fields, found {}", found),
            SkipReason::InvalidScore { value } => write!(f, "score '{}' is not an integer", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub reason: SkipReason,
}

/// Outcome of decoding a saved file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedRecords {
    pub records: Vec<DomainRecord>,
    pub skipped: Vec<SkippedLine>,
}

/// Summary returned by a successful load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedLine>,
}

impl LoadReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Constraints applied by `DomainStore::try_add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPolicy {
    pub min_score: i32,
    pub max_score: i32,
    pub format: FileFormat,
}

impl Default for RecordPolicy {
    fn default() -> Self {
        Self {
            min_score: 0,
            max_score: 100,
            format: FileFormat::Plain,
        }
    }
}
