pub mod toml_config;

use crate::core::chart::{MAX_CHART_WIDTH, MIN_CHART_WIDTH};
use crate::domain::model::{FileFormat, RecordPolicy};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, Validate};
use toml_config::{TomlConfig, DEFAULT_STATE_FILE};

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "continuity-dashboard")]
#[command(about = "Track readiness scores for continuity domains")]
pub struct CliConfig {
    /// Session file holding the current domain list
    #[arg(long, global = true)]
    pub state: Option<String>,

    /// Optional TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// File format for the session file, save and load
    #[arg(long, value_enum, global = true)]
    pub format: Option<FileFormat>,

    /// Directory that relative file names resolve against
    #[arg(long, global = true)]
    pub base_dir: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// One user action against the session's store.
#[cfg_attr(feature = "cli", derive(Subcommand))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a new domain
    Add {
        name: String,
        #[cfg_attr(feature = "cli", arg(allow_negative_numbers = true))]
        score: i32,
        #[cfg_attr(feature = "cli", arg(default_value = ""))]
        description: String,
    },
    /// Show every domain in insertion order
    List {
        #[cfg_attr(feature = "cli", arg(long))]
        json: bool,
    },
    /// Change the readiness score of the first domain with this name
    Update {
        name: String,
        #[cfg_attr(feature = "cli", arg(allow_negative_numbers = true))]
        score: i32,
    },
    /// Draw a text bar chart of all scores
    Chart {
        #[cfg_attr(feature = "cli", arg(long))]
        width: Option<usize>,
    },
    /// Write the domain list to a file
    Save { file: String },
    /// Replace the domain list with the contents of a file
    Load { file: String },
    /// Delete a file
    Delete { file: String },
    /// Read commands from stdin, one per line
    Shell,
}

/// Effective settings after merging CLI flags over the TOML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub state_file: String,
    pub base_dir: String,
    pub chart_width: usize,
    pub policy: RecordPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            state_file: DEFAULT_STATE_FILE.to_string(),
            base_dir: ".".to_string(),
            chart_width: toml_config::DEFAULT_CHART_WIDTH,
            policy: RecordPolicy::default(),
        }
    }
}

impl Settings {
    pub fn format(&self) -> FileFormat {
        self.policy.format
    }

    pub fn resolve(
        state: Option<&str>,
        format: Option<FileFormat>,
        base_dir: Option<&str>,
        file_config: &TomlConfig,
    ) -> Self {
        Self {
            state_file: state
                .or(file_config.state_file())
                .unwrap_or(DEFAULT_STATE_FILE)
                .to_string(),
            base_dir: base_dir.or(file_config.base_dir()).unwrap_or(".").to_string(),
            chart_width: file_config.chart_width(),
            policy: RecordPolicy {
                min_score: file_config.min_score(),
                max_score: file_config.max_score(),
                format: format.unwrap_or_else(|| file_config.format()),
            },
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("state", &self.state_file)?;
        validate_path("base_dir", &self.base_dir)?;
        validate_range("chart.width", self.chart_width, MIN_CHART_WIDTH, MAX_CHART_WIDTH)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the TOML file when `--config` is given and merges the flags over it.
    pub fn settings(&self) -> Result<Settings> {
        let file_config = match &self.config {
            Some(path) => {
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                config
            }
            None => TomlConfig::default(),
        };

        let settings = Settings::resolve(
            self.state.as_deref(),
            self.format,
            self.base_dir.as_deref(),
            &file_config,
        );
        settings.validate()?;
        Ok(settings)
    }
}
