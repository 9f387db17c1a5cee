use crate::core::chart::{MAX_CHART_WIDTH, MIN_CHART_WIDTH};
use crate::domain::model::FileFormat;
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::{validate_path, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_STATE_FILE: &str = "continuity-session.txt";
pub const DEFAULT_CHART_WIDTH: usize = 40;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub store: Option<StoreConfig>,
    pub session: Option<SessionConfig>,
    pub chart: Option<ChartConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    pub format: Option<FileFormat>,
    pub min_score: Option<i32>,
    pub max_score: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    pub state_file: Option<String>,
    pub base_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartConfig {
    pub width: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DashboardError::FileNotFound {
                    path: path.as_ref().display().to_string(),
                }
            } else {
                DashboardError::IoError(e)
            }
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashboardError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashboardError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn format(&self) -> FileFormat {
        self.store
            .as_ref()
            .and_then(|s| s.format)
            .unwrap_or_default()
    }

    pub fn min_score(&self) -> i32 {
        self.store.as_ref().and_then(|s| s.min_score).unwrap_or(0)
    }

    pub fn max_score(&self) -> i32 {
        self.store.as_ref().and_then(|s| s.max_score).unwrap_or(100)
    }

    pub fn state_file(&self) -> Option<&str> {
        self.session.as_ref().and_then(|s| s.state_file.as_deref())
    }

    pub fn base_dir(&self) -> Option<&str> {
        self.session.as_ref().and_then(|s| s.base_dir.as_deref())
    }

    pub fn chart_width(&self) -> usize {
        self.chart
            .as_ref()
            .and_then(|c| c.width)
            .unwrap_or(DEFAULT_CHART_WIDTH)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if self.min_score() > self.max_score() {
            return Err(DashboardError::InvalidConfigValueError {
                field: "store.min_score".to_string(),
                value: self.min_score().to_string(),
                reason: format!("must not exceed store.max_score ({})", self.max_score()),
            });
        }

        if let Some(state_file) = self.state_file() {
            validate_path("session.state_file", state_file)?;
        }

        if let Some(base_dir) = self.base_dir() {
            validate_path("session.base_dir", base_dir)?;
        }

        validate_range("chart.width", self.chart_width(), MIN_CHART_WIDTH, MAX_CHART_WIDTH)?;

        Ok(())
    }
}
