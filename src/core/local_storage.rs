use crate::domain::ports::Storage;
use crate::utils::error::{DashboardError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Filesystem storage; relative paths resolve against `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

fn not_found_or(path: &Path, e: std::io::Error) -> DashboardError {
    if e.kind() == ErrorKind::NotFound {
        DashboardError::FileNotFound {
            path: path.display().to_string(),
        }
    } else {
        DashboardError::IoError(e)
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &Path) -> Result<String> {
        let full_path = self.resolve(path);
        tracing::debug!("Reading {}", full_path.display());
        fs::read_to_string(&full_path).map_err(|e| not_found_or(path, e))
    }

    // Parent directories are not created: a bad path must fail the save.
    fn write_file(&self, path: &Path, data: &str) -> Result<()> {
        let full_path = self.resolve(path);
        tracing::debug!("Writing {} bytes to {}", data.len(), full_path.display());
        fs::write(full_path, data)?;
        Ok(())
    }

    fn delete_file(&self, path: &Path) -> Result<()> {
        let full_path = self.resolve(path);
        tracing::debug!("Deleting {}", full_path.display());
        fs::remove_file(&full_path).map_err(|e| not_found_or(path, e))
    }
}
