pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::session::{Notice, Outcome, Session};
pub use config::{Command, Settings};
pub use core::local_storage::LocalStorage;
pub use core::store::DomainStore;
pub use domain::model::{DomainRecord, FileFormat, LoadReport, RecordPolicy};
pub use utils::error::{DashboardError, Result};
