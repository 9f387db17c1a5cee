use crate::config::{Command, Settings};
use crate::core::chart::{render_bar_chart, MAX_CHART_WIDTH, MIN_CHART_WIDTH};
use crate::core::store::DomainStore;
use crate::domain::model::{DomainRecord, LoadReport};
use crate::domain::ports::Storage;
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::validate_range;
use std::fmt;
use std::path::Path;

/// Status line shown to the user after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Warning(String),
    Error(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success(msg) => write!(f, "✅ {}", msg),
            Notice::Info(msg) => write!(f, "ℹ️  {}", msg),
            Notice::Warning(msg) => write!(f, "⚠️  {}", msg),
            Notice::Error(msg) => write!(f, "❌ {}", msg),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Data lines (listing, chart rows, JSON).
    pub output: Vec<String>,
    pub notices: Vec<Notice>,
    /// Whether the store differs from before the command.
    pub changed: bool,
}

impl Outcome {
    fn notice(notice: Notice) -> Self {
        Self {
            notices: vec![notice],
            ..Self::default()
        }
    }

    fn with_change(notice: Notice) -> Self {
        Self {
            notices: vec![notice],
            changed: true,
            ..Self::default()
        }
    }
}

/// Warning plus one detail line per skipped line, or nothing for a clean load.
pub fn skipped_lines_notice(report: &LoadReport) -> (Option<Notice>, Vec<String>) {
    if report.skipped.is_empty() {
        return (None, Vec::new());
    }
    let notice = Notice::Warning(format!(
        "Skipped {} malformed lines.",
        report.skipped_count()
    ));
    let details = report
        .skipped
        .iter()
        .map(|skipped| format!("line {}: {}", skipped.line_number, skipped.reason))
        .collect();
    (Some(notice), details)
}

/// A store plus the storage and settings it is persisted with.
pub struct Session<S: Storage> {
    store: DomainStore,
    storage: S,
    settings: Settings,
}

impl<S: Storage> Session<S> {
    pub fn new(storage: S, settings: Settings) -> Self {
        Self {
            store: DomainStore::new(),
            storage,
            settings,
        }
    }

    /// Restores the store from the session file. A missing file starts empty.
    /// The report lists state-file lines that were dropped; the caller should
    /// surface them before the next `persist` rewrites the file.
    pub fn open(storage: S, settings: Settings) -> Result<(Self, LoadReport)> {
        let mut session = Self::new(storage, settings);
        let report = match session.store.load_with(
            &session.storage,
            &session.settings.state_file,
            session.settings.format(),
        ) {
            Ok(report) => {
                tracing::debug!("Session restored with {} domains", report.loaded);
                report
            }
            Err(DashboardError::FileNotFound { path }) => {
                tracing::debug!("No session file at {}, starting empty", path);
                LoadReport::default()
            }
            Err(e) => return Err(e),
        };
        Ok((session, report))
    }

    pub fn persist(&self) -> Result<()> {
        self.store.save_with(
            &self.storage,
            &self.settings.state_file,
            self.settings.format(),
        )
    }

    pub fn store(&self) -> &DomainStore {
        &self.store
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Add {
                name,
                score,
                description,
            } => {
                let record = DomainRecord::new(name, score, description);
                self.store.try_add(record, &self.settings.policy)?;
                Ok(Outcome::with_change(Notice::Success("Domain added.".to_string())))
            }
            Command::List { json } => self.list(json),
            Command::Update { name, score } => {
                let policy = &self.settings.policy;
                validate_range("readiness score", score, policy.min_score, policy.max_score)?;
                if self.store.update_score_by_name(&name, score) {
                    Ok(Outcome::with_change(Notice::Success(
                        "Readiness score updated.".to_string(),
                    )))
                } else {
                    Ok(Outcome::notice(Notice::Error(format!(
                        "Domain '{}' not found.",
                        name
                    ))))
                }
            }
            Command::Chart { width } => {
                let width = width.unwrap_or(self.settings.chart_width);
                validate_range("chart width", width, MIN_CHART_WIDTH, MAX_CHART_WIDTH)?;
                match render_bar_chart(&self.store.chart_points(), width) {
                    Some(output) => Ok(Outcome {
                        output,
                        ..Outcome::default()
                    }),
                    None => Ok(Outcome::notice(Notice::Warning(
                        "No data to chart.".to_string(),
                    ))),
                }
            }
            Command::Save { file } => {
                if file.trim().is_empty() {
                    return Ok(Self::missing_file_name());
                }
                self.store
                    .save_with(&self.storage, &file, self.settings.format())?;
                Ok(Outcome::notice(Notice::Success(format!(
                    "Data saved to '{}'.",
                    file
                ))))
            }
            Command::Load { file } => {
                if file.trim().is_empty() {
                    return Ok(Self::missing_file_name());
                }
                self.load(&file)
            }
            Command::Delete { file } => {
                if file.trim().is_empty() {
                    return Ok(Self::missing_file_name());
                }
                match self.storage.delete_file(Path::new(&file)) {
                    Ok(()) => Ok(Outcome::notice(Notice::Success(format!(
                        "File '{}' deleted.",
                        file
                    )))),
                    Err(DashboardError::FileNotFound { path }) => Ok(Outcome::notice(
                        Notice::Error(format!("File '{}' not found.", path)),
                    )),
                    Err(e) => Err(e),
                }
            }
            Command::Shell => Ok(Outcome::notice(Notice::Warning(
                "Already in a shell.".to_string(),
            ))),
        }
    }

    fn list(&self, json: bool) -> Result<Outcome> {
        if json {
            let body = serde_json::to_string_pretty(self.store.records())?;
            return Ok(Outcome {
                output: vec![body],
                ..Outcome::default()
            });
        }

        let output = self.store.list_all();
        if output.is_empty() {
            return Ok(Outcome::notice(Notice::Info(
                "No domains yet.".to_string(),
            )));
        }
        Ok(Outcome {
            output,
            ..Outcome::default()
        })
    }

    fn load(&mut self, file: &str) -> Result<Outcome> {
        let report = match self
            .store
            .load_with(&self.storage, file, self.settings.format())
        {
            Ok(report) => report,
            Err(DashboardError::FileNotFound { path }) => {
                return Ok(Outcome::notice(Notice::Error(format!(
                    "File '{}' not found.",
                    path
                ))));
            }
            Err(e) => return Err(e),
        };

        let mut outcome = Outcome::with_change(Notice::Success(format!(
            "Loaded {} domains from '{}'.",
            report.loaded, file
        )));
        let (notice, details) = skipped_lines_notice(&report);
        outcome.notices.extend(notice);
        outcome.output.extend(details);
        Ok(outcome)
    }

    fn missing_file_name() -> Outcome {
        Outcome::notice(Notice::Warning("Please enter a file name.".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::local_storage::LocalStorage;
    use crate::domain::model::FileFormat;
    use tempfile::TempDir;

    fn session_in(dir: &TempDir) -> Session<LocalStorage> {
        Session::new(LocalStorage::new(dir.path()), Settings::default())
    }

    fn add(name: &str, score: i32, description: &str) -> Command {
        Command::Add {
            name: name.to_string(),
            score,
            description: description.to_string(),
        }
    }

    #[test]
    fn test_list_empty_session_reports_info() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        let outcome = session.execute(Command::List { json: false }).unwrap();
        assert!(outcome.output.is_empty());
        assert!(matches!(outcome.notices[0], Notice::Info(_)));
    }

    #[test]
    fn test_add_rejects_out_of_range_score() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        let result = session.execute(add("Payroll", 150, ""));
        assert!(matches!(result, Err(DashboardError::ValidationError { .. })));
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_update_unknown_name_reports_error_without_change() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.execute(add("Payroll", 80, "monthly runs")).unwrap();
        let outcome = session
            .execute(Command::Update {
                name: "Backup".to_string(),
                score: 10,
            })
            .unwrap();
        assert!(!outcome.changed);
        assert!(matches!(outcome.notices[0], Notice::Error(_)));
        assert_eq!(session.store().records()[0].readiness_score, 80);
    }

    #[test]
    fn test_chart_on_empty_store_warns() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        let outcome = session.execute(Command::Chart { width: None }).unwrap();
        assert!(outcome.output.is_empty());
        assert_eq!(
            outcome.notices,
            vec![Notice::Warning("No data to chart.".to_string())]
        );
    }

    #[test]
    fn test_blank_file_name_warns() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        for command in [
            Command::Save { file: " ".to_string() },
            Command::Load { file: String::new() },
            Command::Delete { file: String::new() },
        ] {
            let outcome = session.execute(command).unwrap();
            assert_eq!(
                outcome.notices,
                vec![Notice::Warning("Please enter a file name.".to_string())]
            );
        }
    }

    #[test]
    fn test_load_missing_file_keeps_store() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.execute(add("Payroll", 80, "monthly runs")).unwrap();
        let outcome = session
            .execute(Command::Load {
                file: "missing.txt".to_string(),
            })
            .unwrap();
        assert!(!outcome.changed);
        assert!(matches!(outcome.notices[0], Notice::Error(_)));
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn test_load_reports_skipped_lines() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("mixed.txt"), "A,1,a\nB,x,b\nC,3\n").unwrap();
        let mut session = session_in(&dir);
        let outcome = session
            .execute(Command::Load {
                file: "mixed.txt".to_string(),
            })
            .unwrap();
        assert!(outcome.changed);
        assert_eq!(session.store().len(), 1);
        assert_eq!(outcome.output.len(), 2);
        assert!(matches!(outcome.notices[1], Notice::Warning(_)));
    }

    #[test]
    fn test_open_persist_round_trip_with_csv() {
        let dir = TempDir::new().unwrap();
        let settings = Settings {
            policy: crate::domain::model::RecordPolicy {
                format: FileFormat::Csv,
                ..Default::default()
            },
            ..Settings::default()
        };

        let mut session = Session::new(LocalStorage::new(dir.path()), settings.clone());
        session.execute(add("Backup", 40, "nightly, offsite")).unwrap();
        session.persist().unwrap();

        let (reopened, report) = Session::open(LocalStorage::new(dir.path()), settings).unwrap();
        assert_eq!(reopened.store(), session.store());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_open_reports_dropped_state_lines() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("continuity-session.txt"),
            "Payroll,80,monthly runs\nBackup,high,nightly\n",
        )
        .unwrap();

        let (session, report) =
            Session::open(LocalStorage::new(dir.path()), Settings::default()).unwrap();
        assert_eq!(session.store().len(), 1);
        assert_eq!(report.skipped_count(), 1);

        let (notice, details) = skipped_lines_notice(&report);
        assert!(matches!(notice, Some(Notice::Warning(_))));
        assert_eq!(details, vec!["line 2: score 'high' is not an integer".to_string()]);
    }

    #[test]
    fn test_open_without_state_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let (session, report) =
            Session::open(LocalStorage::new(dir.path()), Settings::default()).unwrap();
        assert!(session.store().is_empty());
        assert_eq!(report, LoadReport::default());
        assert_eq!(skipped_lines_notice(&report), (None, Vec::new()));
    }

    #[test]
    fn test_chart_width_out_of_range_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.execute(add("Payroll", 80, "monthly runs")).unwrap();

        for width in [0, 501, usize::MAX] {
            let result = session.execute(Command::Chart { width: Some(width) });
            assert!(matches!(result, Err(DashboardError::ValidationError { .. })));
        }
        let ok = session.execute(Command::Chart { width: Some(500) }).unwrap();
        assert_eq!(ok.output.len(), 1);
    }

    #[test]
    fn test_delete_existing_and_missing() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("old.txt"), "x").unwrap();
        let mut session = session_in(&dir);

        let deleted = session
            .execute(Command::Delete {
                file: "old.txt".to_string(),
            })
            .unwrap();
        assert!(matches!(deleted.notices[0], Notice::Success(_)));

        let missing = session
            .execute(Command::Delete {
                file: "old.txt".to_string(),
            })
            .unwrap();
        assert!(matches!(missing.notices[0], Notice::Error(_)));
    }
}
