use clap::Parser;
use continuity_dashboard::app::session::skipped_lines_notice;
use continuity_dashboard::app::shell::run_shell;
use continuity_dashboard::utils::error::{DashboardError, ErrorSeverity};
use continuity_dashboard::utils::logger;
use continuity_dashboard::{CliConfig, Command, LocalStorage, Session};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config) {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }
}

fn run(config: CliConfig) -> Result<(), DashboardError> {
    let settings = config.settings()?;
    tracing::debug!("Effective settings: {:?}", settings);

    let storage = LocalStorage::new(settings.base_dir.clone());
    let (mut session, restored) = Session::open(storage, settings)?;

    // session 檔案中無法解析的行會在下次寫回時遺失
    let (notice, details) = skipped_lines_notice(&restored);
    if let Some(notice) = notice {
        eprintln!("{} (in the session file; they will be dropped when it is rewritten)", notice);
        for line in &details {
            eprintln!("  {}", line);
        }
    }

    if config.command == Command::Shell {
        let stdin = std::io::stdin();
        return run_shell(&mut session, stdin.lock(), std::io::stdout());
    }

    let outcome = session.execute(config.command)?;
    for line in &outcome.output {
        println!("{}", line);
    }
    for notice in &outcome.notices {
        println!("{}", notice);
    }

    // 只有資料變更時才寫回 session 檔案
    if outcome.changed {
        session.persist()?;
    }

    Ok(())
}

fn exit_code(e: &DashboardError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
