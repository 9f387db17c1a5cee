use continuity_dashboard::{
    Command, DashboardError, DomainRecord, DomainStore, FileFormat, LocalStorage, Notice,
    RecordPolicy, Session, Settings,
};
use tempfile::TempDir;

fn triples(store: &DomainStore) -> Vec<(String, i32, String)> {
    store
        .records()
        .iter()
        .map(|r| (r.name.clone(), r.readiness_score, r.description.clone()))
        .collect()
}

#[test]
fn test_payroll_backup_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let state_path = temp_dir.path().join("state.txt");

    let mut store = DomainStore::new();
    store.add(DomainRecord::new("Payroll", 80, "monthly runs"));
    store.add(DomainRecord::new("Backup", 40, "nightly"));

    let lines = store.list_all();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Domain: Payroll"));
    assert!(lines[1].starts_with("Domain: Backup"));

    assert!(store.update_score_by_name("Backup", 95));
    let lines = store.list_all();
    assert_eq!(lines[0], "Domain: Payroll | Readiness: 80 | Description: monthly runs");
    assert_eq!(lines[1], "Domain: Backup | Readiness: 95 | Description: nightly");

    store.save(&state_path).unwrap();

    let mut fresh = DomainStore::new();
    let report = fresh.load(&state_path).unwrap();
    assert_eq!(report.loaded, 2);
    assert!(report.skipped.is_empty());
    assert_eq!(fresh, store);
}

#[test]
fn test_list_length_tracks_adds_and_resets_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("three.txt");
    std::fs::write(&path, "A,1,a\nB,2,b\nbroken line\nC,3,c\n").unwrap();

    let mut store = DomainStore::new();
    for i in 0..5 {
        store.add(DomainRecord::new(format!("D{}", i), i, ""));
        assert_eq!(store.list_all().len(), (i + 1) as usize);
    }

    store.load(&path).unwrap();
    assert_eq!(store.list_all().len(), 3);

    store.add(DomainRecord::new("D", 4, "d"));
    assert_eq!(store.list_all().len(), 4);
}

#[test]
fn test_duplicate_names_update_earliest() {
    let mut store = DomainStore::new();
    store.add(DomainRecord::new("Dup", 1, "first"));
    store.add(DomainRecord::new("Dup", 2, "second"));

    assert!(store.update_score_by_name("Dup", 50));
    assert_eq!(store.records()[0].readiness_score, 50);
    assert_eq!(store.records()[1].readiness_score, 2);
}

#[test]
fn test_update_absent_name_reports_not_found() {
    let mut store = DomainStore::new();
    store.add(DomainRecord::new("Payroll", 80, "monthly runs"));
    let before = triples(&store);

    assert!(!store.update_score_by_name("Missing", 10));
    assert_eq!(triples(&store), before);
}

#[test]
fn test_plain_round_trip_without_commas() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state.txt");

    let mut store = DomainStore::new();
    store.add(DomainRecord::new("Network", 70, "dual uplinks"));
    store.add(DomainRecord::new("Network", 30, "legacy site"));
    store.add(DomainRecord::new("Facilities", 0, ""));
    store.save(&path).unwrap();

    let mut reloaded = DomainStore::new();
    reloaded.load(&path).unwrap();
    assert_eq!(triples(&reloaded), triples(&store));
}

#[test]
fn test_plain_round_trip_drops_description_with_comma() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state.txt");

    let mut store = DomainStore::new();
    store.add(DomainRecord::new("A", 5, "x,y"));
    store.save(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "A,5,x,y\n");

    let mut reloaded = DomainStore::new();
    let report = reloaded.load(&path).unwrap();
    assert!(reloaded.is_empty());
    assert_eq!(report.loaded, 0);
    assert_eq!(report.skipped_count(), 1);
}

#[test]
fn test_load_missing_file_leaves_store_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = DomainStore::new();
    store.add(DomainRecord::new("Payroll", 80, "monthly runs"));

    let result = store.load(temp_dir.path().join("absent.txt"));
    assert!(matches!(result, Err(DashboardError::FileNotFound { .. })));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_load_skips_bad_score_and_keeps_valid_lines() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mixed.txt");
    std::fs::write(&path, "A,ten,a\nB,20,b\n").unwrap();

    let mut store = DomainStore::new();
    let report = store.load(&path).unwrap();
    assert_eq!(triples(&store), vec![("B".to_string(), 20, "b".to_string())]);
    assert_eq!(report.skipped[0].line_number, 1);
}

#[test]
fn test_save_to_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let store = DomainStore::new();
    let result = store.save(temp_dir.path().join("no-such-dir").join("state.txt"));
    assert!(matches!(result, Err(DashboardError::IoError(_))));
}

#[test]
fn test_csv_format_round_trips_any_description() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path());

    let mut store = DomainStore::new();
    let policy = RecordPolicy {
        format: FileFormat::Csv,
        ..RecordPolicy::default()
    };
    store
        .try_add(DomainRecord::new("Comms", 60, "email, phone \"tree\""), &policy)
        .unwrap();
    store.save_with(&storage, "state.csv", FileFormat::Csv).unwrap();

    let mut reloaded = DomainStore::new();
    reloaded
        .load_with(&storage, "state.csv", FileFormat::Csv)
        .unwrap();
    assert_eq!(reloaded, store);
}

#[test]
fn test_session_commands_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let settings = Settings::default();

    let (mut session, _) =
        Session::open(LocalStorage::new(temp_dir.path()), settings.clone()).unwrap();
    assert!(session.store().is_empty());

    for (name, score, description) in [("Payroll", 80, "monthly runs"), ("Backup", 40, "nightly")] {
        let outcome = session
            .execute(Command::Add {
                name: name.to_string(),
                score,
                description: description.to_string(),
            })
            .unwrap();
        assert!(outcome.changed);
    }
    session.persist().unwrap();

    let (mut reopened, restored) =
        Session::open(LocalStorage::new(temp_dir.path()), settings).unwrap();
    assert!(restored.skipped.is_empty());
    assert_eq!(reopened.store().len(), 2);

    let chart = reopened.execute(Command::Chart { width: Some(8) }).unwrap();
    assert_eq!(chart.output.len(), 2);
    assert!(chart.output[0].starts_with("Payroll | ########"));

    let saved = reopened
        .execute(Command::Save {
            file: "copy.txt".to_string(),
        })
        .unwrap();
    assert!(matches!(saved.notices[0], Notice::Success(_)));
    assert!(temp_dir.path().join("copy.txt").exists());

    let deleted = reopened
        .execute(Command::Delete {
            file: "copy.txt".to_string(),
        })
        .unwrap();
    assert!(matches!(deleted.notices[0], Notice::Success(_)));
    assert!(!temp_dir.path().join("copy.txt").exists());

    let json = reopened.execute(Command::List { json: true }).unwrap();
    let parsed: Vec<DomainRecord> = serde_json::from_str(&json.output[0]).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[1].name, "Backup");
}
