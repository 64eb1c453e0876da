use folio_core::db::open_db_in_memory;
use folio_core::{
    export_snapshot, import_snapshot, seed_defaults, Orderable, ProjectDraft, ProjectService,
    SeedSummary, Snapshot, SnapshotError, SqliteProjectRepository,
};

#[test]
fn seed_fills_empty_collections_in_position_order() {
    let conn = open_db_in_memory().unwrap();

    let summary = seed_defaults(&conn).unwrap();
    assert_eq!(
        summary,
        SeedSummary {
            experiences: 3,
            skills: 24,
            projects: 4,
        }
    );

    let snapshot = export_snapshot(&conn).unwrap();
    let project_titles: Vec<&str> = snapshot
        .projects
        .iter()
        .map(|item| item.title.as_str())
        .collect();
    assert_eq!(
        project_titles,
        vec![
            "Neural Vision API",
            "Revenue Operations",
            "Tech Stack Arsenal",
            "ChatBot Orchestrator"
        ]
    );
    let orders: Vec<i64> = snapshot.skills.iter().map(|item| item.order()).collect();
    assert_eq!(orders, (0..24).collect::<Vec<i64>>());
    assert!(snapshot.experiences[0].is_current());
}

#[test]
fn seed_skips_collections_that_already_have_content() {
    let conn = open_db_in_memory().unwrap();
    let projects = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());
    projects
        .create(&ProjectDraft::new("Portfolio v2", "Built with Rust", "Rust"))
        .unwrap();

    let summary = seed_defaults(&conn).unwrap();
    assert_eq!(summary.projects, 0);
    assert_eq!(summary.skills, 24);
    assert_eq!(projects.list().unwrap().len(), 1);

    let again = seed_defaults(&conn).unwrap();
    assert_eq!(again, SeedSummary::default());
}

#[test]
fn export_then_import_into_fresh_database_preserves_ids_and_order() {
    let source = open_db_in_memory().unwrap();
    seed_defaults(&source).unwrap();
    let projects = ProjectService::new(SqliteProjectRepository::try_new(&source).unwrap());
    projects.move_record(3, 0).unwrap();
    let exported = export_snapshot(&source).unwrap();

    let json = exported.to_json().unwrap();
    let parsed = Snapshot::from_json(&json).unwrap();

    let target = open_db_in_memory().unwrap();
    import_snapshot(&target, &parsed).unwrap();
    assert_eq!(export_snapshot(&target).unwrap(), exported);
}

#[test]
fn import_replaces_existing_content() {
    let conn = open_db_in_memory().unwrap();
    seed_defaults(&conn).unwrap();

    let mut snapshot = export_snapshot(&conn).unwrap();
    snapshot.projects.truncate(1);
    snapshot.skills.clear();

    import_snapshot(&conn, &snapshot).unwrap();
    let after = export_snapshot(&conn).unwrap();
    assert_eq!(after.projects.len(), 1);
    assert!(after.skills.is_empty());
    assert_eq!(after.experiences.len(), 3);
}

#[test]
fn invalid_snapshot_leaves_content_unchanged() {
    let conn = open_db_in_memory().unwrap();
    seed_defaults(&conn).unwrap();
    let before = export_snapshot(&conn).unwrap();

    let mut broken = before.clone();
    broken.projects.clear();
    broken.skills[0].proficiency = 250;
    let err = import_snapshot(&conn, &broken).unwrap_err();
    assert!(matches!(err, SnapshotError::Repo(_)));

    let mut duplicated = before.clone();
    let first = duplicated.experiences[0].clone();
    duplicated.experiences.push(first);
    assert!(import_snapshot(&conn, &duplicated).is_err());

    assert_eq!(export_snapshot(&conn).unwrap(), before);
}

#[test]
fn unsupported_format_version_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let mut snapshot = export_snapshot(&conn).unwrap();
    snapshot.format_version = 99;

    let json = snapshot.to_json().unwrap();
    assert!(matches!(
        Snapshot::from_json(&json),
        Err(SnapshotError::UnsupportedFormat(99))
    ));
}

#[test]
fn import_keeps_export_order_for_records_tied_on_order() {
    let source = open_db_in_memory().unwrap();
    let projects = ProjectService::new(SqliteProjectRepository::try_new(&source).unwrap());
    for title in ["Alpha", "Beta", "Gamma"] {
        projects
            .create(&ProjectDraft::new(title, "tied order", "Rust"))
            .unwrap();
    }
    let exported = export_snapshot(&source).unwrap();

    let target = open_db_in_memory().unwrap();
    import_snapshot(&target, &exported).unwrap();
    let reimported = export_snapshot(&target).unwrap();

    let titles: Vec<&str> = reimported
        .projects
        .iter()
        .map(|item| item.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Gamma", "Beta", "Alpha"]);
    assert_eq!(reimported, exported);
}

#[test]
fn import_validates_project_images() {
    let conn = open_db_in_memory().unwrap();
    seed_defaults(&conn).unwrap();
    let before = export_snapshot(&conn).unwrap();

    let mut broken = before.clone();
    broken.projects[0].images = vec!["  ".to_string()];
    assert!(matches!(
        import_snapshot(&conn, &broken),
        Err(SnapshotError::Repo(_))
    ));
    assert_eq!(export_snapshot(&conn).unwrap(), before);
}
