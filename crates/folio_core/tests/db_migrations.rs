use folio_core::db::migrations::latest_version;
use folio_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;
use std::time::{SystemTime, UNIX_EPOCH};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in ["experiences", "skills", "projects", "characters"] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn orderable_tables_default_sort_order_to_zero() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO skills (id, name, category) VALUES ('00000000-0000-4000-8000-000000000001', 'SQL', 'Tools');",
        [],
    )
    .unwrap();

    let order: i64 = conn
        .query_row("SELECT sort_order FROM skills;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(order, 0);
}

#[test]
fn default_timestamps_are_epoch_milliseconds() {
    let conn = open_db_in_memory().unwrap();
    let before_ms = epoch_ms();
    conn.execute(
        "INSERT INTO projects (id, title, description, tags)
         VALUES ('00000000-0000-4000-8000-000000000002', 'Neural Vision API', 'pipeline', 'AI');",
        [],
    )
    .unwrap();
    let after_ms = epoch_ms();

    let created_at: i64 = conn
        .query_row("SELECT created_at FROM projects;", [], |row| row.get(0))
        .unwrap();
    assert!(
        (before_ms - 1..=after_ms + 1).contains(&created_at),
        "created_at {created_at} outside {before_ms}..={after_ms}"
    );
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folio.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "projects");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
