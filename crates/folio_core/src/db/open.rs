//! Connection bootstrap for content databases.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and a 5 s busy timeout.
//! - File databases run in WAL mode so the site can read while the admin writes.
//! - Returned connections are migrated to the latest schema.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    File,
    Memory,
}

impl Target {
    fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Memory => "memory",
        }
    }
}

/// Opens (or creates) a content database file.
///
/// Emits `db_open` events with duration and outcome.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    bootstrap(Target::File, || Connection::open(path))
}

/// Opens a private in-memory content database. Used by tests and dry runs.
pub fn open_db_in_memory() -> DbResult<Connection> {
    bootstrap(Target::Memory, Connection::open_in_memory)
}

fn bootstrap(
    target: Target,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = target.as_str();

    let prepared = connect()
        .map_err(|err| (DbError::from(err), "db_open_failed"))
        .and_then(|mut conn| match configure(&mut conn, target) {
            Ok(()) => Ok(conn),
            Err(err) => Err((err, "db_bootstrap_failed")),
        });

    match prepared {
        Ok(conn) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err((err, error_code)) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code={error_code} error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

fn configure(conn: &mut Connection, target: Target) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    if target == Target::File {
        // journal_mode returns the resulting mode as a row.
        conn.query_row("PRAGMA journal_mode = WAL;", [], |row| row.get::<_, String>(0))?;
    }
    apply_migrations(conn)
}
