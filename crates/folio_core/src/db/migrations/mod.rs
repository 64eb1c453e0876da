//! Embedded schema steps for the content database.
//!
//! Steps run in version order inside a single transaction; `user_version`
//! advances with each step so a committed run always matches the tables.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "content_tables",
        sql: include_str!("0001_init.sql"),
    },
    SchemaStep {
        version: 2,
        name: "characters",
        sql: include_str!("0002_characters.sql"),
    },
];

/// Schema version a fully migrated content database reports.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Brings `conn` up to [`latest_version`].
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file is ahead of this build.
/// - `Migration` naming the first step that failed; nothing is applied.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();

    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > from_version)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        let applied = tx.execute_batch(step.sql).and_then(|()| {
            tx.execute_batch(&format!("PRAGMA user_version = {};", step.version))
        });
        if let Err(source) = applied {
            error!(
                "event=db_migrate module=db status=error version={} name={}",
                step.version, step.name
            );
            return Err(DbError::Migration {
                version: step.version,
                name: step.name,
                source,
            });
        }
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={from_version} to_version={latest}"
    );
    Ok(())
}
