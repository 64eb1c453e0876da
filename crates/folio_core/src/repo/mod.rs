//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Write paths validate drafts before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Repositories only accept connections migrated to the latest version.
//! - Listings end on `rowid DESC`: rows stamped in the same millisecond list
//!   newest insert first.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::ordering::{Collection, OrderAssignment, Orderable, RecordId};
use crate::model::ValidationError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod character_repo;
pub mod experience_repo;
mod ordering;
pub mod project_repo;
pub mod skill_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by every content table.
#[derive(Debug)]
pub enum RepoError {
    /// Draft failed validation; nothing was written.
    Validation(ValidationError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Referenced record does not exist.
    NotFound(RecordId),
    /// Persisted row cannot be converted to a valid record.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence contract shared by every orderable collection.
pub trait OrderedRepository {
    type Record: Orderable;
    type Draft;

    /// Collection served by this repository.
    fn collection(&self) -> Collection;
    /// Inserts a new record; `order` defaults to 0 when the draft omits it.
    fn create(&self, draft: &Self::Draft) -> RepoResult<Self::Record>;
    /// Replaces payload fields; keeps `order` when the draft omits it.
    fn update(&self, id: RecordId, draft: &Self::Draft) -> RepoResult<Self::Record>;
    /// Loads one record by id.
    fn get(&self, id: RecordId) -> RepoResult<Option<Self::Record>>;
    /// Lists the whole collection in display order.
    fn list(&self) -> RepoResult<Vec<Self::Record>>;
    /// Deletes one record. Returns `false` when nothing matched.
    fn delete(&self, id: RecordId) -> RepoResult<bool>;
    /// Applies all assignments in one transaction, or none of them.
    fn reorder(&self, assignments: &[OrderAssignment]) -> RepoResult<()>;
}

pub(crate) fn parse_uuid(value: &str, column: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }

    for &column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
