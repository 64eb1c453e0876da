//! Transactional `sort_order` rewrites shared by orderable tables.

use super::{RepoError, RepoResult};
use crate::model::ordering::{Collection, OrderAssignment};
use log::{info, warn};
use rusqlite::{params, Connection, Transaction, TransactionBehavior};
use std::time::Instant;

/// Writes every assignment inside one IMMEDIATE transaction.
///
/// The first unknown id aborts the call; dropping the uncommitted
/// transaction rolls back the rows already touched.
pub(crate) fn apply_order_assignments(
    conn: &Connection,
    collection: Collection,
    assignments: &[OrderAssignment],
) -> RepoResult<()> {
    let started_at = Instant::now();
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    {
        let mut stmt = tx.prepare(&format!(
            "UPDATE {}
             SET sort_order = ?2,
                 updated_at = (CAST(ROUND((julianday('now') - 2440587.5) * 86400000) AS INTEGER))
             WHERE id = ?1;",
            collection.table_name()
        ))?;
        for assignment in assignments {
            let changed = stmt.execute(params![assignment.id.to_string(), assignment.order])?;
            if changed == 0 {
                warn!(
                    "event=collection_reorder module=repo status=rollback collection={} missing_id={}",
                    collection, assignment.id
                );
                return Err(RepoError::NotFound(assignment.id));
            }
        }
    }
    tx.commit()?;

    info!(
        "event=collection_reorder module=repo status=ok collection={} count={} duration_ms={}",
        collection,
        assignments.len(),
        started_at.elapsed().as_millis()
    );
    Ok(())
}

/// Removes one row by id. Returns whether a row matched.
pub(crate) fn delete_by_id(
    conn: &Connection,
    table: &'static str,
    id: &str,
) -> RepoResult<bool> {
    let changed = conn.execute(&format!("DELETE FROM {table} WHERE id = ?1;"), [id])?;
    Ok(changed > 0)
}
