//! Experience repository over the `experiences` table.
//!
//! # Invariants
//! - Listing is deterministic: `sort_order ASC, start_date DESC, rowid DESC`.

use super::ordering::{apply_order_assignments, delete_by_id};
use super::{ensure_connection_ready, parse_uuid, OrderedRepository, RepoError, RepoResult};
use crate::model::experience::{Experience, ExperienceDraft};
use crate::model::ordering::{Collection, OrderAssignment, RecordId};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const EXPERIENCE_SELECT_SQL: &str = "SELECT
    id,
    title,
    company,
    start_date,
    end_date,
    description,
    sort_order,
    created_at,
    updated_at
FROM experiences";

const EXPERIENCE_COLUMNS: &[&str] = &[
    "id",
    "title",
    "company",
    "start_date",
    "end_date",
    "description",
    "sort_order",
    "created_at",
    "updated_at",
];

/// SQLite-backed experience repository.
pub struct SqliteExperienceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteExperienceRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "experiences", EXPERIENCE_COLUMNS)?;
        Ok(Self { conn })
    }

    fn load_required(&self, id: RecordId) -> RepoResult<Experience> {
        self.get(id)?.ok_or(RepoError::NotFound(id))
    }
}

impl OrderedRepository for SqliteExperienceRepository<'_> {
    type Record = Experience;
    type Draft = ExperienceDraft;

    fn collection(&self) -> Collection {
        Collection::Experiences
    }

    fn create(&self, draft: &ExperienceDraft) -> RepoResult<Experience> {
        draft.validate()?;

        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO experiences (
                id,
                title,
                company,
                start_date,
                end_date,
                description,
                sort_order
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                id.to_string(),
                draft.title.trim(),
                draft.company.trim(),
                draft.start_date,
                draft.end_date,
                draft.description.as_str(),
                draft.order_or_default(),
            ],
        )?;
        self.load_required(id)
    }

    fn update(&self, id: RecordId, draft: &ExperienceDraft) -> RepoResult<Experience> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE experiences
             SET
                title = ?2,
                company = ?3,
                start_date = ?4,
                end_date = ?5,
                description = ?6,
                sort_order = COALESCE(?7, sort_order),
                updated_at = (CAST(ROUND((julianday('now') - 2440587.5) * 86400000) AS INTEGER))
             WHERE id = ?1;",
            params![
                id.to_string(),
                draft.title.trim(),
                draft.company.trim(),
                draft.start_date,
                draft.end_date,
                draft.description.as_str(),
                draft.order,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        self.load_required(id)
    }

    fn get(&self, id: RecordId) -> RepoResult<Option<Experience>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EXPERIENCE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_experience_row(row)?));
        }
        Ok(None)
    }

    fn list(&self) -> RepoResult<Vec<Experience>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EXPERIENCE_SELECT_SQL} ORDER BY sort_order ASC, start_date DESC, rowid DESC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_experience_row(row)?);
        }
        Ok(items)
    }

    fn delete(&self, id: RecordId) -> RepoResult<bool> {
        delete_by_id(self.conn, "experiences", &id.to_string())
    }

    fn reorder(&self, assignments: &[OrderAssignment]) -> RepoResult<()> {
        apply_order_assignments(self.conn, Collection::Experiences, assignments)
    }
}

fn parse_experience_row(row: &Row<'_>) -> RepoResult<Experience> {
    let id_text: String = row.get("id")?;
    let start_date: i64 = row.get("start_date")?;
    let end_date: Option<i64> = row.get("end_date")?;
    if matches!(end_date, Some(end) if end < start_date) {
        return Err(RepoError::InvalidData(format!(
            "experience {id_text} ends before it starts"
        )));
    }

    Ok(Experience {
        id: parse_uuid(&id_text, "experiences.id")?,
        title: row.get("title")?,
        company: row.get("company")?,
        start_date,
        end_date,
        description: row.get("description")?,
        order: row.get("sort_order")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
