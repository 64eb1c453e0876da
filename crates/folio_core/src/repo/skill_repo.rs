//! Skill/certification repository over the `skills` table.
//!
//! # Invariants
//! - Listing is deterministic: `sort_order ASC, created_at DESC, rowid DESC`.

use super::ordering::{apply_order_assignments, delete_by_id};
use super::{ensure_connection_ready, parse_uuid, OrderedRepository, RepoError, RepoResult};
use crate::model::ordering::{Collection, OrderAssignment, RecordId};
use crate::model::skill::{Skill, SkillDraft, SkillListQuery};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const SKILL_SELECT_SQL: &str = "SELECT
    id,
    name,
    category,
    proficiency,
    link,
    sort_order,
    created_at,
    updated_at
FROM skills";

const SKILL_ORDER_SQL: &str = " ORDER BY sort_order ASC, created_at DESC, rowid DESC";

const SKILL_COLUMNS: &[&str] = &[
    "id",
    "name",
    "category",
    "proficiency",
    "link",
    "sort_order",
    "created_at",
    "updated_at",
];

/// Skill-specific reads on top of the shared ordered contract.
pub trait SkillRepository: OrderedRepository<Record = Skill, Draft = SkillDraft> {
    /// Lists skills matching the category filter, in display order.
    fn list_filtered(&self, query: &SkillListQuery) -> RepoResult<Vec<Skill>>;
}

/// SQLite-backed skill repository.
pub struct SqliteSkillRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSkillRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "skills", SKILL_COLUMNS)?;
        Ok(Self { conn })
    }

    fn load_required(&self, id: RecordId) -> RepoResult<Skill> {
        self.get(id)?.ok_or(RepoError::NotFound(id))
    }

    fn query_skills(&self, sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<Skill>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_skill_row(row)?);
        }
        Ok(items)
    }
}

impl OrderedRepository for SqliteSkillRepository<'_> {
    type Record = Skill;
    type Draft = SkillDraft;

    fn collection(&self) -> Collection {
        Collection::Skills
    }

    fn create(&self, draft: &SkillDraft) -> RepoResult<Skill> {
        draft.validate()?;

        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO skills (
                id,
                name,
                category,
                proficiency,
                link,
                sort_order
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                id.to_string(),
                draft.name.trim(),
                draft.category.trim(),
                draft.proficiency,
                draft.link.as_deref(),
                draft.order_or_default(),
            ],
        )?;
        self.load_required(id)
    }

    fn update(&self, id: RecordId, draft: &SkillDraft) -> RepoResult<Skill> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE skills
             SET
                name = ?2,
                category = ?3,
                proficiency = ?4,
                link = ?5,
                sort_order = COALESCE(?6, sort_order),
                updated_at = (CAST(ROUND((julianday('now') - 2440587.5) * 86400000) AS INTEGER))
             WHERE id = ?1;",
            params![
                id.to_string(),
                draft.name.trim(),
                draft.category.trim(),
                draft.proficiency,
                draft.link.as_deref(),
                draft.order,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        self.load_required(id)
    }

    fn get(&self, id: RecordId) -> RepoResult<Option<Skill>> {
        let mut items = self.query_skills(
            &format!("{SKILL_SELECT_SQL} WHERE id = ?1;"),
            vec![Value::Text(id.to_string())],
        )?;
        Ok(items.pop())
    }

    fn list(&self) -> RepoResult<Vec<Skill>> {
        self.list_filtered(&SkillListQuery::default())
    }

    fn delete(&self, id: RecordId) -> RepoResult<bool> {
        delete_by_id(self.conn, "skills", &id.to_string())
    }

    fn reorder(&self, assignments: &[OrderAssignment]) -> RepoResult<()> {
        apply_order_assignments(self.conn, Collection::Skills, assignments)
    }
}

impl SkillRepository for SqliteSkillRepository<'_> {
    fn list_filtered(&self, query: &SkillListQuery) -> RepoResult<Vec<Skill>> {
        let mut sql = format!("{SKILL_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(category) = query.category.as_deref() {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.to_string()));
        }

        if !query.exclude_categories.is_empty() {
            let placeholders = vec!["?"; query.exclude_categories.len()].join(", ");
            sql.push_str(&format!(" AND category NOT IN ({placeholders})"));
            bind_values.extend(
                query
                    .exclude_categories
                    .iter()
                    .map(|category| Value::Text(category.clone())),
            );
        }

        sql.push_str(SKILL_ORDER_SQL);
        self.query_skills(&sql, bind_values)
    }
}

fn parse_skill_row(row: &Row<'_>) -> RepoResult<Skill> {
    let id_text: String = row.get("id")?;
    Ok(Skill {
        id: parse_uuid(&id_text, "skills.id")?,
        name: row.get("name")?,
        category: row.get("category")?,
        proficiency: row.get("proficiency")?,
        link: row.get("link")?,
        order: row.get("sort_order")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
