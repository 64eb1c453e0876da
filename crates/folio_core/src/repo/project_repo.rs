//! Project repository over the `projects` table.
//!
//! # Invariants
//! - Listing is deterministic: `sort_order ASC, created_at DESC, rowid DESC`.
//! - `images` is persisted as a JSON array of strings.
//! - Image appends and removals read and write the list in one transaction.

use super::ordering::{apply_order_assignments, delete_by_id};
use super::{ensure_connection_ready, parse_uuid, OrderedRepository, RepoError, RepoResult};
use crate::model::ordering::{Collection, OrderAssignment, RecordId};
use crate::model::project::{Project, ProjectDraft};
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use uuid::Uuid;

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    tags,
    link,
    images,
    sort_order,
    created_at,
    updated_at
FROM projects";

const PROJECT_ORDER_SQL: &str = "ORDER BY sort_order ASC, created_at DESC, rowid DESC";

const PROJECT_COLUMNS: &[&str] = &[
    "id",
    "title",
    "description",
    "tags",
    "link",
    "images",
    "sort_order",
    "created_at",
    "updated_at",
];

/// Project-specific operations on top of the shared ordered contract.
pub trait ProjectRepository: OrderedRepository<Record = Project, Draft = ProjectDraft> {
    /// Lists the first `limit` projects in display order.
    fn list_featured(&self, limit: u32) -> RepoResult<Vec<Project>>;
    /// Drops every occurrence of `image_url` from the project's image list.
    fn remove_image(&self, id: RecordId, image_url: &str) -> RepoResult<Project>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "projects", PROJECT_COLUMNS)?;
        Ok(Self { conn })
    }

    fn load_required(&self, id: RecordId) -> RepoResult<Project> {
        self.get(id)?.ok_or(RepoError::NotFound(id))
    }

    fn query_projects(&self, sql: &str, limit: Option<u32>) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = match limit {
            Some(limit) => stmt.query([i64::from(limit)])?,
            None => stmt.query([])?,
        };
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_project_row(row)?);
        }
        Ok(items)
    }
}

impl OrderedRepository for SqliteProjectRepository<'_> {
    type Record = Project;
    type Draft = ProjectDraft;

    fn collection(&self) -> Collection {
        Collection::Projects
    }

    fn create(&self, draft: &ProjectDraft) -> RepoResult<Project> {
        draft.validate()?;

        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO projects (
                id,
                title,
                description,
                tags,
                link,
                images,
                sort_order
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                id.to_string(),
                draft.title.trim(),
                draft.description.as_str(),
                draft.tags.trim(),
                draft.link.as_deref(),
                encode_images(&draft.images)?,
                draft.order_or_default(),
            ],
        )?;
        self.load_required(id)
    }

    fn update(&self, id: RecordId, draft: &ProjectDraft) -> RepoResult<Project> {
        draft.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut images = load_images(&tx, id)?.ok_or(RepoError::NotFound(id))?;
        images.extend(draft.images.iter().cloned());

        tx.execute(
            "UPDATE projects
             SET
                title = ?2,
                description = ?3,
                tags = ?4,
                link = ?5,
                images = ?6,
                sort_order = COALESCE(?7, sort_order),
                updated_at = (CAST(ROUND((julianday('now') - 2440587.5) * 86400000) AS INTEGER))
             WHERE id = ?1;",
            params![
                id.to_string(),
                draft.title.trim(),
                draft.description.as_str(),
                draft.tags.trim(),
                draft.link.as_deref(),
                encode_images(&images)?,
                draft.order,
            ],
        )?;
        tx.commit()?;

        if !draft.images.is_empty() {
            info!(
                "event=project_images_append module=repo status=ok project_id={} added={} total={}",
                id,
                draft.images.len(),
                images.len()
            );
        }
        self.load_required(id)
    }

    fn get(&self, id: RecordId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }
        Ok(None)
    }

    fn list(&self) -> RepoResult<Vec<Project>> {
        self.query_projects(&format!("{PROJECT_SELECT_SQL} {PROJECT_ORDER_SQL};"), None)
    }

    fn delete(&self, id: RecordId) -> RepoResult<bool> {
        delete_by_id(self.conn, "projects", &id.to_string())
    }

    fn reorder(&self, assignments: &[OrderAssignment]) -> RepoResult<()> {
        apply_order_assignments(self.conn, Collection::Projects, assignments)
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn list_featured(&self, limit: u32) -> RepoResult<Vec<Project>> {
        self.query_projects(
            &format!("{PROJECT_SELECT_SQL} {PROJECT_ORDER_SQL} LIMIT ?1;"),
            Some(limit),
        )
    }

    fn remove_image(&self, id: RecordId, image_url: &str) -> RepoResult<Project> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let images = load_images(&tx, id)?.ok_or(RepoError::NotFound(id))?;
        let before = images.len();
        let remaining: Vec<String> = images.into_iter().filter(|url| url != image_url).collect();

        if remaining.len() != before {
            tx.execute(
                "UPDATE projects
                 SET images = ?2,
                     updated_at = (CAST(ROUND((julianday('now') - 2440587.5) * 86400000) AS INTEGER))
                 WHERE id = ?1;",
                params![id.to_string(), encode_images(&remaining)?],
            )?;
        }
        tx.commit()?;

        info!(
            "event=project_image_remove module=repo status=ok project_id={} removed={}",
            id,
            before - remaining.len()
        );
        self.load_required(id)
    }
}

fn load_images(conn: &Connection, id: RecordId) -> RepoResult<Option<Vec<String>>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT images FROM projects WHERE id = ?1;",
            [id.to_string()],
            |row| row.get(0),
        )
        .optional()?;
    raw.map(|value| decode_images(&value)).transpose()
}

fn encode_images(images: &[String]) -> RepoResult<String> {
    serde_json::to_string(images)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode project images: {err}")))
}

fn decode_images(raw: &str) -> RepoResult<Vec<String>> {
    serde_json::from_str(raw).map_err(|err| {
        RepoError::InvalidData(format!("invalid json `{raw}` in projects.images: {err}"))
    })
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let id_text: String = row.get("id")?;
    let images_text: String = row.get("images")?;
    Ok(Project {
        id: parse_uuid(&id_text, "projects.id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        tags: row.get("tags")?,
        link: row.get("link")?,
        images: decode_images(&images_text)?,
        order: row.get("sort_order")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
