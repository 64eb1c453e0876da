//! Whole-content export and import.
//!
//! # Responsibility
//! - Export every orderable collection in display order as one document.
//! - Replace stored content with a previously exported document.
//!
//! # Invariants
//! - Import keeps ids, `order` values and timestamps exactly as exported.
//! - Import replaces all three collections in one transaction.

use crate::model::experience::{Experience, ExperienceDraft};
use crate::model::project::{Project, ProjectDraft};
use crate::model::skill::{Skill, SkillDraft};
use crate::repo::experience_repo::SqliteExperienceRepository;
use crate::repo::project_repo::SqliteProjectRepository;
use crate::repo::skill_repo::SqliteSkillRepository;
use crate::repo::{OrderedRepository, RepoError, RepoResult};
use log::info;
use rusqlite::{params, Connection, Transaction, TransactionBehavior};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Current document format version.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Exported portfolio content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub format_version: u32,
    pub experiences: Vec<Experience>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
}

/// Snapshot encode/decode/apply failure.
#[derive(Debug)]
pub enum SnapshotError {
    Repo(RepoError),
    Json(serde_json::Error),
    UnsupportedFormat(u32),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "invalid snapshot json: {err}"),
            Self::UnsupportedFormat(version) => write!(
                f,
                "snapshot format {version} is not supported; expected {SNAPSHOT_FORMAT_VERSION}"
            ),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::UnsupportedFormat(_) => None,
        }
    }
}

impl From<RepoError> for SnapshotError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<rusqlite::Error> for SnapshotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(value.into())
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl Snapshot {
    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a document and checks its format version.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(raw)?;
        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(SnapshotError::UnsupportedFormat(snapshot.format_version));
        }
        Ok(snapshot)
    }
}

/// Reads every orderable collection in display order.
pub fn export_snapshot(conn: &Connection) -> RepoResult<Snapshot> {
    Ok(Snapshot {
        format_version: SNAPSHOT_FORMAT_VERSION,
        experiences: SqliteExperienceRepository::try_new(conn)?.list()?,
        skills: SqliteSkillRepository::try_new(conn)?.list()?,
        projects: SqliteProjectRepository::try_new(conn)?.list()?,
    })
}

/// Replaces all orderable content with the snapshot rows.
///
/// Every row is validated before anything is written; a failure at any point
/// leaves the stored content unchanged.
pub fn import_snapshot(conn: &Connection, snapshot: &Snapshot) -> Result<(), SnapshotError> {
    if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
        return Err(SnapshotError::UnsupportedFormat(snapshot.format_version));
    }
    validate_snapshot(snapshot)?;

    // Schema guards run before the write transaction opens.
    SqliteExperienceRepository::try_new(conn)?;
    SqliteSkillRepository::try_new(conn)?;
    SqliteProjectRepository::try_new(conn)?;

    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    tx.execute_batch(
        "DELETE FROM experiences;
         DELETE FROM skills;
         DELETE FROM projects;",
    )?;

    // Reverse insertion gives the first listed row of a tie the highest rowid,
    // so `rowid DESC` reproduces the exported order.
    for item in snapshot.experiences.iter().rev() {
        tx.execute(
            "INSERT INTO experiences (
                id, title, company, start_date, end_date, description,
                sort_order, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                item.id.to_string(),
                item.title,
                item.company,
                item.start_date,
                item.end_date,
                item.description,
                item.order,
                item.created_at,
                item.updated_at,
            ],
        )?;
    }

    for item in snapshot.skills.iter().rev() {
        tx.execute(
            "INSERT INTO skills (
                id, name, category, proficiency, link,
                sort_order, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                item.id.to_string(),
                item.name,
                item.category,
                item.proficiency,
                item.link,
                item.order,
                item.created_at,
                item.updated_at,
            ],
        )?;
    }

    for item in snapshot.projects.iter().rev() {
        tx.execute(
            "INSERT INTO projects (
                id, title, description, tags, link, images,
                sort_order, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                item.id.to_string(),
                item.title,
                item.description,
                item.tags,
                item.link,
                serde_json::to_string(&item.images)?,
                item.order,
                item.created_at,
                item.updated_at,
            ],
        )?;
    }

    tx.commit()?;
    info!(
        "event=snapshot_import module=snapshot status=ok experiences={} skills={} projects={}",
        snapshot.experiences.len(),
        snapshot.skills.len(),
        snapshot.projects.len()
    );
    Ok(())
}

fn validate_snapshot(snapshot: &Snapshot) -> RepoResult<()> {
    for item in &snapshot.experiences {
        ExperienceDraft::from(item).validate()?;
    }
    for item in &snapshot.skills {
        SkillDraft::from(item).validate()?;
    }
    for item in &snapshot.projects {
        let mut draft = ProjectDraft::from(item);
        draft.images = item.images.clone();
        draft.validate()?;
    }
    Ok(())
}
