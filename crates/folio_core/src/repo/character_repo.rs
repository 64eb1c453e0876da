//! Character (3D avatar) repository over the `characters` table.
//!
//! # Invariants
//! - Listing is newest first: `created_at DESC, rowid DESC`.
//! - Activation clears every other active flag in the same transaction.

use super::ordering::delete_by_id;
use super::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use crate::model::character::{Character, CharacterDraft};
use crate::model::ordering::RecordId;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use uuid::Uuid;

const CHARACTER_SELECT_SQL: &str = "SELECT
    id,
    name,
    model_url,
    image_url,
    active,
    created_at,
    updated_at
FROM characters";

const CHARACTER_COLUMNS: &[&str] = &[
    "id",
    "name",
    "model_url",
    "image_url",
    "active",
    "created_at",
    "updated_at",
];

/// Repository interface for avatar assets.
pub trait CharacterRepository {
    fn create(&self, draft: &CharacterDraft) -> RepoResult<Character>;
    fn get(&self, id: RecordId) -> RepoResult<Option<Character>>;
    fn list(&self) -> RepoResult<Vec<Character>>;
    /// Marks one character active and every other one inactive.
    fn activate(&self, id: RecordId) -> RepoResult<Character>;
    /// Returns the active character, if any.
    fn active(&self) -> RepoResult<Option<Character>>;
    /// Deletes one character. Returns `false` when nothing matched.
    fn delete(&self, id: RecordId) -> RepoResult<bool>;
}

/// SQLite-backed character repository.
pub struct SqliteCharacterRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCharacterRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "characters", CHARACTER_COLUMNS)?;
        Ok(Self { conn })
    }

    fn query_characters(&self, sql: &str, id: Option<RecordId>) -> RepoResult<Vec<Character>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = match id {
            Some(id) => stmt.query([id.to_string()])?,
            None => stmt.query([])?,
        };
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_character_row(row)?);
        }
        Ok(items)
    }
}

impl CharacterRepository for SqliteCharacterRepository<'_> {
    fn create(&self, draft: &CharacterDraft) -> RepoResult<Character> {
        draft.validate()?;

        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO characters (
                id,
                name,
                model_url,
                image_url,
                active
            ) VALUES (?1, ?2, ?3, ?4, 0);",
            params![
                id.to_string(),
                draft.name.trim(),
                draft.model_url.trim(),
                draft.image_url.as_deref(),
            ],
        )?;
        self.get(id)?.ok_or(RepoError::NotFound(id))
    }

    fn get(&self, id: RecordId) -> RepoResult<Option<Character>> {
        let mut items =
            self.query_characters(&format!("{CHARACTER_SELECT_SQL} WHERE id = ?1;"), Some(id))?;
        Ok(items.pop())
    }

    fn list(&self) -> RepoResult<Vec<Character>> {
        self.query_characters(
            &format!("{CHARACTER_SELECT_SQL} ORDER BY created_at DESC, rowid DESC;"),
            None,
        )
    }

    fn activate(&self, id: RecordId) -> RepoResult<Character> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "UPDATE characters
             SET active = 0,
                 updated_at = (CAST(ROUND((julianday('now') - 2440587.5) * 86400000) AS INTEGER))
             WHERE active = 1;",
            [],
        )?;
        let changed = tx.execute(
            "UPDATE characters
             SET active = 1,
                 updated_at = (CAST(ROUND((julianday('now') - 2440587.5) * 86400000) AS INTEGER))
             WHERE id = ?1;",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        tx.commit()?;

        self.get(id)?.ok_or(RepoError::NotFound(id))
    }

    fn active(&self) -> RepoResult<Option<Character>> {
        let mut items = self.query_characters(
            &format!("{CHARACTER_SELECT_SQL} WHERE active = 1 ORDER BY updated_at DESC LIMIT 1;"),
            None,
        )?;
        Ok(items.pop())
    }

    fn delete(&self, id: RecordId) -> RepoResult<bool> {
        delete_by_id(self.conn, "characters", &id.to_string())
    }
}

fn parse_character_row(row: &Row<'_>) -> RepoResult<Character> {
    let id_text: String = row.get("id")?;
    let active = match row.get::<_, i64>("active")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid active value `{other}` in characters.active"
            )));
        }
    };

    Ok(Character {
        id: parse_uuid(&id_text, "characters.id")?,
        name: row.get("name")?,
        model_url: row.get("model_url")?,
        image_url: row.get("image_url")?,
        active,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
