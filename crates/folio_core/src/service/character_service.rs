//! Character (3D avatar) use-case service.
//!
//! # Invariants
//! - At most one character is active after any successful call.
//! - A failed activation leaves the previous active character in place.

use crate::model::character::{Character, CharacterDraft};
use crate::model::ordering::RecordId;
use crate::repo::character_repo::CharacterRepository;
use crate::service::ContentResult;
use log::info;

/// Use-case facade for avatar assets.
pub struct CharacterService<R: CharacterRepository> {
    repo: R,
}

impl<R: CharacterRepository> CharacterService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers an uploaded model. New characters start inactive.
    pub fn create(&self, draft: &CharacterDraft) -> ContentResult<Character> {
        let character = self.repo.create(draft)?;
        info!(
            "event=character_create module=service status=ok id={} has_image={}",
            character.id,
            character.image_url.is_some()
        );
        Ok(character)
    }

    /// Lists characters, newest first.
    pub fn list(&self) -> ContentResult<Vec<Character>> {
        Ok(self.repo.list()?)
    }

    /// Makes `id` the only active character.
    pub fn activate(&self, id: RecordId) -> ContentResult<Character> {
        let character = self.repo.activate(id)?;
        info!("event=character_activate module=service status=ok id={id}");
        Ok(character)
    }

    /// Returns the character shown in the hero section, if any.
    pub fn active(&self) -> ContentResult<Option<Character>> {
        Ok(self.repo.active()?)
    }

    /// Deletes one character. Absent ids are a no-op.
    pub fn delete(&self, id: RecordId) -> ContentResult<()> {
        let removed = self.repo.delete(id)?;
        info!(
            "event=character_delete module=service status={} id={}",
            if removed { "ok" } else { "noop" },
            id
        );
        Ok(())
    }
}
