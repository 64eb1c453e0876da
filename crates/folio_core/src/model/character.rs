//! 3D avatar assets shown in the hero section.
//!
//! At most one character is active at a time; activation is exclusive.

use super::ordering::RecordId;
use super::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: RecordId,
    pub name: String,
    /// Public URL of the uploaded model file.
    pub model_url: String,
    /// Optional preview image URL.
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDraft {
    pub name: String,
    pub model_url: String,
    pub image_url: Option<String>,
}

impl CharacterDraft {
    pub fn new(name: impl Into<String>, model_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model_url: model_url.into(),
            image_url: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("model_url", &self.model_url)?;
        if let Some(image_url) = self.image_url.as_deref() {
            require_text("image_url", image_url)?;
        }
        Ok(())
    }
}
