//! Project showcase entries.
//!
//! # Invariants
//! - `images` keeps upload order; appends go to the end.
//! - `tags` is stored as the comma-separated string the admin form submits.

use super::ordering::{Orderable, RecordId, DEFAULT_ORDER};
use super::{check_link, require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Number of projects shown on the home page.
pub const FEATURED_PROJECT_LIMIT: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub link: Option<String>,
    /// Public upload URLs, e.g. `/uploads/<uuid>.png`.
    pub images: Vec<String>,
    pub order: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Project {
    /// Splits `tags` on commas, dropping blanks.
    pub fn tag_list(&self) -> Vec<&str> {
        split_tags(&self.tags)
    }

    /// First image, used as the card cover.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

impl Orderable for Project {
    fn id(&self) -> RecordId {
        self.id
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn label(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub tags: String,
    pub link: Option<String>,
    /// Stored as-is on create; appended to the stored list on update.
    pub images: Vec<String>,
    pub order: Option<i64>,
}

impl ProjectDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        tags: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tags: tags.into(),
            link: None,
            images: Vec::new(),
            order: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        if split_tags(&self.tags).is_empty() {
            return Err(ValidationError::BlankField("tags"));
        }
        check_link(self.link.as_deref())?;
        for image in &self.images {
            require_text("images", image)?;
        }
        Ok(())
    }

    pub(crate) fn order_or_default(&self) -> i64 {
        self.order.unwrap_or(DEFAULT_ORDER)
    }
}

/// Starts with no images: updates append, so the stored list stays as is.
impl From<&Project> for ProjectDraft {
    fn from(value: &Project) -> Self {
        Self {
            title: value.title.clone(),
            description: value.description.clone(),
            tags: value.tags.clone(),
            link: value.link.clone(),
            images: Vec::new(),
            order: Some(value.order),
        }
    }
}

fn split_tags(tags: &str) -> Vec<&str> {
    tags.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Project, ProjectDraft};
    use crate::model::ValidationError;
    use uuid::Uuid;

    #[test]
    fn tag_list_trims_and_skips_blanks() {
        let project = Project {
            id: Uuid::new_v4(),
            title: "Neural Vision API".to_string(),
            description: "pipeline".to_string(),
            tags: " AI Infrastructure, Python,, Computer Vision ".to_string(),
            link: None,
            images: vec!["/uploads/a.png".to_string(), "/uploads/b.png".to_string()],
            order: 0,
            created_at: 0,
            updated_at: 0,
        };
        assert_eq!(
            project.tag_list(),
            vec!["AI Infrastructure", "Python", "Computer Vision"]
        );
        assert_eq!(project.cover_image(), Some("/uploads/a.png"));
    }

    #[test]
    fn validate_requires_at_least_one_tag() {
        let draft = ProjectDraft::new("Revenue Operations", "ARR Generated", " , ");
        assert_eq!(draft.validate(), Err(ValidationError::BlankField("tags")));
    }
}
