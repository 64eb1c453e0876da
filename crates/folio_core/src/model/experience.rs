//! Experience timeline entries.
//!
//! # Invariants
//! - `end_date`, when set, is not earlier than `start_date`.
//! - Display order is `order ASC, start_date DESC`.

use super::ordering::{Orderable, RecordId, DEFAULT_ORDER};
use super::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Persisted timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: RecordId,
    pub title: String,
    pub company: String,
    /// Unix epoch milliseconds.
    pub start_date: i64,
    /// Unix epoch milliseconds. `None` means the role is current.
    pub end_date: Option<i64>,
    pub description: String,
    pub order: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Experience {
    /// Returns whether this entry has no end date.
    pub fn is_current(&self) -> bool {
        self.end_date.is_none()
    }
}

impl Orderable for Experience {
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

/// Create/update payload for an experience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceDraft {
    pub title: String,
    pub company: String,
    pub start_date: i64,
    pub end_date: Option<i64>,
    pub description: String,
    /// `None` keeps the stored value on update and means `0` on create.
    pub order: Option<i64>,
}

impl ExperienceDraft {
    pub fn new(title: impl Into<String>, company: impl Into<String>, start_date: i64) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            start_date,
            end_date: None,
            description: String::new(),
            order: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("company", &self.company)?;
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ValidationError::DateRange {
                    start: self.start_date,
                    end,
                });
            }
        }
        Ok(())
    }

    pub(crate) fn order_or_default(&self) -> i64 {
        self.order.unwrap_or(DEFAULT_ORDER)
    }
}

impl From<&Experience> for ExperienceDraft {
    fn from(value: &Experience) -> Self {
        Self {
            title: value.title.clone(),
            company: value.company.clone(),
            start_date: value.start_date,
            end_date: value.end_date,
            description: value.description.clone(),
            order: Some(value.order),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ExperienceDraft;
    use crate::model::ValidationError;

    #[test]
    fn validate_rejects_end_before_start() {
        let mut draft = ExperienceDraft::new("AI Specialist", "Innovation Labs", 2_000);
        draft.end_date = Some(1_000);
        assert_eq!(
            draft.validate(),
            Err(ValidationError::DateRange {
                start: 2_000,
                end: 1_000
            })
        );

        draft.end_date = Some(2_000);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn validate_requires_company() {
        let draft = ExperienceDraft::new("Strategist", " ", 0);
        assert_eq!(
            draft.validate(),
            Err(ValidationError::BlankField("company"))
        );
    }
}
