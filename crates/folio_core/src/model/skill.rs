//! Skills and certifications.
//!
//! Both share one table; a certification is a skill whose category is not one
//! of [`CORE_SKILL_CATEGORIES`].

use super::ordering::{Orderable, RecordId, DEFAULT_ORDER};
use super::{check_link, require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Categories rendered as the skills grid rather than as certifications.
pub const CORE_SKILL_CATEGORIES: &[&str] = &[
    "Frontend",
    "Backend",
    "Tools",
    "Design",
    "Product Management",
    "Prototyping & Design",
    "AI & Engineering",
];

pub const PROFICIENCY_MAX: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: RecordId,
    pub name: String,
    pub category: String,
    /// Percentage in `0..=100`.
    pub proficiency: i64,
    pub link: Option<String>,
    pub order: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Skill {
    /// Returns whether this row belongs to the certifications list.
    pub fn is_certification(&self) -> bool {
        !CORE_SKILL_CATEGORIES.contains(&self.category.as_str())
    }
}

impl Orderable for Skill {
    fn id(&self) -> RecordId {
        self.id
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn label(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDraft {
    pub name: String,
    pub category: String,
    pub proficiency: i64,
    pub link: Option<String>,
    pub order: Option<i64>,
}

impl SkillDraft {
    pub fn new(name: impl Into<String>, category: impl Into<String>, proficiency: i64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            proficiency,
            link: None,
            order: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("category", &self.category)?;
        if !(0..=PROFICIENCY_MAX).contains(&self.proficiency) {
            return Err(ValidationError::OutOfRange {
                field: "proficiency",
                value: self.proficiency,
                min: 0,
                max: PROFICIENCY_MAX,
            });
        }
        check_link(self.link.as_deref())
    }

    pub(crate) fn order_or_default(&self) -> i64 {
        self.order.unwrap_or(DEFAULT_ORDER)
    }
}

impl From<&Skill> for SkillDraft {
    fn from(value: &Skill) -> Self {
        Self {
            name: value.name.clone(),
            category: value.category.clone(),
            proficiency: value.proficiency,
            link: value.link.clone(),
            order: Some(value.order),
        }
    }
}

/// Filter for skill listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillListQuery {
    /// Exact category match.
    pub category: Option<String>,
    /// Categories to leave out.
    pub exclude_categories: Vec<String>,
}

impl SkillListQuery {
    /// Query used by the certifications section.
    pub fn certifications() -> Self {
        Self {
            category: None,
            exclude_categories: CORE_SKILL_CATEGORIES
                .iter()
                .map(|value| (*value).to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SkillDraft;
    use crate::model::ValidationError;

    #[test]
    fn proficiency_must_be_percentage() {
        let draft = SkillDraft::new("SQL", "AI & Engineering", 101);
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::OutOfRange {
                field: "proficiency",
                value: 101,
                ..
            })
        ));
        assert!(SkillDraft::new("SQL", "AI & Engineering", 0)
            .validate()
            .is_ok());
    }

    #[test]
    fn link_must_be_absolute_url() {
        let mut draft = SkillDraft::new("AWS Certified Practitioner", "Certification", 100);
        draft.link = Some("aws.amazon.com/certification".to_string());
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::InvalidLink(_))
        ));
    }
}
