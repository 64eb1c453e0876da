//! Domain model for portfolio content.
//!
//! # Responsibility
//! - Define the records rendered by the public site and edited by the admin.
//! - Define payload drafts and their validation rules.
//! - Define collection ordering primitives shared by every orderable kind.
//!
//! # Invariants
//! - Every record is identified by a stable `RecordId`.
//! - Deletion is a hard delete; remaining `order` values are never renumbered.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod character;
pub mod experience;
pub mod ordering;
pub mod project;
pub mod skill;

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("valid link regex"));

/// Payload validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is blank after trim.
    BlankField(&'static str),
    /// Numeric field is outside its accepted range.
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    /// End date precedes start date.
    DateRange { start: i64, end: i64 },
    /// Link is not an absolute http(s) URL.
    InvalidLink(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "`{field}` must not be blank"),
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "`{field}` must be within {min}..={max}, got {value}"),
            Self::DateRange { start, end } => {
                write!(f, "end date {end} is earlier than start date {start}")
            }
            Self::InvalidLink(value) => write!(f, "invalid link `{value}`"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}

pub(crate) fn check_link(value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(link) if !LINK_RE.is_match(link) => Err(ValidationError::InvalidLink(link.to_string())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{check_link, require_text, ValidationError};

    #[test]
    fn require_text_rejects_whitespace() {
        assert_eq!(
            require_text("title", "  \n"),
            Err(ValidationError::BlankField("title"))
        );
        assert!(require_text("title", "Portfolio").is_ok());
    }

    #[test]
    fn check_link_accepts_http_urls_only() {
        assert!(check_link(None).is_ok());
        assert!(check_link(Some("https://github.com/someone/repo")).is_ok());
        assert!(check_link(Some("http://example.com")).is_ok());
        assert!(check_link(Some("github.com/someone")).is_err());
        assert!(check_link(Some("https://exa mple.com")).is_err());
    }
}
