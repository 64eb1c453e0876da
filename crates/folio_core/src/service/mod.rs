//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Map storage failures onto the `NotFound` / `InvalidArgument` /
//!   `StoreUnavailable` taxonomy callers act on.

use crate::model::ordering::{OrderingError, RecordId};
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod character_service;
pub mod collection_service;

pub type ContentResult<T> = Result<T, ContentError>;

/// Errors surfaced to content callers. Never retried inside the service.
#[derive(Debug)]
pub enum ContentError {
    /// Referenced record does not exist at mutation time.
    NotFound(RecordId),
    /// Malformed input: failed draft validation, empty or duplicate reorder.
    InvalidArgument(String),
    /// The store could not complete the operation.
    StoreUnavailable(RepoError),
}

impl Display for ContentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::StoreUnavailable(err) => write!(f, "store unavailable: {err}"),
        }
    }
}

impl Error for ContentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StoreUnavailable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ContentError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::InvalidArgument(err.to_string()),
            other => Self::StoreUnavailable(other),
        }
    }
}

impl From<OrderingError> for ContentError {
    fn from(value: OrderingError) -> Self {
        Self::InvalidArgument(value.to_string())
    }
}
