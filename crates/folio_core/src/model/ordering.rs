//! Collection ordering primitives.
//!
//! # Responsibility
//! - Name the orderable collections and their backing tables.
//! - Validate reorder requests before they reach storage.
//! - Compute full-sequence assignments for a drag from index `from` to `to`.
//!
//! # Invariants
//! - Assigned `order` values are zero-based positions in the submitted sequence.
//! - A reorder request never carries the same id twice.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier shared by every persisted record.
pub type RecordId = Uuid;

/// `order` assigned when a create payload does not specify one.
pub const DEFAULT_ORDER: i64 = 0;

/// Orderable entity kinds. Each kind forms exactly one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Experiences,
    Skills,
    Projects,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Self::Experiences, Self::Skills, Self::Projects];

    /// Stable lowercase name used in logs and CLI arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Experiences => "experiences",
            Self::Skills => "skills",
            Self::Projects => "projects",
        }
    }

    /// Backing SQLite table.
    pub fn table_name(self) -> &'static str {
        self.as_str()
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown collection name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCollectionError(pub String);

impl Display for ParseCollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown collection `{}`; expected experiences|skills|projects",
            self.0
        )
    }
}

impl Error for ParseCollectionError {}

impl FromStr for Collection {
    type Err = ParseCollectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "experiences" | "experience" => Ok(Self::Experiences),
            "skills" | "skill" | "certifications" => Ok(Self::Skills),
            "projects" | "project" => Ok(Self::Projects),
            other => Err(ParseCollectionError(other.to_string())),
        }
    }
}

/// One `{id, order}` pair of a reorder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAssignment {
    pub id: RecordId,
    pub order: i64,
}

/// Common accessors for records that carry a display position.
pub trait Orderable {
    fn id(&self) -> RecordId;
    fn order(&self) -> i64;
    /// Short human-readable name (title or skill name).
    fn label(&self) -> &str;
}

/// Malformed reorder or move input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderingError {
    /// Reorder request carries no assignments.
    Empty,
    /// The same id appears more than once.
    DuplicateId(RecordId),
    /// Move source index does not address an element.
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for OrderingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "reorder request must not be empty"),
            Self::DuplicateId(id) => write!(f, "duplicate id in reorder request: {id}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is out of range for {len} record(s)")
            }
        }
    }
}

impl Error for OrderingError {}

/// Rejects empty requests and duplicate ids.
pub fn validate_assignments(assignments: &[OrderAssignment]) -> Result<(), OrderingError> {
    if assignments.is_empty() {
        return Err(OrderingError::Empty);
    }
    let mut seen = HashSet::with_capacity(assignments.len());
    for assignment in assignments {
        if !seen.insert(assignment.id) {
            return Err(OrderingError::DuplicateId(assignment.id));
        }
    }
    Ok(())
}

/// Assigns `order = index` to every id of an already arranged sequence.
pub fn assignments_from_sequence(ids: &[RecordId]) -> Vec<OrderAssignment> {
    ids.iter()
        .enumerate()
        .map(|(index, id)| OrderAssignment {
            id: *id,
            order: index as i64,
        })
        .collect()
}

/// Splices `ids[from]` into position `to` and renumbers the whole sequence.
///
/// `to` is clamped to the last position; `from` must address an element.
pub fn plan_move(
    ids: &[RecordId],
    from: usize,
    to: usize,
) -> Result<Vec<OrderAssignment>, OrderingError> {
    if from >= ids.len() {
        return Err(OrderingError::IndexOutOfRange {
            index: from,
            len: ids.len(),
        });
    }

    let mut sequence = ids.to_vec();
    let moved = sequence.remove(from);
    let target = to.min(sequence.len());
    sequence.insert(target, moved);
    Ok(assignments_from_sequence(&sequence))
}

#[cfg(test)]
mod tests {
    use super::{
        assignments_from_sequence, plan_move, validate_assignments, Collection, OrderAssignment,
        OrderingError, RecordId,
    };
    use uuid::Uuid;

    fn ids(count: usize) -> Vec<RecordId> {
        (0..count).map(|_| Uuid::new_v4()).collect()
    }

    fn order_of(assignments: &[OrderAssignment]) -> Vec<RecordId> {
        assignments.iter().map(|item| item.id).collect()
    }

    #[test]
    fn plan_move_forward_renumbers_full_sequence() {
        let seq = ids(4);
        let plan = plan_move(&seq, 0, 2).unwrap();

        assert_eq!(order_of(&plan), vec![seq[1], seq[2], seq[0], seq[3]]);
        let orders: Vec<i64> = plan.iter().map(|item| item.order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);
    }

    #[test]
    fn plan_move_backward_and_to_same_index() {
        let seq = ids(3);
        let plan = plan_move(&seq, 2, 0).unwrap();
        assert_eq!(order_of(&plan), vec![seq[2], seq[0], seq[1]]);

        let unchanged = plan_move(&seq, 1, 1).unwrap();
        assert_eq!(order_of(&unchanged), seq);
    }

    #[test]
    fn plan_move_clamps_target_and_rejects_bad_source() {
        let seq = ids(3);
        let plan = plan_move(&seq, 0, 99).unwrap();
        assert_eq!(order_of(&plan), vec![seq[1], seq[2], seq[0]]);

        let err = plan_move(&seq, 3, 0).unwrap_err();
        assert_eq!(err, OrderingError::IndexOutOfRange { index: 3, len: 3 });
    }

    #[test]
    fn validate_assignments_rejects_empty_and_duplicates() {
        assert_eq!(validate_assignments(&[]), Err(OrderingError::Empty));

        let id = Uuid::new_v4();
        let duplicated = vec![
            OrderAssignment { id, order: 0 },
            OrderAssignment { id, order: 1 },
        ];
        assert_eq!(
            validate_assignments(&duplicated),
            Err(OrderingError::DuplicateId(id))
        );

        let valid = assignments_from_sequence(&ids(2));
        assert!(validate_assignments(&valid).is_ok());
    }

    #[test]
    fn collection_parses_aliases() {
        assert_eq!("Projects".parse::<Collection>().unwrap(), Collection::Projects);
        assert_eq!(
            "certifications".parse::<Collection>().unwrap(),
            Collection::Skills
        );
        assert!("characters".parse::<Collection>().is_err());
    }
}
