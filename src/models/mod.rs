//! Shared domain types for the fleet API.
//!
//! Entities in this service are deliberately opaque: the HTTP layer and the
//! repositories pass attribute sets through without imposing a schema. The
//! only structure this layer relies on is the numeric identifier used for
//! lookup, update, and delete.

use serde::{Deserialize, Serialize};

mod macros;

crate::define_id_type!(i64, AircraftId);
crate::define_id_type!(i64, TaskId);

/// Schema-less entity payload as received from (and returned to) clients.
///
/// A payload is a plain JSON object; its keys and value types are owned by
/// the data store, not by this layer.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Outcome of a mutating repository operation (update or delete).
///
/// The affected-row count distinguishes "not found" (0) from success (>0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResult {
    /// Number of rows the operation touched
    pub affected_rows: u64,
}

impl MutationResult {
    /// Create a result with the given affected-row count.
    pub fn new(affected_rows: u64) -> Self {
        Self { affected_rows }
    }

    /// A result that matched no rows.
    pub fn none() -> Self {
        Self::new(0)
    }

    /// True if the operation matched at least one row.
    pub fn matched_any(&self) -> bool {
        self.affected_rows > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_types_roundtrip_and_display() {
        let id = AircraftId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(AircraftId::from(42), id);
        assert_eq!(i64::from(id), 42);

        let task = TaskId::new(7);
        assert_eq!(task.to_string(), "7");
    }

    #[test]
    fn mutation_result_branching() {
        assert!(!MutationResult::none().matched_any());
        assert!(MutationResult::new(1).matched_any());
        assert_eq!(MutationResult::new(3).affected_rows, 3);
    }
}
