//! Shared identity for persisted entities

use serde::{Deserialize, Serialize};

/// Store-generated identifier shared by every entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(i64);

impl EntityId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Implemented by entities that embed an [`EntityId`].
///
/// An entity without an id has not been persisted yet. Two entities denote the
/// same record only when both carry the same id.
pub trait Identified {
    fn id(&self) -> Option<EntityId>;

    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }

    fn same_identity<O: Identified>(&self, other: &O) -> bool {
        matches!((self.id(), other.id()), (Some(a), Some(b)) if a == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(Option<EntityId>);

    impl Identified for Row {
        fn id(&self) -> Option<EntityId> {
            self.0
        }
    }

    #[test]
    fn test_entity_id_display() {
        assert_eq!(EntityId::new(42).to_string(), "42");
    }

    #[test]
    fn test_entity_id_serializes_as_number() {
        let json = serde_json::to_string(&EntityId::new(3)).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn test_same_identity_requires_both_ids() {
        let a = Row(Some(EntityId::new(1)));
        let b = Row(Some(EntityId::new(1)));
        let c = Row(Some(EntityId::new(2)));
        let unsaved = Row(None);

        assert!(a.same_identity(&b));
        assert!(!a.same_identity(&c));
        assert!(!unsaved.same_identity(&Row(None)));
        assert!(!unsaved.is_persisted());
    }
}
