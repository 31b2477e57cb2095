use core::fmt;
use uuid::Uuid;

/// Stable identifier for a network entity (asset or node).
///
/// Entities are keyed by UUID so externally supplied names and
/// auto-generated ids share a single namespace.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Fresh random (v4) id for entities created without a name.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Domain-specific ID aliases for clarity (no runtime cost).
pub type AssetId = EntityId;
pub type NodeId = EntityId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_are_distinct() {
        let a = EntityId::new_random();
        let b = EntityId::new_random();
        assert_ne!(a, b);
    }

    #[test]
    fn uuid_round_trip() {
        let uuid = Uuid::new_v4();
        let id = EntityId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
        assert_eq!(format!("{id}"), uuid.to_string());
    }
}
