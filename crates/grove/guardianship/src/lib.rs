//! Grove Guardianship - directed guardian-to-child links
//!
//! A relationship authorizes a guardian (parent or educator) to verify
//! completions on behalf of a child. Links are directed and never
//! mirrored: authorization queries always go guardian to child.

#![deny(unsafe_code)]

use std::collections::HashMap;

use grove_types::{GroveError, RelationshipKind, UserId};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A stored guardian-to-child link. Immutable once written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub guardian: UserId,
    pub child: UserId,
    pub kind: RelationshipKind,
    pub linked_at: u64,
}

/// Registry keyed by the ordered (guardian, child) pair.
pub struct RelationshipRegistry {
    relationships: HashMap<(UserId, UserId), Relationship>,
}

impl RelationshipRegistry {
    pub fn new() -> Self {
        Self {
            relationships: HashMap::new(),
        }
    }

    /// Store a link. At most one link per ordered pair.
    pub fn link(
        &mut self,
        guardian: &UserId,
        child: &UserId,
        kind: RelationshipKind,
        height: u64,
    ) -> Result<Relationship, GroveError> {
        let key = (guardian.clone(), child.clone());
        if self.relationships.contains_key(&key) {
            return Err(GroveError::DuplicateRelationship);
        }

        let relationship = Relationship {
            guardian: guardian.clone(),
            child: child.clone(),
            kind,
            linked_at: height,
        };

        info!(guardian = %guardian, child = %child, kind = %kind, "Relationship linked");

        self.relationships.insert(key, relationship.clone());
        Ok(relationship)
    }

    /// Look up the link for an ordered pair.
    pub fn get(&self, guardian: &UserId, child: &UserId) -> Option<&Relationship> {
        self.relationships
            .get(&(guardian.clone(), child.clone()))
    }

    /// Whether a link exists for the ordered pair.
    pub fn exists(&self, guardian: &UserId, child: &UserId) -> bool {
        self.get(guardian, child).is_some()
    }
}

impl Default for RelationshipRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_and_get() {
        let mut registry = RelationshipRegistry::new();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        registry
            .link(&alice, &bob, RelationshipKind::ParentChild, 3)
            .unwrap();

        let rel = registry.get(&alice, &bob).unwrap();
        assert_eq!(rel.kind, RelationshipKind::ParentChild);
        assert_eq!(rel.linked_at, 3);
    }

    #[test]
    fn duplicate_pair_rejected() {
        let mut registry = RelationshipRegistry::new();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        registry
            .link(&alice, &bob, RelationshipKind::ParentChild, 1)
            .unwrap();
        let err = registry
            .link(&alice, &bob, RelationshipKind::EducatorChild, 2)
            .unwrap_err();

        assert_eq!(err, GroveError::DuplicateRelationship);
        // First link unchanged.
        assert_eq!(
            registry.get(&alice, &bob).unwrap().kind,
            RelationshipKind::ParentChild
        );
    }

    #[test]
    fn links_are_not_mirrored() {
        let mut registry = RelationshipRegistry::new();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        registry
            .link(&alice, &bob, RelationshipKind::EducatorChild, 1)
            .unwrap();

        assert!(registry.exists(&alice, &bob));
        assert!(!registry.exists(&bob, &alice));
    }
}
