//! Grove Forest - named collections that group milestones

#![deny(unsafe_code)]

use std::collections::HashMap;

use grove_types::{ForestId, UserId};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A named milestone collection. Immutable once written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forest {
    pub id: ForestId,
    pub name: String,
    pub description: String,
    pub creator: UserId,
    pub created_at: u64,
}

/// Registry with a strictly increasing id counter starting at 1.
pub struct ForestRegistry {
    forests: HashMap<ForestId, Forest>,
    next_id: u64,
}

impl ForestRegistry {
    pub fn new() -> Self {
        Self {
            forests: HashMap::new(),
            next_id: 1,
        }
    }

    /// Store a forest under the next id. Every call consumes one id;
    /// ids are never reused.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        creator: &UserId,
        height: u64,
    ) -> ForestId {
        let id = ForestId(self.next_id);

        let forest = Forest {
            id,
            name: name.into(),
            description: description.into(),
            creator: creator.clone(),
            created_at: height,
        };

        info!(forest = %id, creator = %creator, "Forest created");

        self.forests.insert(id, forest);
        self.next_id += 1;
        id
    }

    pub fn get(&self, id: ForestId) -> Option<&Forest> {
        self.forests.get(&id)
    }

    pub fn contains(&self, id: ForestId) -> bool {
        self.forests.contains_key(&id)
    }
}

impl Default for ForestRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut registry = ForestRegistry::new();
        let alice = UserId::new("alice");

        let first = registry.create("Math", "Numbers and counting", &alice, 1);
        let second = registry.create("Reading", "Letters and words", &alice, 2);

        assert_eq!(first, ForestId(1));
        assert_eq!(second, ForestId(2));
    }

    #[test]
    fn create_and_get() {
        let mut registry = ForestRegistry::new();
        let alice = UserId::new("alice");

        let id = registry.create("Math", "Numbers and counting", &alice, 9);

        let forest = registry.get(id).unwrap();
        assert_eq!(forest.name, "Math");
        assert_eq!(forest.creator, alice);
        assert_eq!(forest.created_at, 9);
        assert!(!registry.contains(ForestId(99)));
    }
}
