//! Grove Identity - user and role registry
//!
//! Identity is the foundation of every authorization decision: each
//! principal registers exactly once, and the role chosen at registration
//! is permanent.

#![deny(unsafe_code)]

use std::collections::HashMap;

use grove_types::{GroveError, Role, UserId};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A registered user. Immutable once written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub role: Role,
    /// Sequence height at which the record was created.
    pub registered_at: u64,
}

/// Registry holding one record per principal.
pub struct IdentityRegistry {
    users: HashMap<UserId, User>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
        }
    }

    /// Register a principal under the given role.
    ///
    /// A second registration for the same principal is rejected; the
    /// stored role never changes. The duplicate case reports
    /// `MilestoneAlreadyExists`, the code the wire contract fixed for it.
    pub fn register(
        &mut self,
        caller: &UserId,
        name: impl Into<String>,
        role: Role,
        height: u64,
    ) -> Result<User, GroveError> {
        if self.users.contains_key(caller) {
            return Err(GroveError::MilestoneAlreadyExists);
        }

        let user = User {
            id: caller.clone(),
            name: name.into(),
            role,
            registered_at: height,
        };

        info!(user = %caller, role = role.code(), "User registered");

        self.users.insert(caller.clone(), user.clone());
        Ok(user)
    }

    /// Look up a user record.
    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    /// Role of a registered user, if any.
    pub fn role_of(&self, id: &UserId) -> Option<Role> {
        self.users.get(id).map(|u| u.role)
    }
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let mut registry = IdentityRegistry::new();
        let alice = UserId::new("alice");

        registry.register(&alice, "Alice", Role::Parent, 7).unwrap();

        let user = registry.get(&alice).unwrap();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.role, Role::Parent);
        assert_eq!(user.registered_at, 7);
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut registry = IdentityRegistry::new();
        let alice = UserId::new("alice");

        registry.register(&alice, "Alice", Role::Parent, 1).unwrap();
        let err = registry
            .register(&alice, "Alice II", Role::Admin, 2)
            .unwrap_err();

        assert_eq!(err, GroveError::MilestoneAlreadyExists);
        // The original record survives untouched.
        let user = registry.get(&alice).unwrap();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.role, Role::Parent);
        assert_eq!(user.registered_at, 1);
    }

    #[test]
    fn unknown_user_has_no_role() {
        let registry = IdentityRegistry::new();
        assert_eq!(registry.role_of(&UserId::new("ghost")), None);
    }
}
