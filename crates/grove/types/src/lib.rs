//! Grove Types - identifiers, roles, and the error taxonomy
#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque principal identifier supplied by the ledger substrate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);
impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}
impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ForestId(pub u64);
impl std::fmt::Display for ForestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MilestoneId(pub u64);
impl std::fmt::Display for MilestoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registered role of a user. Fixed at registration, never changed.
///
/// The numeric codes are the wire format the substrate submits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Parent,
    Educator,
    Child,
}

impl Role {
    /// Parse a wire-format role code. Valid codes are 1 through 4.
    pub fn from_code(code: u8) -> Option<Role> {
        match code {
            1 => Some(Role::Admin),
            2 => Some(Role::Parent),
            3 => Some(Role::Educator),
            4 => Some(Role::Child),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Role::Admin => 1,
            Role::Parent => 2,
            Role::Educator => 3,
            Role::Child => 4,
        }
    }
}

/// Kind of guardian-to-child link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    ParentChild,
    EducatorChild,
}

impl RelationshipKind {
    /// Parse the wire-format label. Anything else is rejected as
    /// `InvalidParameters` at the boundary.
    pub fn from_label(label: &str) -> Option<RelationshipKind> {
        match label {
            "parent-child" => Some(RelationshipKind::ParentChild),
            "educator-child" => Some(RelationshipKind::EducatorChild),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RelationshipKind::ParentChild => "parent-child",
            RelationshipKind::EducatorChild => "educator-child",
        }
    }
}

impl std::fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The complete error taxonomy of the engine.
///
/// One fixed code per failing condition; every operation either commits
/// fully or returns exactly one of these with nothing written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GroveError {
    #[error("not authorized")]
    NotAuthorized,

    #[error("user not found")]
    UserNotFound,

    #[error("milestone not found")]
    MilestoneNotFound,

    /// Also returned for duplicate user registration.
    #[error("milestone already exists")]
    MilestoneAlreadyExists,

    #[error("forest not found")]
    ForestNotFound,

    /// Reserved; not produced by the current operation set.
    #[error("forest already exists")]
    ForestAlreadyExists,

    #[error("parent milestone not found")]
    ParentMilestoneNotFound,

    #[error("milestone already completed")]
    MilestoneAlreadyCompleted,

    #[error("prerequisites not completed")]
    PrerequisitesNotCompleted,

    #[error("invalid parameters")]
    InvalidParameters,

    #[error("invalid user role")]
    InvalidUserRole,

    #[error("child not registered")]
    ChildNotRegistered,

    #[error("duplicate relationship")]
    DuplicateRelationship,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_codes_round_trip() {
        for code in 1..=4u8 {
            let role = Role::from_code(code).unwrap();
            assert_eq!(role.code(), code);
        }
    }

    #[test]
    fn role_codes_out_of_range_rejected() {
        assert_eq!(Role::from_code(0), None);
        assert_eq!(Role::from_code(5), None);
        assert_eq!(Role::from_code(255), None);
    }

    #[test]
    fn relationship_kind_labels_round_trip() {
        for kind in [RelationshipKind::ParentChild, RelationshipKind::EducatorChild] {
            assert_eq!(RelationshipKind::from_label(kind.label()), Some(kind));
        }
        assert_eq!(RelationshipKind::from_label("sibling"), None);
        assert_eq!(RelationshipKind::from_label(""), None);
    }

    #[test]
    fn error_codes_serialize_as_bare_codes() {
        let json = serde_json::to_string(&GroveError::PrerequisitesNotCompleted).unwrap();
        assert_eq!(json, "\"PrerequisitesNotCompleted\"");
    }
}
