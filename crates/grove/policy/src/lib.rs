//! Grove Policy - authorization predicates
//!
//! Every mutating operation consults these checks before touching any
//! registry. They are stateless on purpose: role sets are fixed slices,
//! and the prerequisite fold is generic over a completion predicate so it
//! can be evaluated against any ledger view.

#![deny(unsafe_code)]

use grove_types::{MilestoneId, Role};

/// Roles allowed to create forests, milestones, and prerequisite edges.
pub const CURATOR_ROLES: [Role; 3] = [Role::Admin, Role::Educator, Role::Parent];

/// Roles allowed to link themselves to a child as guardian.
pub const GUARDIAN_ROLES: [Role; 2] = [Role::Educator, Role::Parent];

pub fn may_curate(role: Role) -> bool {
    CURATOR_ROLES.iter().any(|r| *r == role)
}

pub fn may_guard(role: Role) -> bool {
    GUARDIAN_ROLES.iter().any(|r| *r == role)
}

/// Whether every prerequisite is completed for the subject user.
///
/// Folds logical AND over the prerequisite set, short-circuiting on the
/// first unsatisfied entry. An empty set is vacuously satisfied.
pub fn prerequisites_satisfied<I, F>(prerequisites: I, mut completed: F) -> bool
where
    I: IntoIterator<Item = MilestoneId>,
    F: FnMut(MilestoneId) -> bool,
{
    prerequisites.into_iter().all(|p| completed(p))
}
