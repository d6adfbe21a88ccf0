//! Grove Service - the unified authority boundary
//!
//! Every mutating operation passes through here: the caller's role or
//! relationship is checked first, referenced entities are resolved next,
//! structural invariants after that, and only then is the single record
//! written. Read accessors bypass authorization and return snapshots.
//!
//! The substrate serializes calls, so the service is a single-writer
//! state machine: each operation runs to completion against `&mut self`
//! and either commits its one write or returns exactly one error code
//! with nothing changed.

#![deny(unsafe_code)]

use grove_forest::{Forest, ForestRegistry};
use grove_graph::{Milestone, MilestoneGraph, PrerequisiteEdge};
use grove_guardianship::{Relationship, RelationshipRegistry};
use grove_identity::{IdentityRegistry, User};
use grove_ledger::{Completion, CompletionLedger};
use grove_types::{ForestId, GroveError, MilestoneId, RelationshipKind, Role, UserId};
use tracing::info;

/// The milestone progress engine.
///
/// `owner` is the platform operator principal fixed at construction; it
/// may verify completions for any child without a stored relationship.
pub struct GroveService {
    owner: UserId,
    pub identity: IdentityRegistry,
    pub guardianship: RelationshipRegistry,
    pub forests: ForestRegistry,
    pub graph: MilestoneGraph,
    pub ledger: CompletionLedger,
}

impl GroveService {
    pub fn new(owner: UserId) -> Self {
        Self {
            owner,
            identity: IdentityRegistry::new(),
            guardianship: RelationshipRegistry::new(),
            forests: ForestRegistry::new(),
            graph: MilestoneGraph::new(),
            ledger: CompletionLedger::new(),
        }
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    // ============ Identity Operations ============

    /// Register the caller under a wire-format role code.
    pub fn register(
        &mut self,
        caller: &UserId,
        name: &str,
        role_code: u8,
        height: u64,
    ) -> Result<User, GroveError> {
        let role = Role::from_code(role_code).ok_or(GroveError::InvalidUserRole)?;
        let user = self.identity.register(caller, name, role, height)?;
        info!(user = %user.id, "User registered in Grove");
        Ok(user)
    }

    // ============ Relationship Operations ============

    /// Link the caller as guardian of a registered child.
    pub fn create_relationship(
        &mut self,
        caller: &UserId,
        child: &UserId,
        kind: &str,
        height: u64,
    ) -> Result<Relationship, GroveError> {
        let role = self
            .identity
            .role_of(caller)
            .ok_or(GroveError::UserNotFound)?;
        if !grove_policy::may_guard(role) {
            return Err(GroveError::NotAuthorized);
        }
        if self.identity.role_of(child) != Some(Role::Child) {
            return Err(GroveError::ChildNotRegistered);
        }
        let kind = RelationshipKind::from_label(kind).ok_or(GroveError::InvalidParameters)?;

        self.guardianship.link(caller, child, kind, height)
    }

    // ============ Forest Operations ============

    pub fn create_forest(
        &mut self,
        caller: &UserId,
        name: &str,
        description: &str,
        height: u64,
    ) -> Result<ForestId, GroveError> {
        self.require_curator(caller)?;
        Ok(self.forests.create(name, description, caller, height))
    }

    // ============ Milestone Operations ============

    #[allow(clippy::too_many_arguments)]
    pub fn create_milestone(
        &mut self,
        caller: &UserId,
        title: &str,
        description: &str,
        category: &str,
        difficulty: u8,
        forest: ForestId,
        parent: Option<MilestoneId>,
        height: u64,
    ) -> Result<MilestoneId, GroveError> {
        self.require_curator(caller)?;
        if !self.forests.contains(forest) {
            return Err(GroveError::ForestNotFound);
        }
        self.graph.create(
            title,
            description,
            category,
            difficulty,
            forest,
            parent,
            caller,
            height,
        )
    }

    pub fn add_prerequisite(
        &mut self,
        caller: &UserId,
        milestone: MilestoneId,
        prerequisite: MilestoneId,
        height: u64,
    ) -> Result<(), GroveError> {
        self.require_curator(caller)?;
        self.graph
            .link_prerequisite(milestone, prerequisite, caller, height)
    }

    // ============ Completion Operations ============

    /// Record a completion for `child`, verified by the caller.
    ///
    /// The caller must be the service owner or hold a stored relationship
    /// to the child. The owner bypass is the platform operator's escape
    /// hatch and needs no registration.
    pub fn complete(
        &mut self,
        caller: &UserId,
        milestone: MilestoneId,
        child: &UserId,
        evidence: Option<String>,
        height: u64,
    ) -> Result<Completion, GroveError> {
        if caller != &self.owner && !self.guardianship.exists(caller, child) {
            return Err(GroveError::NotAuthorized);
        }
        self.record_completion(caller, milestone, child, evidence, height)
    }

    /// Record a completion for the caller itself.
    pub fn self_complete(
        &mut self,
        caller: &UserId,
        milestone: MilestoneId,
        evidence: Option<String>,
        height: u64,
    ) -> Result<Completion, GroveError> {
        let role = self
            .identity
            .role_of(caller)
            .ok_or(GroveError::UserNotFound)?;
        if role != Role::Child {
            return Err(GroveError::InvalidUserRole);
        }
        let subject = caller.clone();
        self.record_completion(caller, milestone, &subject, evidence, height)
    }

    // ============ Read Accessors ============

    pub fn get_user(&self, id: &UserId) -> Option<User> {
        self.identity.get(id).cloned()
    }

    pub fn get_relationship(&self, guardian: &UserId, child: &UserId) -> Option<Relationship> {
        self.guardianship.get(guardian, child).cloned()
    }

    pub fn get_forest(&self, id: ForestId) -> Option<Forest> {
        self.forests.get(id).cloned()
    }

    pub fn get_milestone(&self, id: MilestoneId) -> Option<Milestone> {
        self.graph.get(id).cloned()
    }

    pub fn prerequisites_of(&self, milestone: MilestoneId) -> Vec<PrerequisiteEdge> {
        self.graph
            .prerequisites_of(milestone)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn is_completed(&self, milestone: MilestoneId, user: &UserId) -> bool {
        self.ledger.is_completed(milestone, user)
    }

    pub fn get_completion(&self, milestone: MilestoneId, user: &UserId) -> Option<Completion> {
        self.ledger.get(milestone, user).cloned()
    }

    // ============ Internal ============

    /// Resolve the caller and require a curating role.
    fn require_curator(&self, caller: &UserId) -> Result<Role, GroveError> {
        let role = self
            .identity
            .role_of(caller)
            .ok_or(GroveError::UserNotFound)?;
        if !grove_policy::may_curate(role) {
            return Err(GroveError::NotAuthorized);
        }
        Ok(role)
    }

    /// Shared tail of `complete` and `self_complete`: existence, terminal
    /// uniqueness, and the prerequisite fold, then the single write.
    fn record_completion(
        &mut self,
        verifier: &UserId,
        milestone: MilestoneId,
        subject: &UserId,
        evidence: Option<String>,
        height: u64,
    ) -> Result<Completion, GroveError> {
        if !self.graph.contains(milestone) {
            return Err(GroveError::MilestoneNotFound);
        }
        if self.ledger.is_completed(milestone, subject) {
            return Err(GroveError::MilestoneAlreadyCompleted);
        }

        let prerequisites: Vec<MilestoneId> = self
            .graph
            .prerequisites_of(milestone)
            .into_iter()
            .map(|edge| edge.prerequisite)
            .collect();
        if !grove_policy::prerequisites_satisfied(prerequisites, |p| {
            self.ledger.is_completed(p, subject)
        }) {
            return Err(GroveError::PrerequisitesNotCompleted);
        }

        self.ledger
            .record(milestone, subject, verifier, evidence, height)
    }
}
