//! Grove Ledger - immutable completion records
//!
//! One completion per (milestone, user) pair, attributed to the verifying
//! identity. Completion is terminal: records are never overwritten and
//! never removed.

#![deny(unsafe_code)]

use std::collections::HashMap;

use grove_types::{GroveError, MilestoneId, UserId};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Proof that a user finished a milestone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub milestone: MilestoneId,
    pub user: UserId,
    /// Who vouched for the completion: a guardian, the platform operator,
    /// or the user itself.
    pub verifier: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    pub completed_at: u64,
}

/// Ledger keyed by (milestone, user).
pub struct CompletionLedger {
    completions: HashMap<(MilestoneId, UserId), Completion>,
}

impl CompletionLedger {
    pub fn new() -> Self {
        Self {
            completions: HashMap::new(),
        }
    }

    /// Record a completion. A second record for the same pair is rejected,
    /// leaving the first untouched.
    pub fn record(
        &mut self,
        milestone: MilestoneId,
        user: &UserId,
        verifier: &UserId,
        evidence: Option<String>,
        height: u64,
    ) -> Result<Completion, GroveError> {
        let key = (milestone, user.clone());
        if self.completions.contains_key(&key) {
            return Err(GroveError::MilestoneAlreadyCompleted);
        }

        let completion = Completion {
            milestone,
            user: user.clone(),
            verifier: verifier.clone(),
            evidence,
            completed_at: height,
        };

        info!(milestone = %milestone, user = %user, verifier = %verifier, "Completion recorded");

        self.completions.insert(key, completion.clone());
        Ok(completion)
    }

    pub fn is_completed(&self, milestone: MilestoneId, user: &UserId) -> bool {
        self.completions.contains_key(&(milestone, user.clone()))
    }

    pub fn get(&self, milestone: MilestoneId, user: &UserId) -> Option<&Completion> {
        self.completions.get(&(milestone, user.clone()))
    }
}

impl Default for CompletionLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_read_back() {
        let mut ledger = CompletionLedger::new();
        let bob = UserId::new("bob");
        let alice = UserId::new("alice");

        ledger
            .record(MilestoneId(1), &bob, &alice, Some("photo.jpg".into()), 12)
            .unwrap();

        assert!(ledger.is_completed(MilestoneId(1), &bob));
        let completion = ledger.get(MilestoneId(1), &bob).unwrap();
        assert_eq!(completion.verifier, alice);
        assert_eq!(completion.evidence.as_deref(), Some("photo.jpg"));
        assert_eq!(completion.completed_at, 12);
    }

    #[test]
    fn second_record_rejected_and_first_preserved() {
        let mut ledger = CompletionLedger::new();
        let bob = UserId::new("bob");
        let alice = UserId::new("alice");

        ledger.record(MilestoneId(1), &bob, &alice, None, 5).unwrap();
        let err = ledger
            .record(MilestoneId(1), &bob, &bob, Some("later.jpg".into()), 9)
            .unwrap_err();

        assert_eq!(err, GroveError::MilestoneAlreadyCompleted);
        let completion = ledger.get(MilestoneId(1), &bob).unwrap();
        assert_eq!(completion.verifier, alice);
        assert_eq!(completion.evidence, None);
        assert_eq!(completion.completed_at, 5);
    }

    #[test]
    fn pairs_are_independent() {
        let mut ledger = CompletionLedger::new();
        let bob = UserId::new("bob");
        let carol = UserId::new("carol");
        let alice = UserId::new("alice");

        ledger.record(MilestoneId(1), &bob, &alice, None, 1).unwrap();

        assert!(!ledger.is_completed(MilestoneId(1), &carol));
        assert!(!ledger.is_completed(MilestoneId(2), &bob));
    }

    #[test]
    fn absent_evidence_is_omitted_from_wire_form() {
        let completion = Completion {
            milestone: MilestoneId(3),
            user: UserId::new("bob"),
            verifier: UserId::new("bob"),
            evidence: None,
            completed_at: 4,
        };

        let json = serde_json::to_string(&completion).unwrap();
        assert!(!json.contains("evidence"));
    }
}
