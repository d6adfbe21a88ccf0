//! Grove Graph - milestone nodes and prerequisite edges
//!
//! Milestones form two separate structures: a display tree (the optional
//! parent link, used only for nesting) and the prerequisite edge set that
//! gates completion. The edge set is keyed by ordered pair; self-loops
//! are rejected, but longer cycles are representable and are not
//! detected here.

#![deny(unsafe_code)]

use std::collections::HashMap;

use grove_types::{ForestId, GroveError, MilestoneId, UserId};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A learning objective node. Immutable once written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: MilestoneId,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Difficulty rating, 1 through 5.
    pub difficulty: u8,
    pub forest: ForestId,
    /// Display nesting only; not a prerequisite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<MilestoneId>,
    pub creator: UserId,
    pub created_at: u64,
}

/// A directed requirement: `prerequisite` must be completed before
/// `milestone`, per user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteEdge {
    pub milestone: MilestoneId,
    pub prerequisite: MilestoneId,
    pub linked_by: UserId,
    pub linked_at: u64,
}

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 5;

/// Milestone store plus the prerequisite edge set, with a strictly
/// increasing milestone id counter starting at 1.
pub struct MilestoneGraph {
    milestones: HashMap<MilestoneId, Milestone>,
    prerequisites: HashMap<(MilestoneId, MilestoneId), PrerequisiteEdge>,
    next_id: u64,
}

impl MilestoneGraph {
    pub fn new() -> Self {
        Self {
            milestones: HashMap::new(),
            prerequisites: HashMap::new(),
            next_id: 1,
        }
    }

    /// Store a milestone under the next id.
    ///
    /// The owning forest is validated by the caller; the parent link, when
    /// supplied, must resolve here at creation time.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        difficulty: u8,
        forest: ForestId,
        parent: Option<MilestoneId>,
        creator: &UserId,
        height: u64,
    ) -> Result<MilestoneId, GroveError> {
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(GroveError::InvalidParameters);
        }
        if let Some(parent_id) = parent {
            if !self.milestones.contains_key(&parent_id) {
                return Err(GroveError::ParentMilestoneNotFound);
            }
        }

        let id = MilestoneId(self.next_id);

        let milestone = Milestone {
            id,
            title: title.into(),
            description: description.into(),
            category: category.into(),
            difficulty,
            forest,
            parent,
            creator: creator.clone(),
            created_at: height,
        };

        info!(milestone = %id, forest = %forest, creator = %creator, "Milestone created");

        self.milestones.insert(id, milestone);
        self.next_id += 1;
        Ok(id)
    }

    /// Store a prerequisite edge keyed by the ordered pair.
    ///
    /// Both endpoints must exist and self-loops are rejected. Re-linking
    /// an existing pair overwrites the stamp rather than failing; cycles
    /// across longer chains are not checked.
    pub fn link_prerequisite(
        &mut self,
        milestone: MilestoneId,
        prerequisite: MilestoneId,
        linked_by: &UserId,
        height: u64,
    ) -> Result<(), GroveError> {
        if !self.milestones.contains_key(&milestone)
            || !self.milestones.contains_key(&prerequisite)
        {
            return Err(GroveError::MilestoneNotFound);
        }
        if milestone == prerequisite {
            return Err(GroveError::InvalidParameters);
        }

        let edge = PrerequisiteEdge {
            milestone,
            prerequisite,
            linked_by: linked_by.clone(),
            linked_at: height,
        };

        info!(milestone = %milestone, prerequisite = %prerequisite, "Prerequisite linked");

        self.prerequisites.insert((milestone, prerequisite), edge);
        Ok(())
    }

    pub fn get(&self, id: MilestoneId) -> Option<&Milestone> {
        self.milestones.get(&id)
    }

    pub fn contains(&self, id: MilestoneId) -> bool {
        self.milestones.contains_key(&id)
    }

    /// All edges gating the given milestone, ordered by prerequisite id.
    pub fn prerequisites_of(&self, milestone: MilestoneId) -> Vec<&PrerequisiteEdge> {
        let mut edges: Vec<_> = self
            .prerequisites
            .values()
            .filter(|e| e.milestone == milestone)
            .collect();
        edges.sort_by_key(|e| e.prerequisite);
        edges
    }
}

impl Default for MilestoneGraph {
    fn default() -> Self {
        Self::new()
    }
}
