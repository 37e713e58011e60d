//! Phase 3: tiered greedy allocation.
//!
//! # Algorithm
//!
//! 1. Split every instructor except the priority instructor into load
//!    tiers by expected quota (see [`TierThresholds`]).
//! 2. Order the high and medium tiers by quota descending, the low tier
//!    by quota ascending. Ties keep input order.
//! 3. Tier by tier, each instructor walks its availability list and takes
//!    the first open block of each id it does not already occupy, skipping
//!    pair ids, until its quota is met.
//!
//! Heavy instructors pick first from contested slots. The low tier goes
//! lightest-first so its members are the ones most likely to hold blocks
//! the donation phase can move.
//!
//! # Complexity
//! O(n * a * k) where n=instructors, a=availability length, k=blocks per id.

use tracing::debug;

use super::priority;
use super::state::{AssignmentState, InstructorIdx};
use super::Phase;
use crate::config::{EngineConfig, TierThresholds};

/// Load tier of an instructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    /// `quota >= high`.
    High,
    /// `medium <= quota < high`.
    Medium,
    /// `quota < medium`.
    Low,
}

impl TierThresholds {
    /// Classifies a quota.
    pub fn classify(&self, quota: u32) -> Tier {
        if quota >= self.high {
            Tier::High
        } else if quota >= self.medium {
            Tier::Medium
        } else {
            Tier::Low
        }
    }
}

/// Instructors split by tier, each list in allocation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tiers {
    pub high: Vec<InstructorIdx>,
    pub medium: Vec<InstructorIdx>,
    pub low: Vec<InstructorIdx>,
}

impl Tiers {
    /// Partitions all instructors except `excluded` and sorts each tier.
    pub fn partition(
        state: &AssignmentState,
        thresholds: &TierThresholds,
        excluded: Option<InstructorIdx>,
    ) -> Self {
        let mut tiers = Tiers::default();
        for (idx, instructor) in state.instructors().iter().enumerate() {
            if Some(idx) == excluded {
                continue;
            }
            match thresholds.classify(instructor.expected_quota) {
                Tier::High => tiers.high.push(idx),
                Tier::Medium => tiers.medium.push(idx),
                Tier::Low => tiers.low.push(idx),
            }
        }

        let quota = |idx: &InstructorIdx| state.instructors()[*idx].expected_quota;
        // Stable sorts: equal quotas keep input order.
        tiers.high.sort_by_key(|idx| std::cmp::Reverse(quota(idx)));
        tiers.medium.sort_by_key(|idx| std::cmp::Reverse(quota(idx)));
        tiers.low.sort_by_key(quota);
        tiers
    }

    /// Tiers in allocation order.
    pub fn in_order(&self) -> [(Tier, &[InstructorIdx]); 3] {
        [
            (Tier::High, self.high.as_slice()),
            (Tier::Medium, self.medium.as_slice()),
            (Tier::Low, self.low.as_slice()),
        ]
    }
}

/// Runs the greedy allocation over all three tiers.
pub fn allocate_tiers(mut state: AssignmentState, config: &EngineConfig) -> AssignmentState {
    let excluded = priority::locate(&state, config);
    let tiers = Tiers::partition(&state, &config.tiers, excluded);

    for (tier, members) in tiers.in_order() {
        let before = state.total_assigned();
        for &instructor in members {
            fill_to_quota(&mut state, instructor, config);
        }
        debug!(
            ?tier,
            instructors = members.len(),
            assigned = state.total_assigned() - before,
            "tier allocated"
        );
    }

    state
}

/// Walks one instructor's availability until its quota is met.
fn fill_to_quota(state: &mut AssignmentState, instructor: InstructorIdx, config: &EngineConfig) {
    let quota = state.instructors()[instructor].expected_quota;
    let available = state.instructors()[instructor].available_block_ids.clone();

    for block_id in &available {
        if state.assigned_count(instructor) >= quota {
            break;
        }
        if state.occupies(instructor, block_id) || config.pair.contains(block_id) {
            continue;
        }
        if let Some(block) = state.first_open_block(block_id) {
            state.assign(block, instructor, Phase::Tiered);
        }
    }
}
