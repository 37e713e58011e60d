//! Assignment engine.
//!
//! Turns (instructors, blocks) into a roster through five phases run in
//! a fixed order over one [`AssignmentState`]. Each phase takes the state
//! by value and hands it to the next; later phases see exactly what the
//! earlier ones produced.
//!
//! | # | Phase | Quota respected | Touches pair ids |
//! |---|-------|-----------------|------------------|
//! | 1 | [`paired::allocate_pairs`] | yes | only phase that does |
//! | 2 | [`priority::allocate_priority`] | yes | no |
//! | 3 | [`tiered::allocate_tiers`] | yes | no |
//! | 4 | [`donation::redistribute`] | yes | no |
//! | 5 | [`fallback::ensure_coverage`] | **no** | no |
//!
//! Phase 5 overrides quotas on purpose so that every block someone can
//! cover ends up covered.
//!
//! A run is synchronous, deterministic and stateless: the same inputs
//! always produce the same roster, and nothing carries over between runs.

pub mod donation;
pub mod fallback;
pub mod paired;
pub mod priority;
mod state;
pub mod tiered;

pub use state::{AssignmentState, BlockIdx, InstructorIdx};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::AssignResult;
use crate::models::{parse_blocks, parse_instructors, Block, Instructor, Roster};
use crate::validation::validate_input;

/// Pipeline phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Paired-block allocation.
    Paired,
    /// Priority-instructor allocation.
    Priority,
    /// Tiered greedy allocation.
    Tiered,
    /// Redistribution from low-tier donors.
    Donation,
    /// Quota-unchecked coverage sweep.
    Fallback,
}

impl Phase {
    /// All phases in pipeline order.
    pub const ALL: [Phase; 5] = [
        Phase::Paired,
        Phase::Priority,
        Phase::Tiered,
        Phase::Donation,
        Phase::Fallback,
    ];

    /// Runs this phase.
    pub fn apply(self, state: AssignmentState, config: &EngineConfig) -> AssignmentState {
        match self {
            Phase::Paired => paired::allocate_pairs(state, config),
            Phase::Priority => priority::allocate_priority(state, config),
            Phase::Tiered => tiered::allocate_tiers(state, config),
            Phase::Donation => donation::redistribute(state, config),
            Phase::Fallback => fallback::ensure_coverage(state, config),
        }
    }

    /// Whether assignments made by this phase stay within quota.
    pub fn respects_quota(self) -> bool {
        self != Phase::Fallback
    }
}

/// Workshop-to-instructor assignment engine.
///
/// # Example
///
/// ```
/// use u_assign::config::EngineConfig;
/// use u_assign::engine::AssignmentEngine;
/// use u_assign::models::{Block, Instructor};
///
/// let instructors = vec![
///     Instructor::new("Ana").with_availability(["SA09", "SA11", "LU01"]).with_quota(3),
///     Instructor::new("Bruno").with_availability(["LU01", "MA02"]).with_quota(1),
/// ];
/// let blocks = vec![
///     Block::new("SA09").with_course("Física"),
///     Block::new("SA11").with_course("Física"),
///     Block::new("LU01").with_course("Química"),
///     Block::new("MA02").with_course("Biología"),
/// ];
///
/// let engine = AssignmentEngine::new(EngineConfig::new("SA09", "SA11")).unwrap();
/// let roster = engine.assign(&instructors, &blocks).unwrap();
///
/// assert_eq!(roster.instructor_for("SA09"), Some("Ana"));
/// assert_eq!(roster.instructor_for("SA11"), Some("Ana"));
/// assert!(roster.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct AssignmentEngine {
    config: EngineConfig,
}

impl AssignmentEngine {
    /// Creates an engine after validating the configuration.
    pub fn new(config: EngineConfig) -> AssignResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Assigns blocks to instructors.
    ///
    /// Fails only on malformed input (see [`validate_input`]). Blocks
    /// nobody can cover come back unassigned.
    pub fn assign(&self, instructors: &[Instructor], blocks: &[Block]) -> AssignResult<Roster> {
        validate_input(instructors, blocks)?;

        info!(
            instructors = instructors.len(),
            blocks = blocks.len(),
            "assignment run started"
        );

        let state = self.run(AssignmentState::new(instructors, blocks));
        let roster = state.into_roster();

        info!(
            assigned = roster.assigned_count(),
            unassigned = roster.unassigned_count(),
            "assignment run finished"
        );
        Ok(roster)
    }

    /// Decodes JSON wire records and assigns them.
    pub fn assign_json(&self, instructors_json: &str, blocks_json: &str) -> AssignResult<Roster> {
        let instructors = parse_instructors(instructors_json)?;
        let blocks = parse_blocks(blocks_json)?;
        self.assign(&instructors, &blocks)
    }

    /// Runs all phases over a prepared state.
    pub fn run(&self, state: AssignmentState) -> AssignmentState {
        self.run_observed(state, |_, _| {})
    }

    /// Runs all phases, calling `observer` after each one.
    pub fn run_observed<F>(&self, mut state: AssignmentState, mut observer: F) -> AssignmentState
    where
        F: FnMut(Phase, &AssignmentState),
    {
        for phase in Phase::ALL {
            let before = state.total_assigned();
            state = phase.apply(state, &self.config);
            debug!(
                ?phase,
                assigned_total = state.total_assigned(),
                delta = state.total_assigned() as i64 - before as i64,
                "phase complete"
            );
            observer(phase, &state);
        }
        state
    }
}
