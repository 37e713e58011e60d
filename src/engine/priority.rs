//! Phase 2: priority-instructor allocation.
//!
//! The configured priority instructor walks its own availability list
//! before anyone else competes for blocks, taking the first open block of
//! each id until its quota is met. Pair ids are skipped.

use tracing::{debug, warn};

use super::state::{AssignmentState, InstructorIdx};
use super::Phase;
use crate::config::EngineConfig;

/// Locates the priority instructor: the first whose name contains the
/// configured pattern.
pub fn locate(state: &AssignmentState, config: &EngineConfig) -> Option<InstructorIdx> {
    config
        .priority_name()
        .and_then(|pattern| state.find_instructor_containing(pattern))
}

/// Allocates blocks to the priority instructor.
pub fn allocate_priority(mut state: AssignmentState, config: &EngineConfig) -> AssignmentState {
    let Some(pattern) = config.priority_name() else {
        return state;
    };
    let Some(instructor) = state.find_instructor_containing(pattern) else {
        warn!(pattern, "priority instructor not found, phase skipped");
        return state;
    };

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
            state.assign(block, instructor, Phase::Priority);
        }
    }

    debug!(
        instructor = %state.instructors()[instructor].name,
        assigned = state.assigned_count(instructor),
        quota,
        "priority instructor allocated"
    );

    state
}
