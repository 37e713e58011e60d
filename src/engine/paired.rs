//! Phase 1: paired-block allocation.
//!
//! The two configured pair ids must go to the same instructor. Free
//! blocks of each id are matched up in input order, and each match goes
//! to the next eligible instructor (available for both ids, at least two
//! quota units left, not already given a pair). Allocated pair blocks are
//! protected from every later phase. A pair that cannot be placed stays
//! unassigned; no later phase will split it.

use std::collections::VecDeque;

use tracing::{debug, warn};

use super::state::AssignmentState;
use super::Phase;
use crate::config::EngineConfig;

/// Allocates paired blocks.
pub fn allocate_pairs(mut state: AssignmentState, config: &EngineConfig) -> AssignmentState {
    let pair = &config.pair;

    let mut free_first: VecDeque<usize> = state.open_blocks(&pair.first).collect();
    let mut free_second: VecDeque<usize> = state.open_blocks(&pair.second).collect();

    let eligible: Vec<usize> = state
        .instructors()
        .iter()
        .enumerate()
        .filter(|(_, i)| i.is_available_for(&pair.first) && i.is_available_for(&pair.second))
        .map(|(idx, _)| idx)
        .collect();

    let mut served: Vec<usize> = Vec::new();

    for instructor in eligible {
        if state.remaining_quota(instructor) < 2 || served.contains(&instructor) {
            continue;
        }

        let (Some(first), Some(second)) = (free_first.pop_front(), free_second.pop_front()) else {
            break;
        };

        state.assign(first, instructor, Phase::Paired);
        state.assign(second, instructor, Phase::Paired);
        state.protect(first);
        state.protect(second);
        served.push(instructor);

        debug!(
            instructor = %state.instructors()[instructor].name,
            first = %pair.first,
            second = %pair.second,
            "pair allocated"
        );
    }

    if !free_first.is_empty() && !free_second.is_empty() {
        warn!(
            first = %pair.first,
            second = %pair.second,
            remaining = free_first.len().min(free_second.len()),
            "paired blocks left unassigned, no eligible instructor"
        );
    }

    state
}
