//! Phase 5: completeness fallback.
//!
//! Every block still open, except the pair ids, goes to the first
//! instructor in input order that lists its id and does not already
//! occupy it. Quota is not checked here: coverage wins over quota, so
//! this is the one phase that can push an instructor above its expected
//! count. Blocks no instructor lists stay unassigned.

use tracing::debug;

use super::state::AssignmentState;
use super::Phase;
use crate::config::EngineConfig;

/// Assigns every coverable open block, ignoring quotas.
pub fn ensure_coverage(mut state: AssignmentState, config: &EngineConfig) -> AssignmentState {
    let pending: Vec<usize> = (0..state.blocks().len())
        .filter(|&b| state.owner(b).is_none() && !config.pair.contains(&state.blocks()[b].id))
        .collect();

    let mut uncovered = 0usize;
    for block in pending {
        let id = state.blocks()[block].id.clone();
        let candidate = (0..state.instructors().len()).find(|&idx| {
            state.instructors()[idx].is_available_for(&id) && !state.occupies(idx, &id)
        });

        match candidate {
            Some(instructor) => {
                state.assign(block, instructor, Phase::Fallback);
                debug!(
                    instructor = %state.instructors()[instructor].name,
                    block_id = %id,
                    "fallback assignment"
                );
            }
            None => {
                uncovered += 1;
                debug!(block_id = %id, "block cannot be covered");
            }
        }
    }

    if uncovered > 0 {
        debug!(uncovered, "blocks left without instructor");
    }

    state
}
