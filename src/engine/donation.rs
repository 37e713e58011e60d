//! Phase 4: redistribution (donation).
//!
//! Instructors with a medium-or-higher quota still short after the greedy
//! phase pull blocks from the low tier. For each missing unit the low tier
//! is searched from the start, in allocation order, for a donor that holds
//! a block the recipient is available for, does not already occupy, and
//! that is not a pair id. The first such block moves to the recipient.
//!
//! Donor selection is first-match, not minimal-disruption. A donor may
//! drop below its own quota.

use tracing::debug;

use super::priority;
use super::state::{AssignmentState, BlockIdx, InstructorIdx};
use super::tiered::Tiers;
use super::Phase;
use crate::config::EngineConfig;

/// A block a donor can hand over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Donation {
    pub donor: InstructorIdx,
    pub block: BlockIdx,
}

/// Moves blocks from low-tier donors to incomplete instructors.
pub fn redistribute(mut state: AssignmentState, config: &EngineConfig) -> AssignmentState {
    let excluded = priority::locate(&state, config);
    let donors = Tiers::partition(&state, &config.tiers, excluded).low;

    let incomplete: Vec<InstructorIdx> = (0..state.instructors().len())
        .filter(|&i| {
            let quota = state.instructors()[i].expected_quota;
            quota >= config.tiers.medium && state.assigned_count(i) < quota
        })
        .collect();

    for recipient in incomplete {
        let missing = state.remaining_quota(recipient);
        // A failed search leaves the state unchanged, so later units would fail too.
        for _ in 0..missing {
            let Some(donation) = find_donation(&state, &donors, recipient, config) else {
                break;
            };
            if !state.transfer(donation.block, recipient, Phase::Donation) {
                debug!(block = donation.block, "matched block is protected, donation skipped");
                break;
            }
            debug!(
                donor = %state.instructors()[donation.donor].name,
                recipient = %state.instructors()[recipient].name,
                block_id = %state.blocks()[donation.block].id,
                "block donated"
            );
        }
    }

    state
}

/// Finds the first block a donor can give to `recipient`.
pub fn find_donation(
    state: &AssignmentState,
    donors: &[InstructorIdx],
    recipient: InstructorIdx,
    config: &EngineConfig,
) -> Option<Donation> {
    let wanted = &state.instructors()[recipient];

    donors.iter().copied().find_map(|donor| {
        state
            .held_blocks(donor)
            .find(|&block| {
                let id = state.blocks()[block].id.as_str();
                wanted.is_available_for(id)
                    && !state.occupies(recipient, id)
                    && !config.pair.contains(id)
            })
            .map(|block| Donation { donor, block })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Block, Instructor};

    fn config() -> EngineConfig {
        EngineConfig::new("SA09", "SA11")
    }

    #[test]
    fn test_donor_gives_matching_block() {
        let instructors = vec![
            Instructor::new("heavy").with_availability(["LU01", "MA02"]).with_quota(10),
            Instructor::new("light").with_availability(["MA02"]).with_quota(1),
        ];
        let blocks = vec![Block::new("LU01"), Block::new("MA02")];
        let mut state = AssignmentState::new(&instructors, &blocks);
        state.assign(0, 0, Phase::Tiered);
        state.assign(1, 1, Phase::Tiered);

        let state = redistribute(state, &config());
        assert_eq!(state.owner(1), Some(0));
        assert_eq!(state.provenance(1), Some(Phase::Donation));
        assert_eq!(state.assigned_count(0), 2);
        assert_eq!(state.assigned_count(1), 0);
    }

    #[test]
    fn test_no_donation_without_matching_block() {
        let instructors = vec![
            Instructor::new("heavy").with_availability(["LU01"]).with_quota(6),
            Instructor::new("light").with_availability(["LU01", "MA02"]).with_quota(1),
        ];
        let blocks = vec![Block::new("LU01"), Block::new("MA02")];
        let mut state = AssignmentState::new(&instructors, &blocks);
        state.assign(1, 1, Phase::Tiered);

        let state = redistribute(state, &config());
        assert_eq!(state.owner(1), Some(1));
        assert_eq!(state.assigned_count(0), 0);
    }

    #[test]
    fn test_only_low_tier_donates() {
        let instructors = vec![
            Instructor::new("heavy").with_availability(["LU01"]).with_quota(10),
            Instructor::new("medium").with_availability(["LU01"]).with_quota(5),
        ];
        let blocks = vec![Block::new("LU01")];
        let mut state = AssignmentState::new(&instructors, &blocks);
        state.assign(0, 1, Phase::Tiered);

        let state = redistribute(state, &config());
        assert_eq!(state.owner(0), Some(1));
    }

    #[test]
    fn test_pair_ids_never_donated() {
        let instructors = vec![
            Instructor::new("heavy").with_availability(["SA09"]).with_quota(10),
            Instructor::new("light").with_availability(["SA09", "SA11"]).with_quota(2),
        ];
        let blocks = vec![Block::new("SA09"), Block::new("SA11")];
        let mut state = AssignmentState::new(&instructors, &blocks);
        state.assign(0, 1, Phase::Paired);
        state.assign(1, 1, Phase::Paired);

        let state = redistribute(state, &config());
        assert_eq!(state.owner(0), Some(1));
        assert_eq!(state.owner(1), Some(1));
    }

    #[test]
    fn test_donations_capped_by_missing_units() {
        let instructors = vec![
            Instructor::new("heavy")
                .with_availability(["LU01", "MA02", "MI03", "JU04", "VI05"])
                .with_quota(5),
            Instructor::new("light").with_availability(["MA02", "MI03"]).with_quota(2),
        ];
        let blocks: Vec<Block> = ["LU01", "MA02", "MI03", "JU04", "VI05"]
            .into_iter()
            .map(Block::new)
            .collect();
        let mut state = AssignmentState::new(&instructors, &blocks);
        for b in [0, 3, 4] {
            state.assign(b, 0, Phase::Tiered);
        }
        state.assign(1, 1, Phase::Tiered);
        state.assign(2, 1, Phase::Tiered);

        let state = redistribute(state, &config());
        assert_eq!(state.assigned_count(0), 5);
        assert_eq!(state.assigned_count(1), 0);
    }

    #[test]
    fn test_donor_search_restarts_from_first_donor() {
        let instructors = vec![
            Instructor::new("heavy").with_availability(["LU01", "MA02"]).with_quota(7),
            Instructor::new("a").with_availability(["LU01", "MA02"]).with_quota(2),
            Instructor::new("b").with_availability(["MA02"]).with_quota(3),
        ];
        let blocks = vec![Block::new("LU01"), Block::new("MA02")];
        let mut state = AssignmentState::new(&instructors, &blocks);
        state.assign(0, 1, Phase::Tiered);
        state.assign(1, 1, Phase::Tiered);

        let donors = Tiers::partition(&state, &config().tiers, None).low;
        assert_eq!(donors, vec![1, 2]);
        let first = find_donation(&state, &donors, 0, &config()).unwrap();
        assert_eq!(first, Donation { donor: 1, block: 0 });

        let state = redistribute(state, &config());
        assert_eq!(state.occupied_ids(0), vec!["LU01", "MA02"]);
    }

    #[test]
    fn test_oversized_quota_stops_when_donors_run_out() {
        let instructors = vec![
            Instructor::new("heavy").with_availability(["LU01", "MA02"]).with_quota(u32::MAX),
            Instructor::new("light").with_availability(["MA02"]).with_quota(1),
        ];
        let blocks = vec![Block::new("LU01"), Block::new("MA02")];
        let mut state = AssignmentState::new(&instructors, &blocks);
        state.assign(0, 0, Phase::Tiered);
        state.assign(1, 1, Phase::Tiered);

        let started = std::time::Instant::now();
        let state = redistribute(state, &config());
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
        assert_eq!(state.assigned_count(0), 2);
        assert_eq!(state.assigned_count(1), 0);
    }
}
