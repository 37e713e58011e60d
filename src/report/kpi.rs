//! Roster quality metrics (KPIs).
//!
//! Computes coverage and quota-fill indicators from a finished roster
//! and the instructors it was built from.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Coverage Rate | assigned blocks / total blocks |
//! | Uncoverable | open blocks whose id no instructor lists |
//! | Over Quota | instructors holding more than expected |
//! | Under Quota | instructors holding fewer than expected |
//! | Avg Quota Fill | mean of min(assigned / expected, 1) over instructors with quota |
//! | Fallback Assignments | blocks placed by the quota-unchecked sweep |

use std::collections::HashSet;

use crate::engine::Phase;
use crate::models::{Instructor, Roster};

/// Signed gap between an instructor's load and quota.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaDeviation {
    pub instructor: String,
    pub expected: u32,
    pub assigned: u32,
}

impl QuotaDeviation {
    /// Assigned minus expected.
    #[inline]
    pub fn delta(&self) -> i64 {
        i64::from(self.assigned) - i64::from(self.expected)
    }
}

/// Roster performance indicators.
#[derive(Debug, Clone)]
pub struct CoverageKpi {
    pub total_blocks: usize,
    pub assigned_blocks: usize,
    pub unassigned_blocks: usize,
    /// Open blocks no instructor lists in their availability.
    pub uncoverable_blocks: usize,
    /// Fraction of blocks with an instructor (1.0 when there are no blocks).
    pub coverage_rate: f64,
    /// Instructors above quota, in input order.
    pub over_quota: Vec<QuotaDeviation>,
    /// Instructors below quota, in input order.
    pub under_quota: Vec<QuotaDeviation>,
    /// Mean capped fill ratio over instructors with a non-zero quota.
    pub avg_quota_fill: f64,
    /// Blocks assigned by the fallback phase.
    pub fallback_assignments: usize,
}

impl CoverageKpi {
    /// Computes KPIs from a roster and its input instructors.
    pub fn calculate(roster: &Roster, instructors: &[Instructor]) -> Self {
        let total_blocks = roster.blocks.len();
        let assigned_blocks = roster.assigned_count();
        let unassigned_blocks = total_blocks - assigned_blocks;

        let listed: HashSet<&str> = instructors
            .iter()
            .flat_map(|i| i.available_block_ids.iter().map(String::as_str))
            .collect();
        let uncoverable_blocks = roster
            .unassigned()
            .iter()
            .filter(|b| !listed.contains(b.block.id.as_str()))
            .count();

        let fallback_assignments = roster
            .blocks
            .iter()
            .filter(|b| b.assigned_by == Some(Phase::Fallback))
            .count();

        let loads = roster.loads();
        let mut over_quota = Vec::new();
        let mut under_quota = Vec::new();
        let mut fill_sum = 0.0;
        let mut with_quota = 0usize;

        for instructor in instructors {
            let assigned = loads.get(instructor.name.as_str()).copied().unwrap_or(0) as u32;
            let expected = instructor.expected_quota;
            let deviation = QuotaDeviation {
                instructor: instructor.name.clone(),
                expected,
                assigned,
            };
            if assigned > expected {
                over_quota.push(deviation);
            } else if assigned < expected {
                under_quota.push(deviation);
            }

            if expected > 0 {
                with_quota += 1;
                fill_sum += (f64::from(assigned) / f64::from(expected)).min(1.0);
            }
        }

        let coverage_rate = if total_blocks == 0 {
            1.0
        } else {
            assigned_blocks as f64 / total_blocks as f64
        };

        let avg_quota_fill = if with_quota == 0 {
            1.0
        } else {
            fill_sum / with_quota as f64
        };

        Self {
            total_blocks,
            assigned_blocks,
            unassigned_blocks,
            uncoverable_blocks,
            coverage_rate,
            over_quota,
            under_quota,
            avg_quota_fill,
            fallback_assignments,
        }
    }

    /// Whether the roster meets the given coverage and fill thresholds.
    pub fn meets_thresholds(&self, min_coverage: f64, min_quota_fill: f64) -> bool {
        self.coverage_rate >= min_coverage && self.avg_quota_fill >= min_quota_fill
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::engine::AssignmentEngine;
    use crate::models::Block;

    fn run(instructors: &[Instructor], blocks: &[Block]) -> Roster {
        AssignmentEngine::new(EngineConfig::new("SA09", "SA11"))
            .unwrap()
            .assign(instructors, blocks)
            .unwrap()
    }

    #[test]
    fn test_full_coverage() {
        let instructors = vec![Instructor::new("Ana")
            .with_availability(["LU01", "MA02"])
            .with_quota(2)];
        let blocks = vec![Block::new("LU01"), Block::new("MA02")];
        let kpi = CoverageKpi::calculate(&run(&instructors, &blocks), &instructors);

        assert_eq!(kpi.total_blocks, 2);
        assert_eq!(kpi.assigned_blocks, 2);
        assert!((kpi.coverage_rate - 1.0).abs() < 1e-10);
        assert!((kpi.avg_quota_fill - 1.0).abs() < 1e-10);
        assert!(kpi.over_quota.is_empty());
        assert!(kpi.under_quota.is_empty());
        assert_eq!(kpi.fallback_assignments, 0);
        assert!(kpi.meets_thresholds(1.0, 1.0));
    }

    #[test]
    fn test_over_and_under_quota() {
        let instructors = vec![
            Instructor::new("Ana")
                .with_availability(["LU01", "MA02", "MI03"])
                .with_quota(1),
            Instructor::new("Bruno").with_availability(["JU04"]).with_quota(4),
        ];
        let blocks = vec![
            Block::new("LU01"),
            Block::new("MA02"),
            Block::new("MI03"),
            Block::new("XX99"),
        ];
        let kpi = CoverageKpi::calculate(&run(&instructors, &blocks), &instructors);

        assert_eq!(kpi.assigned_blocks, 3);
        assert_eq!(kpi.unassigned_blocks, 1);
        assert_eq!(kpi.uncoverable_blocks, 1);
        assert!((kpi.coverage_rate - 0.75).abs() < 1e-10);
        assert_eq!(kpi.fallback_assignments, 2);

        assert_eq!(kpi.over_quota.len(), 1);
        assert_eq!(kpi.over_quota[0].instructor, "Ana");
        assert_eq!(kpi.over_quota[0].delta(), 2);
        assert_eq!(kpi.under_quota.len(), 1);
        assert_eq!(kpi.under_quota[0].delta(), -4);

        // Ana capped at 1.0, Bruno at 0.0
        assert!((kpi.avg_quota_fill - 0.5).abs() < 1e-10);
        assert!(!kpi.meets_thresholds(0.8, 0.0));
    }

    #[test]
    fn test_empty_roster() {
        let kpi = CoverageKpi::calculate(&Roster::new(), &[]);
        assert_eq!(kpi.total_blocks, 0);
        assert!((kpi.coverage_rate - 1.0).abs() < 1e-10);
        assert!((kpi.avg_quota_fill - 1.0).abs() < 1e-10);
    }
}
