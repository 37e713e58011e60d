//! Post-run reports.
//!
//! Read-only views over a finished [`Roster`](crate::models::Roster):
//! coverage and quota KPIs, per-instructor load summaries and schedules,
//! and the availability each instructor still has free.

mod kpi;
mod summary;

pub use kpi::{CoverageKpi, QuotaDeviation};
pub use summary::{
    remaining_availability, DetailedSummary, InstructorSummary, RemainingAvailability,
    ScheduleEntry,
};
