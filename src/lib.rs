//! Workshop-to-instructor assignment for the U-Engine ecosystem.
//!
//! Assigns a fixed set of workshop blocks to instructors under
//! per-instructor availability and quotas, a hard pairing constraint on
//! two block ids, and a priority override for one instructor. The engine
//! is a deterministic multi-phase greedy heuristic: it tries to respect
//! quotas, then guarantees every coverable block ends up covered.
//!
//! # Modules
//!
//! - **`models`**: Domain types (`Instructor`, `Block`, `Roster`,
//!   `AssignedBlock`) and lenient JSON wire records
//! - **`config`**: `EngineConfig` (pair ids, priority instructor, tier thresholds)
//! - **`engine`**: `AssignmentEngine` and its five phases
//! - **`validation`**: Input integrity checks (duplicate names, blank ids)
//! - **`report`**: Coverage KPIs, instructor summaries, remaining availability
//!
//! # Pipeline
//!
//! ```text
//! paired → priority → tiered (high, medium, low) → donation → fallback
//! ```
//!
//! Spreadsheet parsing, PDF/Excel rendering and email dispatch are left
//! to callers: they supply instructors and blocks and consume the roster.

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod report;
pub mod validation;

pub use config::EngineConfig;
pub use engine::{AssignmentEngine, Phase};
pub use error::{AssignError, AssignResult};
