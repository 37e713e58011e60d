//! Roster (solution) model.
//!
//! A roster is the engine's output: every input block, in input order,
//! annotated with the instructor it ended up with (or none).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Block;
use crate::engine::Phase;
use crate::error::AssignResult;

/// The block collection produced by one assignment run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// Blocks in input order.
    pub blocks: Vec<AssignedBlock>,
}

/// A block with its final assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedBlock {
    #[serde(flatten)]
    pub block: Block,
    /// Instructor name, `None` when the block stayed uncovered.
    pub assigned_instructor_name: Option<String>,
    /// Pipeline phase that made the final assignment. Not part of the wire format.
    #[serde(skip)]
    pub assigned_by: Option<Phase>,
}

impl AssignedBlock {
    /// Creates an unassigned entry.
    pub fn unassigned(block: Block) -> Self {
        Self {
            block,
            assigned_instructor_name: None,
            assigned_by: None,
        }
    }

    /// Whether an instructor holds this block.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.assigned_instructor_name.is_some()
    }

    /// Whether `name` holds this block.
    #[inline]
    pub fn is_held_by(&self, name: &str) -> bool {
        self.assigned_instructor_name.as_deref() == Some(name)
    }
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks that have an instructor.
    pub fn assigned_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_assigned()).count()
    }

    /// Number of blocks left without an instructor.
    pub fn unassigned_count(&self) -> usize {
        self.blocks.len() - self.assigned_count()
    }

    /// Whether every block has an instructor.
    pub fn is_complete(&self) -> bool {
        self.blocks.iter().all(AssignedBlock::is_assigned)
    }

    /// Blocks left without an instructor, in input order.
    pub fn unassigned(&self) -> Vec<&AssignedBlock> {
        self.blocks.iter().filter(|b| !b.is_assigned()).collect()
    }

    /// Blocks held by the named instructor, in input order.
    pub fn blocks_for_instructor(&self, name: &str) -> Vec<&AssignedBlock> {
        self.blocks.iter().filter(|b| b.is_held_by(name)).collect()
    }

    /// The instructor holding the first block with `block_id`, in input order.
    ///
    /// Several courses can share one block id; use
    /// [`instructor_for_course`](Self::instructor_for_course) to address one
    /// of them.
    pub fn instructor_for(&self, block_id: &str) -> Option<&str> {
        self.blocks
            .iter()
            .find(|b| b.block.id == block_id)
            .and_then(|b| b.assigned_instructor_name.as_deref())
    }

    /// The instructor holding the block with `block_id` for `course`.
    pub fn instructor_for_course(&self, block_id: &str, course: &str) -> Option<&str> {
        self.blocks
            .iter()
            .find(|b| b.block.id == block_id && b.block.course == course)
            .and_then(|b| b.assigned_instructor_name.as_deref())
    }

    /// Number of blocks per instructor (only instructors holding blocks).
    pub fn loads(&self) -> BTreeMap<&str, usize> {
        let mut loads = BTreeMap::new();
        for name in self
            .blocks
            .iter()
            .filter_map(|b| b.assigned_instructor_name.as_deref())
        {
            *loads.entry(name).or_insert(0) += 1;
        }
        loads
    }

    /// Serializes the roster's blocks as a JSON array.
    pub fn to_json_string(&self) -> AssignResult<String> {
        Ok(serde_json::to_string_pretty(&self.blocks)?)
    }
}
