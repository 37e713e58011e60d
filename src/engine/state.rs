//! Assignment state shared by the pipeline phases.
//!
//! # Representation
//!
//! Instructors and blocks live in two arenas addressed by their input
//! position. Assignment is stored once, as `owners[block]`, so an
//! instructor's load and occupied ids are always derived from it and can
//! never drift from the blocks. Alongside each block the state keeps a
//! protection flag (set by the paired allocator) and the phase that made
//! the current assignment.

use std::collections::BTreeMap;

use super::Phase;
use crate::models::{AssignedBlock, Block, Instructor, Roster};

/// Block index into [`AssignmentState::blocks`].
pub type BlockIdx = usize;
/// Instructor index into [`AssignmentState::instructors`].
pub type InstructorIdx = usize;

/// Snapshot of one assignment run.
///
/// Built from copies of the caller's collections; the caller's data is
/// never aliased or mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentState {
    instructors: Vec<Instructor>,
    blocks: Vec<Block>,
    owners: Vec<Option<InstructorIdx>>,
    protected: Vec<bool>,
    provenance: Vec<Option<Phase>>,
    /// Block id → block indices carrying that id, in input order.
    slots: BTreeMap<String, Vec<BlockIdx>>,
}

impl AssignmentState {
    /// Creates an unassigned state from copies of the inputs.
    pub fn new(instructors: &[Instructor], blocks: &[Block]) -> Self {
        let mut slots: BTreeMap<String, Vec<BlockIdx>> = BTreeMap::new();
        for (idx, block) in blocks.iter().enumerate() {
            slots.entry(block.id.clone()).or_default().push(idx);
        }

        Self {
            instructors: instructors.to_vec(),
            blocks: blocks.to_vec(),
            owners: vec![None; blocks.len()],
            protected: vec![false; blocks.len()],
            provenance: vec![None; blocks.len()],
            slots,
        }
    }

    pub fn instructors(&self) -> &[Instructor] {
        &self.instructors
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Instructor holding `block`, if any.
    #[inline]
    pub fn owner(&self, block: BlockIdx) -> Option<InstructorIdx> {
        self.owners[block]
    }

    /// Whether `block` is exempt from reassignment.
    #[inline]
    pub fn is_protected(&self, block: BlockIdx) -> bool {
        self.protected[block]
    }

    /// Phase that made the current assignment of `block`.
    #[inline]
    pub fn provenance(&self, block: BlockIdx) -> Option<Phase> {
        self.provenance[block]
    }

    /// Number of blocks held by `instructor`.
    pub fn assigned_count(&self, instructor: InstructorIdx) -> u32 {
        self.owners
            .iter()
            .filter(|owner| **owner == Some(instructor))
            .count() as u32
    }

    /// Quota left before `instructor` reaches its expected count.
    pub fn remaining_quota(&self, instructor: InstructorIdx) -> u32 {
        self.instructors[instructor]
            .expected_quota
            .saturating_sub(self.assigned_count(instructor))
    }

    /// Number of blocks with an instructor.
    pub fn total_assigned(&self) -> usize {
        self.owners.iter().filter(|owner| owner.is_some()).count()
    }

    /// Whether `instructor` already holds a block with `block_id`.
    pub fn occupies(&self, instructor: InstructorIdx, block_id: &str) -> bool {
        self.slots
            .get(block_id)
            .is_some_and(|idxs| idxs.iter().any(|&b| self.owners[b] == Some(instructor)))
    }

    /// Blocks held by `instructor`, in input order.
    pub fn held_blocks(&self, instructor: InstructorIdx) -> impl Iterator<Item = BlockIdx> + '_ {
        self.owners
            .iter()
            .enumerate()
            .filter(move |(_, owner)| **owner == Some(instructor))
            .map(|(idx, _)| idx)
    }

    /// Block ids occupied by `instructor`, in input order.
    pub fn occupied_ids(&self, instructor: InstructorIdx) -> Vec<&str> {
        self.held_blocks(instructor)
            .map(|b| self.blocks[b].id.as_str())
            .collect()
    }

    /// Unassigned blocks carrying `block_id`, in input order.
    pub fn open_blocks<'a>(&'a self, block_id: &str) -> impl Iterator<Item = BlockIdx> + 'a {
        self.slots
            .get(block_id)
            .into_iter()
            .flatten()
            .copied()
            .filter(move |&b| self.owners[b].is_none())
    }

    /// First unassigned, unprotected block carrying `block_id`.
    pub fn first_open_block(&self, block_id: &str) -> Option<BlockIdx> {
        self.open_blocks(block_id).find(|&b| !self.protected[b])
    }

    /// First instructor whose name contains `pattern`.
    pub fn find_instructor_containing(&self, pattern: &str) -> Option<InstructorIdx> {
        self.instructors
            .iter()
            .position(|i| i.name.contains(pattern))
    }

    /// Assigns an open block to `instructor`.
    pub(crate) fn assign(&mut self, block: BlockIdx, instructor: InstructorIdx, phase: Phase) {
        debug_assert!(self.owners[block].is_none(), "block {block} already assigned");
        self.owners[block] = Some(instructor);
        self.provenance[block] = Some(phase);
    }

    /// Moves an assigned, unprotected block to `instructor`.
    ///
    /// Returns `false` and leaves the state untouched if the block is
    /// protected.
    pub(crate) fn transfer(
        &mut self,
        block: BlockIdx,
        instructor: InstructorIdx,
        phase: Phase,
    ) -> bool {
        if self.protected[block] {
            return false;
        }
        self.owners[block] = Some(instructor);
        self.provenance[block] = Some(phase);
        true
    }

    pub(crate) fn protect(&mut self, block: BlockIdx) {
        self.protected[block] = true;
    }

    /// Converts the final state into the output roster.
    pub fn into_roster(self) -> Roster {
        let Self {
            instructors,
            blocks,
            owners,
            provenance,
            ..
        } = self;

        let blocks = blocks
            .into_iter()
            .zip(owners)
            .zip(provenance)
            .map(|((block, owner), phase)| AssignedBlock {
                block,
                assigned_instructor_name: owner.map(|i| instructors[i].name.clone()),
                assigned_by: owner.and(phase),
            })
            .collect();

        Roster { blocks }
    }
}
