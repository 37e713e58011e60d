//! Block (workshop) model.
//!
//! A block is one course session in one time slot. The block id names
//! the slot: several blocks (different courses) may share an id, and one
//! instructor can hold at most one block per id.

use serde::{Deserialize, Serialize};

/// A workshop block requiring one instructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Time-slot identifier (e.g. "LU01").
    pub id: String,
    /// Day label.
    pub day: String,
    /// Timeslot label (e.g. "09:00-10:30").
    pub timeslot: String,
    /// Course name.
    pub course: String,
}

impl Block {
    /// Creates a block with empty labels.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            day: String::new(),
            timeslot: String::new(),
            course: String::new(),
        }
    }

    pub fn with_day(mut self, day: impl Into<String>) -> Self {
        self.day = day.into();
        self
    }

    pub fn with_timeslot(mut self, timeslot: impl Into<String>) -> Self {
        self.timeslot = timeslot.into();
        self
    }

    pub fn with_course(mut self, course: impl Into<String>) -> Self {
        self.course = course.into();
        self
    }
}
