//! Instructor model.
//!
//! Instructors are the people blocks are assigned to. Each carries an
//! ordered availability list of block identifiers and an expected quota:
//! the number of blocks they should receive.

use serde::{Deserialize, Serialize};

/// An instructor that can be assigned to blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    /// Full name, unique within a run.
    pub name: String,
    /// Block identifiers this instructor can cover, in preference order.
    pub available_block_ids: Vec<String>,
    /// Target number of blocks.
    pub expected_quota: u32,
    /// Contact address, passed through for downstream use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl Instructor {
    /// Creates an instructor with no availability and zero quota.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            available_block_ids: Vec::new(),
            expected_quota: 0,
            contact: None,
        }
    }

    /// Appends one available block identifier.
    pub fn with_available(mut self, block_id: impl Into<String>) -> Self {
        self.available_block_ids.push(block_id.into());
        self
    }

    /// Replaces the availability list.
    pub fn with_availability<I, S>(mut self, block_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available_block_ids = block_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the expected quota.
    pub fn with_quota(mut self, quota: u32) -> Self {
        self.expected_quota = quota;
        self
    }

    /// Sets the contact address.
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    /// Whether `block_id` appears in the availability list.
    #[inline]
    pub fn is_available_for(&self, block_id: &str) -> bool {
        self.available_block_ids.iter().any(|b| b == block_id)
    }
}
