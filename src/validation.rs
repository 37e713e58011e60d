//! Input validation for assignment runs.
//!
//! Checks structural integrity of instructors and blocks before the
//! pipeline runs. Detects:
//! - Duplicate instructor names
//! - Empty instructor names
//! - Empty block ids
//!
//! Everything else (unknown ids in availability lists, zero quotas,
//! blocks nobody can cover) is legal input that the engine degrades on.

use std::collections::HashSet;

use crate::models::{Block, Instructor};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two instructors share the same name.
    DuplicateInstructor,
    /// An instructor has a blank name.
    EmptyInstructorName,
    /// A block has a blank id.
    EmptyBlockId,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input of an assignment run.
///
/// Checks:
/// 1. Every instructor has a non-blank name
/// 2. No two instructors share a name
/// 3. Every block has a non-blank id
///
/// Block ids may repeat: they name time slots, and several courses can
/// run in the same slot.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(instructors: &[Instructor], blocks: &[Block]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    for (pos, instructor) in instructors.iter().enumerate() {
        if instructor.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyInstructorName,
                format!("Instructor at position {pos} has an empty name"),
            ));
            continue;
        }
        if !names.insert(instructor.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateInstructor,
                format!("Duplicate instructor name: {}", instructor.name),
            ));
        }
    }

    for (pos, block) in blocks.iter().enumerate() {
        if block.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyBlockId,
                format!("Block at position {pos} has an empty id"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
