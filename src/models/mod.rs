//! Assignment domain models.
//!
//! Provides the data types for an assignment run: the instructors and
//! blocks that go in, the loosely typed wire records they are decoded
//! from, and the roster that comes out.
//!
//! # Domain Mappings
//!
//! | u-assign | Workshop planning | Spreadsheet column |
//! |----------|-------------------|--------------------|
//! | Instructor | Facilitator / lecturer | Name, available blocks, expected blocks, email |
//! | Block | Workshop session | Block, course, day, block id |
//! | Roster | Weekly assignment sheet | Assigned instructor |

mod block;
mod instructor;
pub mod record;
mod roster;

pub use block::Block;
pub use instructor::Instructor;
pub use record::{parse_blocks, parse_instructors, BlockRecord, InstructorRecord};
pub use roster::{AssignedBlock, Roster};
