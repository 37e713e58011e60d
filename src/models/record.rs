//! Wire records and input normalization.
//!
//! Upstream data comes from spreadsheets, so availability and quota
//! columns arrive loosely typed. Records accept any JSON for those
//! fields and normalize:
//!
//! | Field | Accepted | Fallback |
//! |-------|----------|----------|
//! | `availableBlockIds` | array of strings, or `"A, B, C"` | empty list |
//! | `expectedQuota` | integer, float (truncated), `"7"` / `"7 blocks"` | 0 |
//! | `contact` | non-blank string | absent |
//!
//! `name` (instructors) and `id` (blocks) are required. Records missing
//! them are rejected as invalid input.

use serde::Deserialize;
use serde_json::Value;

use super::{Block, Instructor};
use crate::error::{AssignError, AssignResult};

/// Loosely typed instructor row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorRecord {
    pub name: String,
    #[serde(default)]
    pub available_block_ids: Value,
    #[serde(default)]
    pub expected_quota: Value,
    #[serde(default)]
    pub contact: Value,
}

/// Loosely typed block row.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockRecord {
    pub id: String,
    #[serde(default)]
    pub day: Value,
    #[serde(default)]
    pub timeslot: Value,
    #[serde(default)]
    pub course: Value,
}

impl InstructorRecord {
    /// Normalizes into a domain instructor.
    pub fn into_instructor(self) -> Instructor {
        let contact = match self.contact {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        };
        Instructor {
            name: self.name.trim().to_string(),
            available_block_ids: normalize_availability(&self.available_block_ids),
            expected_quota: normalize_quota(&self.expected_quota),
            contact,
        }
    }
}

impl BlockRecord {
    /// Normalizes into a domain block.
    pub fn into_block(self) -> Block {
        Block {
            id: self.id.trim().to_string(),
            day: label(&self.day),
            timeslot: label(&self.timeslot),
            course: label(&self.course),
        }
    }
}

/// Coerces an availability cell into an ordered list of block ids.
pub fn normalize_availability(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

/// Coerces a quota cell into a non-negative count.
pub fn normalize_quota(value: &Value) -> u32 {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u32::try_from(u).unwrap_or(u32::MAX)
            } else if let Some(f) = n.as_f64() {
                if f.is_finite() && f > 0.0 {
                    // saturating cast
                    f.trunc() as u32
                } else {
                    0
                }
            } else {
                0
            }
        }
        Value::String(s) => leading_integer(s),
        _ => 0,
    }
}

/// Parses the leading integer of `s` the way a spreadsheet cell is read:
/// leading whitespace and a sign are accepted, parsing stops at the first
/// non-digit. Negative values clamp to 0.
fn leading_integer(s: &str) -> u32 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: u32 = 0;
    let mut seen = false;
    for d in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        value = value.saturating_mul(10).saturating_add(u32::from(d - b'0'));
    }

    if !seen || negative {
        0
    } else {
        value
    }
}

fn label(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Decodes a JSON array of instructor records.
pub fn parse_instructors(json: &str) -> AssignResult<Vec<Instructor>> {
    let records: Vec<InstructorRecord> = serde_json::from_str(json)
        .map_err(|e| AssignError::InvalidInput(format!("instructor records: {e}")))?;
    Ok(records
        .into_iter()
        .map(InstructorRecord::into_instructor)
        .collect())
}

/// Decodes a JSON array of block records.
pub fn parse_blocks(json: &str) -> AssignResult<Vec<Block>> {
    let records: Vec<BlockRecord> = serde_json::from_str(json)
        .map_err(|e| AssignError::InvalidInput(format!("block records: {e}")))?;
    Ok(records.into_iter().map(BlockRecord::into_block).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_availability_from_array() {
        let v = json!(["LU01", " MA02 ", "", 7, null]);
        assert_eq!(normalize_availability(&v), vec!["LU01", "MA02"]);
    }

    #[test]
    fn test_availability_from_string() {
        let v = json!("LU01, MA02,MI03 ,");
        assert_eq!(normalize_availability(&v), vec!["LU01", "MA02", "MI03"]);
    }

    #[test]
    fn test_availability_other_types_empty() {
        assert!(normalize_availability(&json!(42)).is_empty());
        assert!(normalize_availability(&json!({"a": 1})).is_empty());
        assert!(normalize_availability(&Value::Null).is_empty());
    }

    #[test]
    fn test_quota_numbers() {
        assert_eq!(normalize_quota(&json!(7)), 7);
        assert_eq!(normalize_quota(&json!(3.9)), 3);
        assert_eq!(normalize_quota(&json!(-2)), 0);
        assert_eq!(normalize_quota(&json!(-2.5)), 0);
    }

    #[test]
    fn test_quota_strings() {
        assert_eq!(normalize_quota(&json!("12")), 12);
        assert_eq!(normalize_quota(&json!("  4 bloques")), 4);
        assert_eq!(normalize_quota(&json!("+6")), 6);
        assert_eq!(normalize_quota(&json!("-3")), 0);
        assert_eq!(normalize_quota(&json!("abc")), 0);
        assert_eq!(normalize_quota(&json!("")), 0);
        assert_eq!(normalize_quota(&json!("99999999999999")), u32::MAX);
    }

    #[test]
    fn test_quota_other_types() {
        assert_eq!(normalize_quota(&Value::Null), 0);
        assert_eq!(normalize_quota(&json!(true)), 0);
        assert_eq!(normalize_quota(&json!([3])), 0);
    }

    #[test]
    fn test_parse_instructors() {
        let json = r#"[
            {"name": "Ana", "availableBlockIds": "LU01, MA02", "expectedQuota": "2", "contact": "ana@x.cl"},
            {"name": "Bruno", "availableBlockIds": ["MI03"], "expectedQuota": 1, "contact": "  "},
            {"name": "Carla"}
        ]"#;
        let instructors = parse_instructors(json).unwrap();

        assert_eq!(instructors.len(), 3);
        assert_eq!(instructors[0].available_block_ids, vec!["LU01", "MA02"]);
        assert_eq!(instructors[0].expected_quota, 2);
        assert_eq!(instructors[0].contact.as_deref(), Some("ana@x.cl"));
        assert_eq!(instructors[1].contact, None);
        assert!(instructors[2].available_block_ids.is_empty());
        assert_eq!(instructors[2].expected_quota, 0);
    }

    #[test]
    fn test_parse_instructor_missing_name() {
        let err = parse_instructors(r#"[{"expectedQuota": 3}]"#).unwrap_err();
        assert!(matches!(err, AssignError::InvalidInput(_)));
    }

    #[test]
    fn test_parse_blocks() {
        let json = r#"[
            {"id": "LU01", "day": "Lunes", "timeslot": "09:00", "course": "Física"},
            {"id": "MA02", "course": 101}
        ]"#;
        let blocks = parse_blocks(json).unwrap();
        assert_eq!(blocks[0], Block::new("LU01").with_day("Lunes").with_timeslot("09:00").with_course("Física"));
        assert_eq!(blocks[1].course, "101");
        assert_eq!(blocks[1].day, "");
    }

    #[test]
    fn test_parse_block_missing_id() {
        let err = parse_blocks(r#"[{"day": "Lunes"}]"#).unwrap_err();
        assert!(matches!(err, AssignError::InvalidInput(_)));
    }

    #[test]
    fn test_parse_not_an_array() {
        assert!(matches!(
            parse_blocks(r#"{"id": "LU01"}"#),
            Err(AssignError::InvalidInput(_))
        ));
    }
}
