//! Per-instructor views of a finished roster.
//!
//! - [`InstructorSummary`]: expected vs. assigned load with the block ids
//!   and courses each instructor ended up with.
//! - [`DetailedSummary`]: every assigned block of an instructor as a
//!   day, timeslot and course entry, the data behind a personal schedule.
//! - [`remaining_availability`]: the part of each availability list not
//!   consumed by the instructor's own assignments, for follow-up planning.

use serde::{Deserialize, Serialize};

use crate::models::{Instructor, Roster};

/// Load summary for one instructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorSummary {
    pub name: String,
    pub expected: u32,
    pub assigned: u32,
    /// Distinct block ids, first-seen order.
    pub block_ids: Vec<String>,
    /// Distinct courses, first-seen order.
    pub courses: Vec<String>,
}

impl InstructorSummary {
    /// Summarizes every instructor that holds at least one block, in
    /// input order.
    pub fn build(roster: &Roster, instructors: &[Instructor]) -> Vec<Self> {
        instructors
            .iter()
            .filter_map(|instructor| {
                let held = roster.blocks_for_instructor(&instructor.name);
                if held.is_empty() {
                    return None;
                }

                let mut block_ids: Vec<String> = Vec::new();
                let mut courses: Vec<String> = Vec::new();
                for b in &held {
                    if !block_ids.contains(&b.block.id) {
                        block_ids.push(b.block.id.clone());
                    }
                    if !courses.contains(&b.block.course) {
                        courses.push(b.block.course.clone());
                    }
                }

                Some(Self {
                    name: instructor.name.clone(),
                    expected: instructor.expected_quota,
                    assigned: held.len() as u32,
                    block_ids,
                    courses,
                })
            })
            .collect()
    }

    /// Whether the instructor received exactly its quota.
    pub fn is_on_quota(&self) -> bool {
        self.assigned == self.expected
    }
}

/// One assigned block as it appears in a personal schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub block_id: String,
    pub day: String,
    pub timeslot: String,
    pub course: String,
}

impl ScheduleEntry {
    /// `"day timeslot course"`, blank parts skipped.
    pub fn label(&self) -> String {
        [&self.day, &self.timeslot, &self.course]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Assigned blocks of one instructor, in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedSummary {
    pub name: String,
    pub entries: Vec<ScheduleEntry>,
}

impl DetailedSummary {
    /// Details every instructor that holds at least one block, in input order.
    pub fn build(roster: &Roster, instructors: &[Instructor]) -> Vec<Self> {
        instructors
            .iter()
            .filter_map(|instructor| {
                let entries: Vec<ScheduleEntry> = roster
                    .blocks_for_instructor(&instructor.name)
                    .into_iter()
                    .map(|b| ScheduleEntry {
                        block_id: b.block.id.clone(),
                        day: b.block.day.clone(),
                        timeslot: b.block.timeslot.clone(),
                        course: b.block.course.clone(),
                    })
                    .collect();
                (!entries.is_empty()).then(|| Self {
                    name: instructor.name.clone(),
                    entries,
                })
            })
            .collect()
    }

    pub fn assigned(&self) -> usize {
        self.entries.len()
    }

    /// Entry labels joined with `" | "`.
    pub fn joined_labels(&self) -> String {
        self.entries
            .iter()
            .map(ScheduleEntry::label)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Unused availability of one instructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemainingAvailability {
    pub name: String,
    pub block_ids: Vec<String>,
}

/// Availability left over for every instructor, in input order.
pub fn remaining_availability(roster: &Roster, instructors: &[Instructor]) -> Vec<RemainingAvailability> {
    instructors
        .iter()
        .map(|instructor| {
            let held: Vec<&str> = roster
                .blocks_for_instructor(&instructor.name)
                .into_iter()
                .map(|b| b.block.id.as_str())
                .collect();
            RemainingAvailability {
                name: instructor.name.clone(),
                block_ids: instructor
                    .available_block_ids
                    .iter()
                    .filter(|id| !held.contains(&id.as_str()))
                    .cloned()
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssignedBlock, Block};

    fn held(id: &str, course: &str, name: Option<&str>) -> AssignedBlock {
        let mut b = AssignedBlock::unassigned(Block::new(id).with_course(course));
        b.assigned_instructor_name = name.map(String::from);
        b
    }

    fn sample() -> (Roster, Vec<Instructor>) {
        let roster = Roster {
            blocks: vec![
                held("LU01", "Física", Some("Ana")),
                held("LU01", "Química", Some("Bruno")),
                held("MA02", "Física", Some("Ana")),
                held("MI03", "Biología", None),
            ],
        };
        let instructors = vec![
            Instructor::new("Ana")
                .with_availability(["LU01", "MA02", "MI03"])
                .with_quota(2),
            Instructor::new("Bruno").with_availability(["LU01", "JU04"]).with_quota(3),
            Instructor::new("Carla").with_availability(["MI03"]).with_quota(1),
        ];
        (roster, instructors)
    }

    #[test]
    fn test_summary() {
        let (roster, instructors) = sample();
        let summary = InstructorSummary::build(&roster, &instructors);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].name, "Ana");
        assert_eq!(summary[0].assigned, 2);
        assert_eq!(summary[0].block_ids, vec!["LU01", "MA02"]);
        assert_eq!(summary[0].courses, vec!["Física"]);
        assert!(summary[0].is_on_quota());

        assert_eq!(summary[1].name, "Bruno");
        assert_eq!(summary[1].courses, vec!["Química"]);
        assert!(!summary[1].is_on_quota());
    }

    #[test]
    fn test_detailed_summary() {
        let mut lunes = held("LU01", "Física", Some("Ana"));
        lunes.block = lunes.block.with_day("Lunes").with_timeslot("08:00");
        let mut martes = held("MA02", "Química", Some("Ana"));
        martes.block = martes.block.with_day("Martes");
        let roster = Roster {
            blocks: vec![lunes, held("MI03", "Biología", None), martes],
        };
        let instructors = vec![Instructor::new("Bruno"), Instructor::new("Ana")];

        let detail = DetailedSummary::build(&roster, &instructors);
        assert_eq!(detail.len(), 1);
        assert_eq!(detail[0].name, "Ana");
        assert_eq!(detail[0].assigned(), 2);
        assert_eq!(detail[0].entries[1].block_id, "MA02");
        assert_eq!(
            detail[0].joined_labels(),
            "Lunes 08:00 Física | Martes Química"
        );

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json[0]["entries"][0]["blockId"], "LU01");
    }

    #[test]
    fn test_remaining_availability() {
        let (roster, instructors) = sample();
        let remaining = remaining_availability(&roster, &instructors);

        assert_eq!(remaining.len(), 3);
        assert_eq!(remaining[0].block_ids, vec!["MI03"]);
        assert_eq!(remaining[1].block_ids, vec!["JU04"]);
        assert_eq!(remaining[2].block_ids, vec!["MI03"]);
    }

    #[test]
    fn test_remaining_wire_format() {
        let (roster, instructors) = sample();
        let json = serde_json::to_value(remaining_availability(&roster, &instructors)).unwrap();
        assert_eq!(json[1]["name"], "Bruno");
        assert_eq!(json[1]["blockIds"][0], "JU04");
    }
}
