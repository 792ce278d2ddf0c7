//! Catalog entities and the validated aggregate consumed by the model layer.

use crate::error::ScheduleError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A physical room with a fixed seat count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub capacity: u32,
}

impl Room {
    pub fn new(id: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            capacity,
        }
    }
}

/// A course to be scheduled. Exactly one instructor per course.
///
/// `preferred_rooms` feeds the preferred-room objective; it may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub enrollment: u32,
    pub instructor: String,
    #[serde(default)]
    pub preferred_rooms: Vec<String>,
}

impl Course {
    pub fn new(id: impl Into<String>, enrollment: u32, instructor: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            enrollment,
            instructor: instructor.into(),
            preferred_rooms: Vec::new(),
        }
    }

    pub fn with_preferred_rooms(mut self, rooms: Vec<String>) -> Self {
        self.preferred_rooms = rooms;
        self
    }
}

/// An opaque time-slot token. Ordering is catalog position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: String,
}

impl TimeSlot {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// The validated entity aggregate, loaded once before model construction.
///
/// Instructors are derived: the distinct `Course::instructor` values in
/// first-appearance order.
#[derive(Debug, Clone)]
pub struct Catalog {
    rooms: Vec<Room>,
    courses: Vec<Course>,
    time_slots: Vec<TimeSlot>,
    instructors: Vec<String>,
}

impl Catalog {
    /// Assembles and validates a catalog. Fails with a data error naming
    /// the duplicates if any id collides within its entity kind.
    pub fn new(
        rooms: Vec<Room>,
        courses: Vec<Course>,
        time_slots: Vec<TimeSlot>,
    ) -> Result<Self, ScheduleError> {
        for (kind, dupes) in [
            ("room", duplicate_ids(rooms.iter().map(|r| r.id.as_str()))),
            ("course", duplicate_ids(courses.iter().map(|c| c.id.as_str()))),
            (
                "time slot",
                duplicate_ids(time_slots.iter().map(|t| t.id.as_str())),
            ),
        ] {
            if !dupes.is_empty() {
                return Err(ScheduleError::Data(format!(
                    "duplicate {kind} ids: {}",
                    dupes.join(", ")
                )));
            }
        }

        let mut instructors = Vec::new();
        let mut seen = HashSet::new();
        for course in &courses {
            if seen.insert(course.instructor.clone()) {
                instructors.push(course.instructor.clone());
            }
        }

        Ok(Self {
            rooms,
            courses,
            time_slots,
            instructors,
        })
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }

    pub fn instructors(&self) -> &[String] {
        &self.instructors
    }

    pub fn room_position(&self, id: &str) -> Option<usize> {
        self.rooms.iter().position(|r| r.id == id)
    }

    pub fn course_position(&self, id: &str) -> Option<usize> {
        self.courses.iter().position(|c| c.id == id)
    }

    pub fn slot_position(&self, id: &str) -> Option<usize> {
        self.time_slots.iter().position(|t| t.id == id)
    }

    pub fn instructor_position(&self, id: &str) -> Option<usize> {
        self.instructors.iter().position(|i| i == id)
    }
}

/// Ids that appear more than once, each reported once, in input order.
pub(crate) fn duplicate_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut dupes: Vec<String> = Vec::new();
    for id in ids {
        if !seen.insert(id) && !dupes.iter().any(|d| d == id) {
            dupes.push(id.to_string());
        }
    }
    dupes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_instructors_in_first_appearance_order() {
        let catalog = Catalog::new(
            vec![Room::new("R1", 30)],
            vec![
                Course::new("C1", 20, "A"),
                Course::new("C2", 40, "A"),
                Course::new("C3", 25, "B"),
            ],
            vec![TimeSlot::new("T0")],
        )
        .unwrap();

        assert_eq!(catalog.instructors(), ["A".to_string(), "B".to_string()]);
        assert_eq!(catalog.instructor_position("B"), Some(1));
    }

    #[test]
    fn rejects_duplicate_room_ids_naming_them() {
        let err = Catalog::new(
            vec![Room::new("R1", 30), Room::new("R1", 50)],
            vec![Course::new("C1", 20, "A")],
            vec![TimeSlot::new("T0")],
        )
        .unwrap_err();

        match err {
            ScheduleError::Data(msg) => assert!(msg.contains("duplicate room ids: R1")),
            other => panic!("expected data error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_course_ids() {
        let err = Catalog::new(
            vec![Room::new("R1", 30)],
            vec![Course::new("C1", 20, "A"), Course::new("C1", 25, "B")],
            vec![TimeSlot::new("T0")],
        )
        .unwrap_err();

        assert!(matches!(err, ScheduleError::Data(_)));
    }

    #[test]
    fn duplicate_ids_reports_each_offender_once() {
        let dupes = duplicate_ids(["a", "b", "a", "a", "c", "b"]);
        assert_eq!(dupes, ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn positions_resolve_by_id() {
        let catalog = Catalog::new(
            vec![Room::new("R1", 30), Room::new("R2", 50)],
            vec![Course::new("C1", 20, "A")],
            vec![TimeSlot::new("T0"), TimeSlot::new("T1")],
        )
        .unwrap();

        assert_eq!(catalog.room_position("R2"), Some(1));
        assert_eq!(catalog.slot_position("T1"), Some(1));
        assert_eq!(catalog.course_position("missing"), None);
    }
}
