//! Catalog loaders: rooms, courses, and time slots from `.xlsx` workbooks.
//!
//! Each loader reads the first worksheet, resolving columns by header name
//! (row 1, case-insensitive, with a few accepted aliases) and entities from
//! row 2 down. Blank id cells end nothing; the row is simply skipped.
//! Duplicate ids and malformed cells fail fast with a data error, before
//! any model is built.

use crate::catalog::{Course, Room, TimeSlot, duplicate_ids};
use crate::error::ScheduleError;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;
use umya_spreadsheet::{Spreadsheet, Worksheet};

lazy_static! {
    /// Accepted spellings per canonical column name.
    static ref HEADER_ALIASES: HashMap<&'static str, &'static [&'static str]> = {
        let mut m: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        m.insert("room", &["room", "room id"]);
        m.insert("capacity", &["capacity", "seats"]);
        m.insert("course", &["course", "course id"]);
        m.insert("enrollment", &["enrollment", "enrolment", "students"]);
        m.insert("instructor", &["instructor", "teacher"]);
        m.insert("time slot", &["time slot", "timeslot", "slot"]);
        m.insert("preferred rooms", &["preferred rooms", "preferred"]);
        m
    };
}

pub fn load_rooms(path: &Path) -> Result<Vec<Room>, ScheduleError> {
    let book = read_book(path)?;
    let sheet = first_sheet(&book, path)?;
    let id_col = find_column(sheet, "room", path)?;
    let capacity_col = find_column(sheet, "capacity", path)?;

    let mut rooms = Vec::new();
    for row in 2..=sheet.get_highest_row() {
        let id = cell(sheet, id_col, row);
        if id.is_empty() {
            continue;
        }
        let capacity = parse_count(sheet, capacity_col, row, "capacity", path)?;
        rooms.push(Room { id, capacity });
    }

    ensure_unique("room", rooms.iter().map(|r| r.id.as_str()), path)?;
    info!(count = rooms.len(), path = %path.display(), "loaded rooms");
    Ok(rooms)
}

pub fn load_courses(path: &Path) -> Result<Vec<Course>, ScheduleError> {
    let book = read_book(path)?;
    let sheet = first_sheet(&book, path)?;
    let id_col = find_column(sheet, "course", path)?;
    let enrollment_col = find_column(sheet, "enrollment", path)?;
    let instructor_col = find_column(sheet, "instructor", path)?;
    let preferred_col = locate_column(sheet, "preferred rooms");

    let mut courses = Vec::new();
    for row in 2..=sheet.get_highest_row() {
        let id = cell(sheet, id_col, row);
        if id.is_empty() {
            continue;
        }
        let enrollment = parse_count(sheet, enrollment_col, row, "enrollment", path)?;
        let instructor = cell(sheet, instructor_col, row);
        if instructor.is_empty() {
            return Err(ScheduleError::Data(format!(
                "{}: row {row}: course '{id}' has no instructor",
                path.display()
            )));
        }
        let preferred_rooms = preferred_col
            .map(|col| {
                cell(sheet, col, row)
                    .split(';')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        courses.push(Course {
            id,
            enrollment,
            instructor,
            preferred_rooms,
        });
    }

    ensure_unique("course", courses.iter().map(|c| c.id.as_str()), path)?;
    info!(count = courses.len(), path = %path.display(), "loaded courses");
    Ok(courses)
}

pub fn load_time_slots(path: &Path) -> Result<Vec<TimeSlot>, ScheduleError> {
    let book = read_book(path)?;
    let sheet = first_sheet(&book, path)?;
    let id_col = find_column(sheet, "time slot", path)?;

    let mut slots = Vec::new();
    for row in 2..=sheet.get_highest_row() {
        let id = cell(sheet, id_col, row);
        if id.is_empty() {
            continue;
        }
        slots.push(TimeSlot { id });
    }

    ensure_unique("time slot", slots.iter().map(|t| t.id.as_str()), path)?;
    info!(count = slots.len(), path = %path.display(), "loaded time slots");
    Ok(slots)
}

fn read_book(path: &Path) -> Result<Spreadsheet, ScheduleError> {
    umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|e| ScheduleError::Data(format!("{}: {e}", path.display())))
}

fn first_sheet<'a>(book: &'a Spreadsheet, path: &Path) -> Result<&'a Worksheet, ScheduleError> {
    book.get_sheet(&0)
        .ok_or_else(|| ScheduleError::Data(format!("{}: workbook has no sheets", path.display())))
}

fn find_column(sheet: &Worksheet, name: &str, path: &Path) -> Result<u32, ScheduleError> {
    locate_column(sheet, name).ok_or_else(|| {
        ScheduleError::Data(format!("{}: missing '{name}' column", path.display()))
    })
}

fn locate_column(sheet: &Worksheet, name: &str) -> Option<u32> {
    let aliases = HEADER_ALIASES.get(name).copied().unwrap_or(&[]);
    (1..=sheet.get_highest_column()).find(|&col| {
        let header = sheet.get_value((col, 1)).trim().to_ascii_lowercase();
        header == name || aliases.contains(&header.as_str())
    })
}

fn cell(sheet: &Worksheet, col: u32, row: u32) -> String {
    sheet.get_value((col, row)).trim().to_string()
}

fn parse_count(
    sheet: &Worksheet,
    col: u32,
    row: u32,
    field: &str,
    path: &Path,
) -> Result<u32, ScheduleError> {
    let raw = cell(sheet, col, row);
    if let Ok(value) = raw.parse::<u32>() {
        return Ok(value);
    }
    // Spreadsheet numerics may round-trip as floats.
    if let Ok(value) = raw.parse::<f64>() {
        if value >= 0.0 && value.fract() == 0.0 {
            return Ok(value as u32);
        }
    }
    Err(ScheduleError::Data(format!(
        "{}: row {row}: invalid {field} '{raw}'",
        path.display()
    )))
}

fn ensure_unique<'a>(
    kind: &str,
    ids: impl IntoIterator<Item = &'a str>,
    path: &Path,
) -> Result<(), ScheduleError> {
    let dupes = duplicate_ids(ids);
    if dupes.is_empty() {
        Ok(())
    } else {
        Err(ScheduleError::Data(format!(
            "{}: duplicate {kind} ids: {}",
            path.display(),
            dupes.join(", ")
        )))
    }
}
