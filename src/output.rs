//! Schedule sinks: the record table and the room-by-slot visualization.

use crate::catalog::Catalog;
use crate::schedule::Schedule;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, XlsxError};
use std::path::Path;

const HEADER_FILL: u32 = 0xD9E1F2;
const INSTRUCTOR_FILLS: [u32; 6] = [0xFCE4D6, 0xE2EFDA, 0xDDEBF7, 0xFFF2CC, 0xE4DFEC, 0xD6DCE4];

/// Writes the schedule as a flat record table, one row per course.
pub fn save_schedule(schedule: &Schedule, path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Schedule")?;

    let header = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL));
    for (col, title) in ["Course", "Room", "Time Slot", "Instructor"]
        .iter()
        .enumerate()
    {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (row, placement) in schedule.placements().iter().enumerate() {
        let row = (row + 1) as u32;
        sheet.write_string(row, 0, &placement.course)?;
        sheet.write_string(row, 1, &placement.room)?;
        sheet.write_string(row, 2, &placement.time_slot)?;
        sheet.write_string(row, 3, &placement.instructor)?;
    }

    sheet.autofit();
    workbook.save(path)?;
    Ok(())
}

/// Writes a room-by-timeslot grid with one fill color per instructor.
pub fn visualize_schedule(
    schedule: &Schedule,
    catalog: &Catalog,
    path: &Path,
) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Grid")?;

    let header = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_border(FormatBorder::Thin);

    sheet.write_string_with_format(0, 0, "Room", &header)?;
    for (t, slot) in catalog.time_slots().iter().enumerate() {
        sheet.write_string_with_format(0, (t + 1) as u16, &slot.id, &header)?;
    }
    for (r, room) in catalog.rooms().iter().enumerate() {
        sheet.write_string_with_format(
            (r + 1) as u32,
            0,
            format!("{} (cap {})", room.id, room.capacity),
            &header,
        )?;
    }

    for placement in schedule.placements() {
        let (Some(r), Some(t)) = (
            catalog.room_position(&placement.room),
            catalog.slot_position(&placement.time_slot),
        ) else {
            continue;
        };
        let fill = catalog
            .instructor_position(&placement.instructor)
            .map_or(0xFFFFFF, |i| INSTRUCTOR_FILLS[i % INSTRUCTOR_FILLS.len()]);
        let cell = Format::new()
            .set_background_color(Color::RGB(fill))
            .set_border(FormatBorder::Thin);
        sheet.write_string_with_format(
            (r + 1) as u32,
            (t + 1) as u16,
            format!("{} ({})", placement.course, placement.instructor),
            &cell,
        )?;
    }

    sheet.autofit();
    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Course, Room, TimeSlot};
    use crate::schedule::Placement;
    use std::path::PathBuf;

    fn sample_catalog() -> Catalog {
        Catalog::new(
            vec![Room::new("R30", 30), Room::new("R50", 50)],
            vec![Course::new("C1", 20, "A"), Course::new("C2", 40, "B")],
            vec![TimeSlot::new("T0"), TimeSlot::new("T1")],
        )
        .unwrap()
    }

    fn sample_schedule() -> Schedule {
        Schedule::new(vec![
            Placement {
                course: "C1".into(),
                room: "R30".into(),
                time_slot: "T0".into(),
                instructor: "A".into(),
            },
            Placement {
                course: "C2".into(),
                room: "R50".into(),
                time_slot: "T1".into(),
                instructor: "B".into(),
            },
        ])
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("slate_output_{name}_{}.xlsx", std::process::id()))
    }

    #[test]
    fn record_table_round_trips_through_a_reader() {
        let path = temp_path("table");
        save_schedule(&sample_schedule(), &path).unwrap();

        let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
        let sheet = book.get_sheet(&0).unwrap();
        assert_eq!(sheet.get_value((1, 1)), "Course");
        assert_eq!(sheet.get_value((1, 2)), "C1");
        assert_eq!(sheet.get_value((3, 3)), "T1");
        assert_eq!(sheet.get_value((4, 2)), "A");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn grid_places_courses_at_room_and_slot_cells() {
        let path = temp_path("grid");
        let catalog = sample_catalog();
        visualize_schedule(&sample_schedule(), &catalog, &path).unwrap();

        let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
        let sheet = book.get_sheet(&0).unwrap();
        // Row 2 is R30, column 2 is T0.
        assert_eq!(sheet.get_value((2, 2)), "C1 (A)");
        // Row 3 is R50, column 3 is T1.
        assert_eq!(sheet.get_value((3, 3)), "C2 (B)");
        assert_eq!(sheet.get_value((1, 3)), "R50 (cap 50)");

        let _ = std::fs::remove_file(&path);
    }
}
