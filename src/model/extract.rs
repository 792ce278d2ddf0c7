//! Converts a solved assignment into schedule records.

use super::model_context::{KeyFilter, ModelBuilderContext, filter_keys, var_index};
use crate::error::ScheduleError;
use crate::schedule::{Placement, Schedule};

/// One record per course, in course insertion order. `AssignAllCourses`
/// guarantees exactly one selected key per course; a course without one is
/// still checked and reported rather than assumed away.
pub fn extract_schedule(
    ctx: &ModelBuilderContext<'_>,
    assignment: &[bool],
) -> Result<Schedule, ScheduleError> {
    let catalog = ctx.catalog;
    let mut placements = Vec::with_capacity(catalog.courses().len());

    for (c, course) in catalog.courses().iter().enumerate() {
        let chosen = filter_keys(&ctx.keys, KeyFilter::any().course(c), None)
            .find(|&key| assignment.get(var_index(catalog, key)).copied().unwrap_or(false));
        let key = chosen.ok_or_else(|| {
            ScheduleError::ModelBuild(format!(
                "course '{}' has no assignment in the solved model",
                course.id
            ))
        })?;

        placements.push(Placement {
            course: course.id.clone(),
            room: catalog.rooms()[key.room].id.clone(),
            time_slot: catalog.time_slots()[key.time_slot].id.clone(),
            instructor: course.instructor.clone(),
        });
    }

    Ok(Schedule::new(placements))
}
