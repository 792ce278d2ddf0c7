//! Secondary objectives, refined lexicographically over feasible schedules.

use super::model_context::{DecisionKey, KeyFilter, ModelBuilderContext, filter_keys, var_index};
use crate::error::ScheduleError;
use crate::solver::{LinearExpr, Sense};
use std::collections::{BTreeMap, BTreeSet};

/// An objective over the shared variable space. No variant introduces new
/// decision variables; each one scores a subset of the existing keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Objective {
    /// Count of assignments strictly before the threshold slot; minimized.
    MinimizeClassesBefore(String),
    /// Count of assignments strictly after the threshold slot; minimized.
    MinimizeClassesAfter(String),
    /// Count of assignments landing in a course's preferred rooms;
    /// maximized. Maps course id to its preferred room ids.
    MaximizePreferredRooms(BTreeMap<String, BTreeSet<String>>),
}

impl Objective {
    pub fn sense(&self) -> Sense {
        match self {
            Objective::MinimizeClassesBefore(_) | Objective::MinimizeClassesAfter(_) => {
                Sense::Minimize
            }
            Objective::MaximizePreferredRooms(_) => Sense::Maximize,
        }
    }

    /// Deterministic tag used in freeze-constraint names and logs.
    pub fn label(&self) -> String {
        match self {
            Objective::MinimizeClassesBefore(slot) => format!("minimize_classes_before_{slot}"),
            Objective::MinimizeClassesAfter(slot) => format!("minimize_classes_after_{slot}"),
            Objective::MaximizePreferredRooms(_) => "maximize_preferred_rooms".to_string(),
        }
    }

    pub fn expression(&self, ctx: &ModelBuilderContext<'_>) -> Result<LinearExpr, ScheduleError> {
        match self {
            Objective::MinimizeClassesBefore(slot) => {
                let threshold = resolve_slot(ctx, slot)?;
                Ok(sum_keys(ctx, move |key: DecisionKey| key.time_slot < threshold))
            }
            Objective::MinimizeClassesAfter(slot) => {
                let threshold = resolve_slot(ctx, slot)?;
                Ok(sum_keys(ctx, move |key: DecisionKey| key.time_slot > threshold))
            }
            Objective::MaximizePreferredRooms(preference) => {
                let preferred = resolve_preference(ctx, preference)?;
                Ok(sum_keys(ctx, move |key: DecisionKey| {
                    preferred[key.course].contains(&key.room)
                }))
            }
        }
    }
}

fn resolve_slot(ctx: &ModelBuilderContext<'_>, slot: &str) -> Result<usize, ScheduleError> {
    ctx.catalog.slot_position(slot).ok_or_else(|| {
        ScheduleError::ModelBuild(format!("unknown time slot '{slot}' in objective threshold"))
    })
}

/// Course-position-indexed sets of preferred room positions.
fn resolve_preference(
    ctx: &ModelBuilderContext<'_>,
    preference: &BTreeMap<String, BTreeSet<String>>,
) -> Result<Vec<BTreeSet<usize>>, ScheduleError> {
    let mut preferred = vec![BTreeSet::new(); ctx.catalog.courses().len()];
    for (course_id, rooms) in preference {
        let c = ctx.catalog.course_position(course_id).ok_or_else(|| {
            ScheduleError::ModelBuild(format!("unknown course '{course_id}' in room preference"))
        })?;
        for room_id in rooms {
            let r = ctx.catalog.room_position(room_id).ok_or_else(|| {
                ScheduleError::ModelBuild(format!("unknown room '{room_id}' in room preference"))
            })?;
            preferred[c].insert(r);
        }
    }
    Ok(preferred)
}

fn sum_keys(ctx: &ModelBuilderContext<'_>, predicate: impl Fn(DecisionKey) -> bool + 'static) -> LinearExpr {
    let mut expr = LinearExpr::new();
    for key in filter_keys(&ctx.keys, KeyFilter::any(), Some(&predicate)) {
        expr.add_term(var_index(ctx.catalog, key), 1);
    }
    expr
}
