//! Hard feasibility constraints.
//!
//! The four variants below form the fixed base constraint set: always
//! applied, in a fixed order, independent of which objectives follow.

use super::model_context::{KeyFilter, ModelBuilderContext, filter_keys, make_overlap_predicate, var_index};
use crate::solver::LinearExpr;

/// A hard-constraint family. `apply` populates the context's model and
/// returns the number of atomic constraints emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardConstraint {
    /// Each course gets exactly one (room, timeslot) assignment.
    AssignAllCourses,
    /// An instructor teaches at most one course per time slot.
    NoInstructorOverlap,
    /// A room hosts at most one course per time slot.
    NoRoomOverlap,
    /// Scheduled enrollment never exceeds room capacity.
    RoomCapacity,
}

impl HardConstraint {
    /// The full base set, in application order.
    pub fn base_set() -> [HardConstraint; 4] {
        [
            HardConstraint::AssignAllCourses,
            HardConstraint::NoInstructorOverlap,
            HardConstraint::NoRoomOverlap,
            HardConstraint::RoomCapacity,
        ]
    }

    pub fn apply(&self, ctx: &mut ModelBuilderContext<'_>) -> usize {
        match self {
            HardConstraint::AssignAllCourses => apply_assign_all_courses(ctx),
            HardConstraint::NoInstructorOverlap => apply_no_instructor_overlap(ctx),
            HardConstraint::NoRoomOverlap => apply_no_room_overlap(ctx),
            HardConstraint::RoomCapacity => apply_room_capacity(ctx),
        }
    }
}

fn apply_assign_all_courses(ctx: &mut ModelBuilderContext<'_>) -> usize {
    let catalog = ctx.catalog;
    let keys = &ctx.keys;
    let model = &mut ctx.model;
    let mut count = 0;
    for (c, course) in catalog.courses().iter().enumerate() {
        let mut expr = LinearExpr::new();
        for key in filter_keys(keys, KeyFilter::any().course(c), None) {
            expr.add_term(var_index(catalog, key), 1);
        }
        model.add_eq(format!("assign_course_{}", course.id), expr, 1);
        count += 1;
    }
    count
}

fn apply_no_instructor_overlap(ctx: &mut ModelBuilderContext<'_>) -> usize {
    let catalog = ctx.catalog;
    let keys = &ctx.keys;
    let teaching = &ctx.teaching;
    let model = &mut ctx.model;
    let mut count = 0;
    for (i, instructor) in catalog.instructors().iter().enumerate() {
        for (t, slot) in catalog.time_slots().iter().enumerate() {
            let at_slot = make_overlap_predicate(t, None);
            let mut expr = LinearExpr::new();
            for key in filter_keys(keys, KeyFilter::any(), Some(&*at_slot)) {
                expr.add_term(var_index(catalog, key), teaching.value(i, key.course));
            }
            model.add_le(
                format!("no_instructor_overlap_{}_{}", instructor, slot.id),
                expr,
                1,
            );
            count += 1;
        }
    }
    count
}

fn apply_no_room_overlap(ctx: &mut ModelBuilderContext<'_>) -> usize {
    let catalog = ctx.catalog;
    let keys = &ctx.keys;
    let model = &mut ctx.model;
    let mut count = 0;
    for (r, room) in catalog.rooms().iter().enumerate() {
        for (t, slot) in catalog.time_slots().iter().enumerate() {
            let co_occurring = make_overlap_predicate(t, Some(r));
            let mut expr = LinearExpr::new();
            for key in filter_keys(keys, KeyFilter::any(), Some(&*co_occurring)) {
                expr.add_term(var_index(catalog, key), 1);
            }
            model.add_le(format!("no_room_overlap_{}_{}", room.id, slot.id), expr, 1);
            count += 1;
        }
    }
    count
}

fn apply_room_capacity(ctx: &mut ModelBuilderContext<'_>) -> usize {
    let catalog = ctx.catalog;
    let keys = &ctx.keys;
    let model = &mut ctx.model;
    let mut count = 0;
    for (r, room) in catalog.rooms().iter().enumerate() {
        for (t, slot) in catalog.time_slots().iter().enumerate() {
            let mut expr = LinearExpr::new();
            for key in filter_keys(keys, KeyFilter::any().room(r).time_slot(t), None) {
                let enrollment = i64::from(catalog.courses()[key.course].enrollment);
                expr.add_term(var_index(catalog, key), enrollment);
            }
            model.add_le(
                format!("room_capacity_{}_{}", room.id, slot.id),
                expr,
                i64::from(room.capacity),
            );
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Course, Room, TimeSlot};
    use crate::solver::Comparator;

    fn context(catalog: &Catalog) -> ModelBuilderContext<'_> {
        ModelBuilderContext::new(catalog).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![Room::new("R30", 30), Room::new("R50", 50)],
            vec![
                Course::new("C1", 20, "A"),
                Course::new("C2", 40, "A"),
                Course::new("C3", 25, "B"),
            ],
            vec![TimeSlot::new("T0"), TimeSlot::new("T1")],
        )
        .unwrap()
    }

    #[test]
    fn base_set_emits_one_constraint_per_entity_pair() {
        let catalog = catalog();
        let mut ctx = context(&catalog);

        let counts: Vec<_> = HardConstraint::base_set()
            .iter()
            .map(|c| c.apply(&mut ctx))
            .collect();

        // 3 courses; 2 instructors x 2 slots; 2 rooms x 2 slots, twice.
        assert_eq!(counts, [3, 4, 4, 4]);
        assert_eq!(ctx.model.constraints().len(), 15);
    }

    #[test]
    fn constraint_names_are_deterministic_and_unique() {
        let catalog = catalog();
        let mut ctx = context(&catalog);
        for constraint in HardConstraint::base_set() {
            constraint.apply(&mut ctx);
        }

        let names: Vec<_> = ctx
            .model
            .constraints()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());

        assert!(names.contains(&"assign_course_C2".to_string()));
        assert!(names.contains(&"no_instructor_overlap_A_T1".to_string()));
        assert!(names.contains(&"no_room_overlap_R30_T0".to_string()));
        assert!(names.contains(&"room_capacity_R50_T1".to_string()));
    }

    #[test]
    fn assignment_rows_cover_each_course_exactly_once() {
        let catalog = catalog();
        let mut ctx = context(&catalog);
        HardConstraint::AssignAllCourses.apply(&mut ctx);

        for constraint in ctx.model.constraints() {
            assert_eq!(constraint.op, Comparator::Eq);
            assert_eq!(constraint.rhs, 1);
            // One term per (room, timeslot) cell.
            assert_eq!(constraint.expr.terms().len(), 4);
        }
    }

    #[test]
    fn instructor_rows_only_weight_taught_courses() {
        let catalog = catalog();
        let mut ctx = context(&catalog);
        HardConstraint::NoInstructorOverlap.apply(&mut ctx);

        // Instructor A teaches two courses: 2 courses x 2 rooms per slot.
        let row_a = &ctx.model.constraints()[0];
        assert_eq!(row_a.name, "no_instructor_overlap_A_T0");
        assert_eq!(row_a.expr.terms().len(), 4);

        // Instructor B teaches one course.
        let row_b = ctx
            .model
            .constraints()
            .iter()
            .find(|c| c.name == "no_instructor_overlap_B_T0")
            .unwrap();
        assert_eq!(row_b.expr.terms().len(), 2);
    }

    #[test]
    fn capacity_rows_bound_by_room_capacity() {
        let catalog = catalog();
        let mut ctx = context(&catalog);
        HardConstraint::RoomCapacity.apply(&mut ctx);

        let row = ctx
            .model
            .constraints()
            .iter()
            .find(|c| c.name == "room_capacity_R30_T0")
            .unwrap();
        assert_eq!(row.rhs, 30);
        // Enrollment coefficients for the three courses.
        let coeffs: Vec<_> = row.expr.terms().iter().map(|(_, c)| *c).collect();
        assert_eq!(coeffs, [20, 40, 25]);
    }
}
