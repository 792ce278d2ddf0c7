//! The decision variable space and the shared model-building context.
//!
//! One binary variable exists per (course, room, timeslot) triple; the key
//! universe is the full cross product, built once per session. Everything
//! above this layer selects keys through [`filter_keys`] instead of
//! re-deriving the cross product.

use crate::catalog::Catalog;
use crate::error::ScheduleError;
use crate::solver::{Model, VarId};

/// Identifies one binary assignment variable: catalog positions of a
/// course, a room, and a time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecisionKey {
    pub course: usize,
    pub room: usize,
    pub time_slot: usize,
}

/// A first-class boolean test over decision keys.
pub type KeyPredicate = dyn Fn(DecisionKey) -> bool;

/// Fixed-field equality filters for [`filter_keys`]. Unset fields match
/// everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyFilter {
    course: Option<usize>,
    room: Option<usize>,
    time_slot: Option<usize>,
}

impl KeyFilter {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn course(mut self, course: usize) -> Self {
        self.course = Some(course);
        self
    }

    pub fn room(mut self, room: usize) -> Self {
        self.room = Some(room);
        self
    }

    pub fn time_slot(mut self, time_slot: usize) -> Self {
        self.time_slot = Some(time_slot);
        self
    }

    fn matches(&self, key: DecisionKey) -> bool {
        self.course.is_none_or(|c| c == key.course)
            && self.room.is_none_or(|r| r == key.room)
            && self.time_slot.is_none_or(|t| t == key.time_slot)
    }
}

/// The single selection primitive used by every constraint and objective:
/// keys matching all fixed-field filters AND satisfying `predicate` if one
/// is supplied.
pub fn filter_keys<'a>(
    keys: &'a [DecisionKey],
    filter: KeyFilter,
    predicate: Option<&'a KeyPredicate>,
) -> impl Iterator<Item = DecisionKey> + 'a {
    keys.iter()
        .copied()
        .filter(move |&key| filter.matches(key) && predicate.is_none_or(|p| p(key)))
}

/// Predicate matching keys at the given time slot (and in the given room,
/// if one is supplied). Used to express "no two co-occurring assignments"
/// constraints generically.
pub fn make_overlap_predicate(time_slot: usize, room: Option<usize>) -> Box<KeyPredicate> {
    Box::new(move |key: DecisionKey| {
        key.time_slot == time_slot && room.is_none_or(|r| r == key.room)
    })
}

/// Canonical variable position of a key in the cross-product ordering.
pub fn var_index(catalog: &Catalog, key: DecisionKey) -> VarId {
    (key.course * catalog.rooms().len() + key.room) * catalog.time_slots().len() + key.time_slot
}

/// Dense (instructor, course) teaching matrix: 1 iff the instructor
/// teaches the course. Total over all pairs.
#[derive(Debug, Clone)]
pub struct TeachingIndicator {
    matrix: Vec<Vec<u8>>,
}

impl TeachingIndicator {
    fn build(catalog: &Catalog) -> Self {
        let matrix = catalog
            .instructors()
            .iter()
            .map(|instructor| {
                catalog
                    .courses()
                    .iter()
                    .map(|course| u8::from(&course.instructor == instructor))
                    .collect()
            })
            .collect();
        Self { matrix }
    }

    pub fn teaches(&self, instructor: usize, course: usize) -> bool {
        self.matrix[instructor][course] == 1
    }

    pub fn value(&self, instructor: usize, course: usize) -> i64 {
        i64::from(self.matrix[instructor][course])
    }
}

/// Shared state for one model-building session: the catalog, the key
/// universe, the teaching indicator, and the model being populated.
///
/// Constraints and objectives receive this context explicitly; there is no
/// ambient scheduler state. One context (and its model) serves exactly one
/// optimization session.
#[derive(Debug)]
pub struct ModelBuilderContext<'a> {
    pub catalog: &'a Catalog,
    pub keys: Vec<DecisionKey>,
    pub teaching: TeachingIndicator,
    pub model: Model,
}

impl<'a> ModelBuilderContext<'a> {
    pub fn new(catalog: &'a Catalog) -> Result<Self, ScheduleError> {
        for course in catalog.courses() {
            if course.instructor.trim().is_empty()
                || catalog.instructor_position(&course.instructor).is_none()
            {
                return Err(ScheduleError::ModelBuild(format!(
                    "course '{}' has no resolvable instructor",
                    course.id
                )));
            }
        }

        let keys = build_keys(catalog);
        let teaching = TeachingIndicator::build(catalog);
        let model = Model::new(keys.len());
        Ok(Self {
            catalog,
            keys,
            teaching,
            model,
        })
    }
}

fn build_keys(catalog: &Catalog) -> Vec<DecisionKey> {
    let mut keys =
        Vec::with_capacity(catalog.courses().len() * catalog.rooms().len() * catalog.time_slots().len());
    for course in 0..catalog.courses().len() {
        for room in 0..catalog.rooms().len() {
            for time_slot in 0..catalog.time_slots().len() {
                keys.push(DecisionKey {
                    course,
                    room,
                    time_slot,
                });
            }
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Course, Room, TimeSlot};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![Room::new("R1", 30), Room::new("R2", 50)],
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
    fn builds_the_full_cross_product() {
        let catalog = catalog();
        let ctx = ModelBuilderContext::new(&catalog).unwrap();
        assert_eq!(ctx.keys.len(), 3 * 2 * 2);
        assert_eq!(ctx.model.num_vars(), ctx.keys.len());
    }

    #[test]
    fn var_index_matches_key_order() {
        let catalog = catalog();
        let ctx = ModelBuilderContext::new(&catalog).unwrap();
        for (position, key) in ctx.keys.iter().enumerate() {
            assert_eq!(var_index(&catalog, *key), position);
        }
    }

    #[test]
    fn fixed_field_filters_compose_with_predicates() {
        let catalog = catalog();
        let ctx = ModelBuilderContext::new(&catalog).unwrap();

        let course_only: Vec<_> =
            filter_keys(&ctx.keys, KeyFilter::any().course(1), None).collect();
        assert_eq!(course_only.len(), 2 * 2);
        assert!(course_only.iter().all(|k| k.course == 1));

        let late = make_overlap_predicate(1, None);
        let course_and_slot: Vec<_> =
            filter_keys(&ctx.keys, KeyFilter::any().course(1), Some(&*late)).collect();
        assert_eq!(course_and_slot.len(), 2);
        assert!(course_and_slot.iter().all(|k| k.time_slot == 1));
    }

    #[test]
    fn overlap_predicate_narrows_by_room() {
        let catalog = catalog();
        let ctx = ModelBuilderContext::new(&catalog).unwrap();

        let in_room = make_overlap_predicate(0, Some(1));
        let hits: Vec<_> = filter_keys(&ctx.keys, KeyFilter::any(), Some(&*in_room)).collect();
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|k| k.room == 1 && k.time_slot == 0));
    }

    #[test]
    fn teaching_indicator_is_total_and_correct() {
        let catalog = catalog();
        let ctx = ModelBuilderContext::new(&catalog).unwrap();

        assert!(ctx.teaching.teaches(0, 0));
        assert!(ctx.teaching.teaches(0, 1));
        assert!(!ctx.teaching.teaches(0, 2));
        assert!(ctx.teaching.teaches(1, 2));
        assert_eq!(ctx.teaching.value(1, 0), 0);
    }

    #[test]
    fn blank_instructor_is_a_model_build_error() {
        let catalog = Catalog::new(
            vec![Room::new("R1", 30)],
            vec![Course::new("C1", 20, "  ")],
            vec![TimeSlot::new("T0")],
        )
        .unwrap();

        let err = ModelBuilderContext::new(&catalog).unwrap_err();
        assert!(matches!(err, ScheduleError::ModelBuild(_)));
    }
}
