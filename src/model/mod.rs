//! Model building, constraint, and objective logic for the timetabling solver.

mod extract;
mod lexicographic;
mod model_constraints;
mod model_context;
mod model_objectives;

pub use extract::extract_schedule;
pub use lexicographic::lexicographic_schedule;
pub use model_constraints::HardConstraint;
pub use model_context::{
    DecisionKey, KeyFilter, KeyPredicate, ModelBuilderContext, TeachingIndicator, filter_keys,
    make_overlap_predicate, var_index,
};
pub use model_objectives::Objective;
