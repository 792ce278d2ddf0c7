//! Error taxonomy for the timetabling pipeline.

use std::fmt;

/// Terminal failures surfaced by the library.
///
/// There are no automatic retries anywhere: a failed optimization run
/// discards its model, and callers start a fresh session if they want to
/// try again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Duplicate, missing, or malformed entity data detected at load or
    /// catalog-construction time, before any model exists.
    Data(String),
    /// An inconsistency in derived data (unresolvable instructor, unknown
    /// threshold slot, missing assignment at extraction). Unreachable with
    /// a consistent catalog, but checked rather than assumed.
    ModelBuild(String),
    /// The constraint set admits no assignment, either for the base model
    /// or mid-sequence once freeze constraints have accumulated.
    Infeasible(String),
    /// The solver backend itself failed.
    Solver(String),
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::Data(msg) => write!(f, "data error: {msg}"),
            ScheduleError::ModelBuild(msg) => write!(f, "model build error: {msg}"),
            ScheduleError::Infeasible(msg) => write!(f, "no feasible schedule: {msg}"),
            ScheduleError::Solver(msg) => write!(f, "solver error: {msg}"),
        }
    }
}

impl std::error::Error for ScheduleError {}
