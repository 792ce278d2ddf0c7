//! Course timetabling with integer linear programming.
//!
//! Assigns courses to rooms and time slots under hard feasibility
//! constraints (every course placed once, no instructor or room
//! double-booking, room capacity respected), then refines among feasible
//! schedules by lexicographic optimization: one solve per objective, each
//! achieved value frozen before the next objective runs.
//!
//! The solver itself is an external oracle behind [`solver::SolverOracle`];
//! the default backend lowers the model to `good_lp`.

pub mod catalog;
pub mod error;
pub mod loading;
pub mod model;
pub mod output;
pub mod schedule;
pub mod solver;

pub use catalog::{Catalog, Course, Room, TimeSlot};
pub use error::ScheduleError;
pub use model::{Objective, lexicographic_schedule};
pub use schedule::{Placement, Schedule};
pub use solver::{MilpOracle, SolverOracle};
