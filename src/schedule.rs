//! Schedule records and binary snapshot persistence.

use savefile_derive::Savefile;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Snapshot format version for [`save_snapshot`] / [`load_snapshot`].
const SNAPSHOT_VERSION: u32 = 0;

/// One scheduled course: where, when, and who teaches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Savefile)]
pub struct Placement {
    pub course: String,
    pub room: String,
    pub time_slot: String,
    pub instructor: String,
}

/// A finalized schedule, one placement per course in course insertion
/// order. Immutable after creation; produced once per successful
/// optimization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Savefile)]
pub struct Schedule {
    placements: Vec<Placement>,
}

impl Schedule {
    pub fn new(placements: Vec<Placement>) -> Self {
        Self { placements }
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter()
    }
}

/// Persists a schedule as a versioned binary snapshot.
pub fn save_snapshot(schedule: &Schedule, path: &Path) -> Result<(), savefile::SavefileError> {
    savefile::save_file(path, SNAPSHOT_VERSION, schedule)
}

/// Loads a schedule snapshot written by [`save_snapshot`].
pub fn load_snapshot(path: &Path) -> Result<Schedule, savefile::SavefileError> {
    savefile::load_file(path, SNAPSHOT_VERSION)
}
