//! Timetable CLI: load catalogs, optimize, write the schedule.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use slate_core::catalog::Catalog;
use slate_core::model::{Objective, lexicographic_schedule};
use slate_core::solver::MilpOracle;
use slate_core::{loading, output, schedule};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "slate")]
#[command(version)]
#[command(about = "Course timetable optimizer")]
struct Cli {
    /// Room catalog workbook
    #[arg(long, default_value = "input/rooms.xlsx")]
    rooms: PathBuf,

    /// Course catalog workbook
    #[arg(long, default_value = "input/courses.xlsx")]
    courses: PathBuf,

    /// Time-slot catalog workbook
    #[arg(long = "time-slots", default_value = "input/time_slots.xlsx")]
    time_slots: PathBuf,

    /// Output schedule workbook
    #[arg(long, default_value = "output/schedule.xlsx")]
    out: PathBuf,

    /// Optional room-by-slot visualization workbook
    #[arg(long)]
    visual: Option<PathBuf>,

    /// Optional binary schedule snapshot
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Objectives in priority order: min-before=SLOT, min-after=SLOT,
    /// or prefer-rooms (uses the course catalog's preferred-room column)
    #[arg(long = "objective", value_name = "SPEC")]
    objectives: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_objective(spec: &str, catalog: &Catalog) -> Result<Objective> {
    if let Some(slot) = spec.strip_prefix("min-before=") {
        return Ok(Objective::MinimizeClassesBefore(slot.to_string()));
    }
    if let Some(slot) = spec.strip_prefix("min-after=") {
        return Ok(Objective::MinimizeClassesAfter(slot.to_string()));
    }
    if spec == "prefer-rooms" {
        return Ok(Objective::MaximizePreferredRooms(preference_from_catalog(
            catalog,
        )));
    }
    bail!("unrecognized objective '{spec}' (expected min-before=SLOT, min-after=SLOT, or prefer-rooms)")
}

fn preference_from_catalog(catalog: &Catalog) -> BTreeMap<String, BTreeSet<String>> {
    catalog
        .courses()
        .iter()
        .filter(|course| !course.preferred_rooms.is_empty())
        .map(|course| {
            (
                course.id.clone(),
                course.preferred_rooms.iter().cloned().collect(),
            )
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let rooms = loading::load_rooms(&cli.rooms)?;
    let courses = loading::load_courses(&cli.courses)?;
    let time_slots = loading::load_time_slots(&cli.time_slots)?;
    let catalog = Catalog::new(rooms, courses, time_slots)?;

    let objectives = cli
        .objectives
        .iter()
        .map(|spec| parse_objective(spec, &catalog))
        .collect::<Result<Vec<_>>>()?;

    let result = lexicographic_schedule(&catalog, &objectives, &MilpOracle)?;
    info!(placements = result.len(), "schedule optimized");

    output::save_schedule(&result, &cli.out)
        .with_context(|| format!("writing {}", cli.out.display()))?;
    info!(path = %cli.out.display(), "schedule saved");

    if let Some(path) = &cli.visual {
        output::visualize_schedule(&result, &catalog, path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "visualization saved");
    }

    if let Some(path) = &cli.snapshot {
        schedule::save_snapshot(&result, path)
            .map_err(|e| anyhow::anyhow!("writing {}: {e}", path.display()))?;
        info!(path = %path.display(), "snapshot saved");
    }

    Ok(())
}
