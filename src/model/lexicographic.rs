//! The lexicographic optimization loop.
//!
//! One oracle call per priority step. After each step the achieved optimal
//! value is pinned with a permanent equality (a freeze constraint), so
//! later objectives may only choose among solutions that are optimal for
//! every earlier one. Objective expressions are sums of binary variables
//! or integer enrollments, so the freezes are exact integer equalities.

use super::extract::extract_schedule;
use super::model_constraints::HardConstraint;
use super::model_context::ModelBuilderContext;
use super::model_objectives::Objective;
use crate::catalog::Catalog;
use crate::error::ScheduleError;
use crate::schedule::Schedule;
use crate::solver::{SolveOutcome, SolverOracle};
use tracing::{debug, info};

/// Optimizes a schedule for the catalog under the fixed base constraint
/// set, refining among feasible schedules in the given objective priority
/// order.
///
/// With no objectives this is a single feasibility solve. A failure at any
/// priority step is terminal: the session's model is discarded with it,
/// and a retry starts a fresh call.
///
/// Ties at a priority level are broken arbitrarily by the oracle; only the
/// achieved values are guaranteed stable across identical calls.
pub fn lexicographic_schedule<S: SolverOracle>(
    catalog: &Catalog,
    objectives: &[Objective],
    oracle: &S,
) -> Result<Schedule, ScheduleError> {
    let mut ctx = ModelBuilderContext::new(catalog)?;

    let mut emitted = 0;
    for constraint in HardConstraint::base_set() {
        emitted += constraint.apply(&mut ctx);
    }
    debug!(
        variables = ctx.keys.len(),
        constraints = emitted,
        "base model ready"
    );

    if objectives.is_empty() {
        return match oracle.solve(&ctx.model)? {
            SolveOutcome::Optimal { assignment, .. } => extract_schedule(&ctx, &assignment),
            SolveOutcome::Infeasible => Err(ScheduleError::Infeasible(
                "base constraint set admits no assignment".into(),
            )),
        };
    }

    let mut final_assignment = None;
    for (step, objective) in objectives.iter().enumerate() {
        let expr = objective.expression(&ctx)?;
        ctx.model.set_objective(expr.clone(), objective.sense());

        match oracle.solve(&ctx.model)? {
            SolveOutcome::Optimal {
                assignment,
                objective: achieved,
            } => {
                info!(step, objective = %objective.label(), value = achieved, "priority step solved");
                // Pin the achieved value for every later solve.
                ctx.model.add_eq(
                    format!("lex_freeze_{}_{}", step, objective.label()),
                    expr,
                    achieved,
                );
                final_assignment = Some(assignment);
            }
            SolveOutcome::Infeasible => {
                return Err(ScheduleError::Infeasible(format!(
                    "priority step {} ({})",
                    step,
                    objective.label()
                )));
            }
        }
    }

    let assignment = final_assignment.ok_or_else(|| {
        ScheduleError::ModelBuild("lexicographic loop produced no assignment".into())
    })?;
    extract_schedule(&ctx, &assignment)
}
