//! Linear model representation and the external solver oracle.
//!
//! The model layer only *describes* an integer program: named linear
//! constraints appended to an exclusively-owned [`Model`], plus one current
//! objective. Searching for solutions is delegated to a [`SolverOracle`];
//! the default [`MilpOracle`] lowers the model to `good_lp` and never
//! implements branch-and-bound itself.

use crate::error::ScheduleError;
use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution, SolverModel, constraint,
    default_solver, variable,
};
use tracing::debug;

/// Position of a binary decision variable in the variable space.
pub type VarId = usize;

/// An integer-valued linear expression over the decision variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    terms: Vec<(VarId, i64)>,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a term. Zero coefficients are dropped.
    pub fn add_term(&mut self, var: VarId, coeff: i64) {
        if coeff != 0 {
            self.terms.push((var, coeff));
        }
    }

    pub fn terms(&self) -> &[(VarId, i64)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Optimization direction of the current objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Le,
    Ge,
}

/// A named linear constraint. Names are deterministic and unique, derived
/// from the entity ids involved, so solver diagnostics can reference them.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub name: String,
    pub expr: LinearExpr,
    pub op: Comparator,
    pub rhs: i64,
}

/// An append-only collection of named constraints plus one current
/// objective, over a fixed count of binary variables.
///
/// One `Model` belongs to exactly one optimization session. Constraints are
/// never removed, so "the model at step i" is a reproducible snapshot; the
/// objective is the only part that is replaced between solves.
#[derive(Debug, Clone)]
pub struct Model {
    num_vars: usize,
    constraints: Vec<Constraint>,
    objective: Option<(LinearExpr, Sense)>,
}

impl Model {
    pub fn new(num_vars: usize) -> Self {
        Self {
            num_vars,
            constraints: Vec::new(),
            objective: None,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn objective(&self) -> Option<(&LinearExpr, Sense)> {
        self.objective.as_ref().map(|(expr, sense)| (expr, *sense))
    }

    pub fn add_eq(&mut self, name: impl Into<String>, expr: LinearExpr, rhs: i64) {
        self.push(name.into(), expr, Comparator::Eq, rhs);
    }

    pub fn add_le(&mut self, name: impl Into<String>, expr: LinearExpr, rhs: i64) {
        self.push(name.into(), expr, Comparator::Le, rhs);
    }

    pub fn add_ge(&mut self, name: impl Into<String>, expr: LinearExpr, rhs: i64) {
        self.push(name.into(), expr, Comparator::Ge, rhs);
    }

    fn push(&mut self, name: String, expr: LinearExpr, op: Comparator, rhs: i64) {
        debug_assert!(expr.terms().iter().all(|(var, _)| *var < self.num_vars));
        self.constraints.push(Constraint {
            name,
            expr,
            op,
            rhs,
        });
    }

    pub fn set_objective(&mut self, expr: LinearExpr, sense: Sense) {
        self.objective = Some((expr, sense));
    }

    pub fn clear_objective(&mut self) {
        self.objective = None;
    }
}

/// Result of one oracle invocation. Backend failures are reported
/// separately as [`ScheduleError::Solver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A provably optimal assignment and the achieved objective value.
    /// With no objective set, the value is 0.
    Optimal {
        assignment: Vec<bool>,
        objective: i64,
    },
    /// The constraint set admits no assignment.
    Infeasible,
}

/// The external solving contract. Implementations own search strategy,
/// time limits, and all other solver configuration.
pub trait SolverOracle {
    fn solve(&self, model: &Model) -> Result<SolveOutcome, ScheduleError>;
}

/// Default oracle: lowers the model to a `good_lp` problem and solves it
/// with the crate's configured MILP backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct MilpOracle;

impl SolverOracle for MilpOracle {
    fn solve(&self, model: &Model) -> Result<SolveOutcome, ScheduleError> {
        let mut problem = ProblemVariables::new();
        let vars = problem.add_vector(variable().binary(), model.num_vars());

        let lower = |expr: &LinearExpr| -> Expression {
            expr.terms()
                .iter()
                .fold(Expression::from(0.0), |acc, (var, coeff)| {
                    acc + (*coeff as f64) * vars[*var]
                })
        };

        let (objective, sense) = match model.objective() {
            Some((expr, sense)) => (lower(expr), sense),
            None => (Expression::from(0.0), Sense::Minimize),
        };

        let mut solver_model = match sense {
            Sense::Minimize => problem.minimise(objective.clone()),
            Sense::Maximize => problem.maximise(objective.clone()),
        }
        .using(default_solver);

        for c in model.constraints() {
            let lhs = lower(&c.expr);
            let rhs = c.rhs as f64;
            solver_model.add_constraint(match c.op {
                Comparator::Eq => constraint!(lhs == rhs),
                Comparator::Le => constraint!(lhs <= rhs),
                Comparator::Ge => constraint!(lhs >= rhs),
            });
        }

        debug!(
            variables = model.num_vars(),
            constraints = model.constraints().len(),
            "invoking milp backend"
        );

        match solver_model.solve() {
            Ok(solution) => {
                let assignment = vars.iter().map(|v| solution.value(*v) > 0.5).collect();
                let objective = solution.eval(objective).round() as i64;
                Ok(SolveOutcome::Optimal {
                    assignment,
                    objective,
                })
            }
            Err(ResolutionError::Infeasible) => Ok(SolveOutcome::Infeasible),
            Err(e) => Err(ScheduleError::Solver(e.to_string())),
        }
    }
}
