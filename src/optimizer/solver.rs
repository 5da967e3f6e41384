//! External LP solver seam.
//!
//! [`LpSolver`] is the contract the meal model depends on; [`MicroLpSolver`]
//! implements it with `good_lp`'s pure-Rust microlp backend.

use good_lp::solvers::microlp::microlp;
use good_lp::{
    constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};
use tracing::debug;

use crate::error::{MealError, Result};
use crate::optimizer::program::{LinearExpr, LinearProgram, Objective, Sense};

/// A linear program solver.
///
/// Returns one value per program variable on success, [`MealError::Infeasible`]
/// when no point satisfies the program, or [`MealError::SolverFault`] for any
/// other solver failure.
pub trait LpSolver {
    /// Solver name for logging.
    fn name(&self) -> &'static str;

    fn solve(&self, program: &LinearProgram) -> Result<Vec<f64>>;
}

/// Simplex solver backed by `good_lp` + microlp.
#[derive(Debug, Default, Clone, Copy)]
pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl LpSolver for MicroLpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, program: &LinearProgram) -> Result<Vec<f64>> {
        let n = program.num_vars();
        debug!(
            solver = self.name(),
            variables = n,
            constraints = program.constraints.len(),
            "solving linear program"
        );

        if n == 0 {
            return solve_empty(program);
        }

        let mut vars = ProblemVariables::new();
        let var_list: Vec<Variable> = program
            .variables
            .iter()
            .map(|b| vars.add(variable().min(b.lower).max(b.upper)))
            .collect();

        // Min-max and max-min are reduced with one free epigraph variable.
        let (objective, epigraph) = match &program.objective {
            Objective::None => (Expression::from(0.0), None),
            Objective::Minimize(expr) => (to_expression(expr, &var_list)?, None),
            Objective::MinimizeMax(exprs) | Objective::MinimizeNegatedMin(exprs)
                if exprs.is_empty() =>
            {
                (Expression::from(0.0), None)
            }
            Objective::MinimizeMax(_) => {
                let z = vars.add(variable());
                (Expression::from(z), Some(z))
            }
            Objective::MinimizeNegatedMin(_) => {
                let w = vars.add(variable());
                (-1.0 * w, Some(w))
            }
        };

        let mut model = vars.minimise(objective).using(microlp);

        for row in &program.constraints {
            let lhs = to_expression(&row.expr, &var_list)?;
            model = match row.sense {
                Sense::LessEqual => model.with(constraint::leq(lhs, row.rhs)),
                Sense::GreaterEqual => model.with(constraint::geq(lhs, row.rhs)),
                Sense::Equal => model.with(constraint::eq(lhs, row.rhs)),
            };
        }

        if let Some(bound) = epigraph {
            match &program.objective {
                Objective::MinimizeMax(exprs) => {
                    for expr in exprs {
                        model = model.with(constraint::geq(bound, to_expression(expr, &var_list)?));
                    }
                }
                Objective::MinimizeNegatedMin(exprs) => {
                    for expr in exprs {
                        model = model.with(constraint::leq(bound, to_expression(expr, &var_list)?));
                    }
                }
                Objective::None | Objective::Minimize(_) => {}
            }
        }

        match model.solve() {
            Ok(solution) => Ok(var_list.iter().map(|v| solution.value(*v)).collect()),
            Err(ResolutionError::Infeasible) => {
                debug!(solver = self.name(), "program is infeasible");
                Err(MealError::Infeasible)
            }
            Err(other) => {
                debug!(solver = self.name(), "solver failed: {}", other);
                Err(MealError::SolverFault(other.to_string()))
            }
        }
    }
}

/// A program with no variables is feasible iff every row holds for constants.
fn solve_empty(program: &LinearProgram) -> Result<Vec<f64>> {
    if program.is_feasible(&[], 1e-9) {
        Ok(Vec::new())
    } else {
        Err(MealError::Infeasible)
    }
}

fn to_expression(expr: &LinearExpr, vars: &[Variable]) -> Result<Expression> {
    let mut out = Expression::from(expr.constant);
    for &(index, coefficient) in &expr.terms {
        let var = vars.get(index).ok_or_else(|| {
            MealError::SolverFault(format!("expression references unknown variable {}", index))
        })?;
        out += coefficient * *var;
    }
    Ok(out)
}
