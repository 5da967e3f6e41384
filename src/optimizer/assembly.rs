//! Translation of a meal into a [`LinearProgram`].
//!
//! Variables `0..n` are the ingredient grams in insertion order. Auxiliary
//! deviation variables, when needed, are appended after them.

use tracing::debug;

use crate::error::{MealError, Result};
use crate::models::IngredientChoice;
use crate::optimizer::constants::OPTIMIZER_MAX;
use crate::optimizer::meal::MealModel;
use crate::optimizer::nutrient::Nutrient;
use crate::optimizer::objective::{ObjectiveMode, ObjectiveTerm};
use crate::optimizer::program::{Constraint, LinearExpr, LinearProgram, Objective, VariableBounds};

/// Build the full program for the meal's current state.
pub fn build_program(meal: &MealModel) -> Result<LinearProgram> {
    let ingredients: Vec<&IngredientChoice> = meal.ingredients().collect();
    let mut program = LinearProgram::new();

    // Lower bounds are clamped at zero so non-negativity holds even for
    // ingredients built outside the elastic setters.
    for choice in &ingredients {
        program.add_variable(VariableBounds::new(
            choice.grams_minimum().max(0.0),
            choice.grams_maximum().or_surrogate(OPTIMIZER_MAX),
        ));
    }

    for nutrient in Nutrient::ALL {
        let total = aggregate(&ingredients, |choice| nutrient.ratio_of(choice.food()));
        let bounds = meal.nutrient_bounds(nutrient);
        program.add_constraint(Constraint::geq(
            total.clone(),
            bounds.minimum(),
            format!("{} minimum", nutrient),
        ));
        program.add_constraint(Constraint::leq(
            total,
            bounds.maximum().or_surrogate(OPTIMIZER_MAX),
            format!("{} maximum", nutrient),
        ));
    }

    add_ratio_constraints(meal, &ingredients, &mut program);

    let terms = meal.objective_terms();
    program.objective = reduce_objective(meal.objective_mode(), &terms, &ingredients, &mut program)?;

    debug!(
        meal = meal.name(),
        ingredients = ingredients.len(),
        variables = program.num_vars(),
        constraints = program.constraints.len(),
        terms = terms.len(),
        mode = %meal.objective_mode(),
        "assembled linear program"
    );

    Ok(program)
}

/// `ratio_min · D <= F <= ratio_max · D`, kept division free.
///
/// An unbounded ratio maximum drops the upper row: any finite surrogate would
/// still force `F = 0` whenever `D = 0`.
fn add_ratio_constraints(
    meal: &MealModel,
    ingredients: &[&IngredientChoice],
    program: &mut LinearProgram,
) {
    let fat = ratio_numerator(ingredients);
    let denominator = ratio_denominator(ingredients);
    let bounds = meal.ratio_bounds();

    program.add_constraint(Constraint::leq(
        denominator.scaled(bounds.minimum()).minus(&fat),
        0.0,
        "ratio minimum",
    ));

    if let Some(max) = bounds.maximum().finite() {
        program.add_constraint(Constraint::leq(
            fat.minus(&denominator.scaled(max)),
            0.0,
            "ratio maximum",
        ));
    }
}

fn reduce_objective(
    mode: ObjectiveMode,
    terms: &[ObjectiveTerm],
    ingredients: &[&IngredientChoice],
    program: &mut LinearProgram,
) -> Result<Objective> {
    if mode == ObjectiveMode::None {
        return Ok(Objective::None);
    }

    let exprs = terms
        .iter()
        .map(|term| linearize_term(term, mode, ingredients, program))
        .collect::<Result<Vec<_>>>()?;

    Ok(match mode {
        ObjectiveMode::None => Objective::None,
        ObjectiveMode::Minimize => Objective::Minimize(sum(&exprs)),
        ObjectiveMode::Maximize => Objective::Minimize(sum(&exprs).negated()),
        ObjectiveMode::MinMax if exprs.is_empty() => Objective::None,
        ObjectiveMode::MinMax => Objective::MinimizeMax(exprs),
        ObjectiveMode::MaxMin if exprs.is_empty() => Objective::None,
        ObjectiveMode::MaxMin => Objective::MinimizeNegatedMin(exprs),
    })
}

fn linearize_term(
    term: &ObjectiveTerm,
    mode: ObjectiveMode,
    ingredients: &[&IngredientChoice],
    program: &mut LinearProgram,
) -> Result<LinearExpr> {
    match term {
        ObjectiveTerm::AggregateTotal(nutrient) => Ok(aggregate(ingredients, |choice| {
            nutrient.ratio_of(choice.food())
        })),
        ObjectiveTerm::RatioNumerator => Ok(ratio_numerator(ingredients)),
        ObjectiveTerm::RatioDenominatorNegated => Ok(ratio_denominator(ingredients).negated()),
        ObjectiveTerm::IngredientDeviation {
            index,
            target,
            coefficient,
        } => {
            let wants_small = if mode.prefers_small_terms() {
                *coefficient >= 0.0
            } else {
                *coefficient <= 0.0
            };

            if wants_small {
                Ok(deviation_epigraph(*index, *target, *coefficient, program))
            } else if *target <= 0.0 {
                // x >= 0, so |0 - x| is x itself.
                Ok(LinearExpr::variable(*index, *coefficient))
            } else {
                let ingredient = ingredients
                    .get(*index)
                    .map(|choice| choice.name().to_string())
                    .unwrap_or_default();
                Err(MealError::UnsupportedObjective {
                    ingredient,
                    mode: mode.code(),
                })
            }
        }
    }
}

/// Replace `|target - x|` by `d` with `d >= target - x` and `d >= x - target`.
///
/// Only valid when the objective pushes `d` down.
fn deviation_epigraph(
    index: usize,
    target: f64,
    coefficient: f64,
    program: &mut LinearProgram,
) -> LinearExpr {
    let bounds = program.variables[index];
    let span = (target - bounds.lower).max(bounds.upper - target).max(0.0);
    let d = program.add_variable(VariableBounds::new(0.0, span));

    let x = LinearExpr::variable(index, 1.0);
    let dev = LinearExpr::variable(d, 1.0);
    program.add_constraint(Constraint::geq(dev.plus(&x), target, "deviation below target"));
    program.add_constraint(Constraint::geq(dev.minus(&x), -target, "deviation above target"));

    LinearExpr::variable(d, coefficient)
}

fn aggregate(
    ingredients: &[&IngredientChoice],
    ratio: impl Fn(&IngredientChoice) -> f64,
) -> LinearExpr {
    let mut expr = LinearExpr::new();
    for (index, choice) in ingredients.iter().enumerate() {
        expr.push(index, ratio(*choice));
    }
    expr
}

/// F: total fat.
fn ratio_numerator(ingredients: &[&IngredientChoice]) -> LinearExpr {
    aggregate(ingredients, |choice| choice.food().fat())
}

/// D: total protein plus total carbs.
fn ratio_denominator(ingredients: &[&IngredientChoice]) -> LinearExpr {
    aggregate(ingredients, |choice| {
        choice.food().protein() + choice.food().carbs()
    })
}

fn sum(exprs: &[LinearExpr]) -> LinearExpr {
    exprs
        .iter()
        .fold(LinearExpr::new(), |acc, expr| acc.plus(expr))
}
