use std::fmt;

use serde::Serialize;

use crate::models::{FoodRecord, IngredientChoice};
use crate::optimizer::nutrient::Nutrient;

/// How the objective term list is reduced to a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ObjectiveMode {
    /// Feasibility check only.
    #[default]
    None,
    /// Minimize the sum of all terms.
    Minimize,
    /// Maximize the sum of all terms.
    Maximize,
    /// Minimize the largest term.
    MinMax,
    /// Maximize the smallest term.
    MaxMin,
}

impl ObjectiveMode {
    /// Selector number used by callers (0..=4).
    pub fn code(self) -> u8 {
        match self {
            ObjectiveMode::None => 0,
            ObjectiveMode::Minimize => 1,
            ObjectiveMode::Maximize => 2,
            ObjectiveMode::MinMax => 3,
            ObjectiveMode::MaxMin => 4,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(ObjectiveMode::None),
            1 => Some(ObjectiveMode::Minimize),
            2 => Some(ObjectiveMode::Maximize),
            3 => Some(ObjectiveMode::MinMax),
            4 => Some(ObjectiveMode::MaxMin),
            _ => None,
        }
    }

    /// Whether the reduction drives individual terms down.
    ///
    /// Minimize and min-max want small terms; maximize and max-min want large ones.
    pub fn prefers_small_terms(self) -> bool {
        matches!(self, ObjectiveMode::Minimize | ObjectiveMode::MinMax)
    }

    /// Reduce already evaluated term values. `None` when there is nothing to report.
    pub fn reduce(self, values: &[f64]) -> Option<f64> {
        match self {
            ObjectiveMode::None => None,
            ObjectiveMode::Minimize | ObjectiveMode::Maximize => Some(values.iter().sum()),
            ObjectiveMode::MinMax => values.iter().copied().reduce(f64::max),
            ObjectiveMode::MaxMin => values.iter().copied().reduce(f64::min),
        }
    }
}

impl fmt::Display for ObjectiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectiveMode::None => "none",
            ObjectiveMode::Minimize => "minimize",
            ObjectiveMode::Maximize => "maximize",
            ObjectiveMode::MinMax => "min-max",
            ObjectiveMode::MaxMin => "max-min",
        };
        f.write_str(name)
    }
}

/// One scalar term of the objective.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectiveTerm {
    /// Σ ratio_i · x_i for one nutrient.
    AggregateTotal(Nutrient),
    /// F = Σ fat_i · x_i.
    RatioNumerator,
    /// −D = −Σ (protein_i + carbs_i) · x_i.
    RatioDenominatorNegated,
    /// coefficient · |target − x_index|.
    IngredientDeviation {
        index: usize,
        target: f64,
        coefficient: f64,
    },
}

impl ObjectiveTerm {
    /// Value of the term for the given per-ingredient grams.
    pub fn evaluate(&self, ingredients: &[&IngredientChoice], grams: &[f64]) -> f64 {
        match self {
            ObjectiveTerm::AggregateTotal(nutrient) => {
                weighted_sum(ingredients, grams, |food| nutrient.ratio_of(food))
            }
            ObjectiveTerm::RatioNumerator => weighted_sum(ingredients, grams, FoodRecord::fat),
            ObjectiveTerm::RatioDenominatorNegated => {
                -weighted_sum(ingredients, grams, |food| food.protein() + food.carbs())
            }
            ObjectiveTerm::IngredientDeviation {
                index,
                target,
                coefficient,
            } => {
                let x = grams.get(*index).copied().unwrap_or(0.0);
                coefficient * (target - x).abs()
            }
        }
    }
}

fn weighted_sum(
    ingredients: &[&IngredientChoice],
    grams: &[f64],
    ratio: impl Fn(&FoodRecord) -> f64,
) -> f64 {
    ingredients
        .iter()
        .zip(grams)
        .map(|(choice, g)| ratio(choice.food()) * g)
        .sum()
}

/// Which aggregate quantities join the objective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectiveFlags {
    totals: [bool; 5],
    pub ratio: bool,
    pub points: bool,
}

impl ObjectiveFlags {
    pub fn total(&self, nutrient: Nutrient) -> bool {
        self.totals[nutrient.index()]
    }

    pub fn set_total(&mut self, nutrient: Nutrient, value: bool) {
        self.totals[nutrient.index()] = value;
    }
}

/// Build the term list in its fixed order: enabled totals (fat, protein,
/// carbs, calories, volume), then F and −D if the ratio is enabled, then one
/// deviation per included ingredient in insertion order.
///
/// Min-max and max-min pick among equal terms by this order.
pub fn build_terms(flags: &ObjectiveFlags, ingredients: &[&IngredientChoice]) -> Vec<ObjectiveTerm> {
    let mut terms: Vec<ObjectiveTerm> = Nutrient::ALL
        .into_iter()
        .filter(|n| flags.total(*n))
        .map(ObjectiveTerm::AggregateTotal)
        .collect();

    if flags.ratio {
        terms.push(ObjectiveTerm::RatioNumerator);
        terms.push(ObjectiveTerm::RatioDenominatorNegated);
    }

    for (index, choice) in ingredients.iter().enumerate() {
        if !choice.include_in_objective() {
            continue;
        }
        let coefficient = if flags.points {
            choice.weight_per_gram()
        } else {
            1.0
        };
        terms.push(ObjectiveTerm::IngredientDeviation {
            index,
            target: choice.target_grams(),
            coefficient,
        });
    }

    terms
}
