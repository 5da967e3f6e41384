use std::sync::Arc;

use crate::models::bounds::{reject_nonphysical, BoundPair, UpperBound, Warning};
use crate::models::food::FoodRecord;

/// A food selected for a meal, with its optimization parameters.
///
/// The food record is shared with the meal catalog and never mutated here.
#[derive(Debug, Clone)]
pub struct IngredientChoice {
    name: String,
    food: Arc<FoodRecord>,
    grams: BoundPair,
    include_in_objective: bool,
    weight_per_gram: f64,
    target_grams: f64,
    solved_grams: f64,
}

impl IngredientChoice {
    /// Wrap a food with default parameters: 0 to unbounded grams, included in
    /// the objective, zero weight and target.
    pub fn new(food: Arc<FoodRecord>) -> Self {
        Self {
            name: food.name().to_string(),
            food,
            grams: BoundPair::default(),
            include_in_objective: true,
            weight_per_gram: 0.0,
            target_grams: 0.0,
            solved_grams: 0.0,
        }
    }

    /// Same as [`IngredientChoice::new`] with a display name other than the food's.
    pub fn with_name(food: Arc<FoodRecord>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new(food)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn food(&self) -> &FoodRecord {
        &self.food
    }

    pub fn grams_minimum(&self) -> f64 {
        self.grams.minimum()
    }

    pub fn grams_maximum(&self) -> UpperBound {
        self.grams.maximum()
    }

    pub fn include_in_objective(&self) -> bool {
        self.include_in_objective
    }

    pub fn weight_per_gram(&self) -> f64 {
        self.weight_per_gram
    }

    pub fn target_grams(&self) -> f64 {
        self.target_grams
    }

    /// Grams chosen by the last successful solve (0 before any).
    pub fn solved_grams(&self) -> f64 {
        self.solved_grams
    }

    pub fn set_grams_minimum(&mut self, value: f64) -> Option<Warning> {
        let subject = format!("ingredient '{}' grams", self.name);
        self.grams.set_minimum(value, &subject)
    }

    pub fn set_grams_maximum(&mut self, value: impl Into<UpperBound>) -> Option<Warning> {
        let subject = format!("ingredient '{}' grams", self.name);
        self.grams.set_maximum(value, &subject)
    }

    pub fn set_use_in_objective(&mut self, value: bool) {
        self.include_in_objective = value;
    }

    // TODO: decide with product whether negative points are meaningful before restricting them.
    pub fn set_weight_per_gram(&mut self, value: f64) {
        self.weight_per_gram = value;
    }

    pub fn set_target_grams(&mut self, value: f64) -> Option<Warning> {
        let subject = format!("ingredient '{}'", self.name);
        if let Some(rejected) = reject_nonphysical(value, &subject, "target grams") {
            return Some(rejected);
        }
        self.target_grams = value;
        None
    }

    /// Store a solver result. Negative input (numerical noise) becomes 0.
    pub fn set_solved_grams(&mut self, value: f64) {
        self.solved_grams = if value > 0.0 { value } else { 0.0 };
    }
}
