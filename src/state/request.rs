//! Optimization requests as submitted by a client (JSON).
//!
//! A request names foods from a [`FoodCatalog`] and carries meal-level
//! bounds; [`MealRequest::build_meal`] turns it into a ready-to-solve
//! [`MealModel`].

use serde::Deserialize;

use crate::error::{MealError, Result};
use crate::models::{UpperBound, Warning, WarningKind};
use crate::optimizer::{IngredientOverrides, IngredientSource, MealModel, Nutrient};
use crate::state::catalog::FoodCatalog;

pub const DEFAULT_REQUEST_MEAL_NAME: &str = "User Meal";

/// One requested ingredient.
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientRequest {
    pub name: String,
    pub grams_minimum: Option<f64>,
    pub grams_maximum: Option<f64>,
    #[serde(default)]
    pub use_in_objective_function: bool,
    pub points_per_gram: Option<f64>,
    pub target_grams: Option<f64>,
}

/// Fat to (protein + carbs) ratio, either `"3:1"`, `"3"` or a bare number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RatioSpec {
    Number(f64),
    Text(String),
}

impl RatioSpec {
    /// Ratio value, or `None` for an empty string.
    pub fn value(&self) -> Result<Option<f64>> {
        match self {
            RatioSpec::Number(v) => Ok(Some(*v)),
            RatioSpec::Text(text) => parse_ratio(text),
        }
    }
}

/// Which nutrient totals join the objective.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct ObjectiveTotals {
    pub fat: bool,
    pub protein: bool,
    pub carbs: bool,
    pub calories: bool,
    pub volume: bool,
}

impl ObjectiveTotals {
    fn get(&self, nutrient: Nutrient) -> bool {
        match nutrient {
            Nutrient::Fat => self.fat,
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Calories => self.calories,
            Nutrient::Volume => self.volume,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MealRequest {
    #[serde(default)]
    pub meal_name: Option<String>,
    pub ingredients: Vec<IngredientRequest>,

    #[serde(default)]
    pub calories_min: Option<f64>,
    #[serde(default)]
    pub calories_max: Option<f64>,
    #[serde(default)]
    pub protein_min: Option<f64>,
    #[serde(default)]
    pub protein_max: Option<f64>,
    #[serde(default)]
    pub fat_min: Option<f64>,
    #[serde(default)]
    pub fat_max: Option<f64>,
    #[serde(default)]
    pub carb_min: Option<f64>,
    #[serde(default)]
    pub carb_max: Option<f64>,
    #[serde(default)]
    pub volume_min: Option<f64>,
    #[serde(default)]
    pub volume_max: Option<f64>,
    #[serde(default)]
    pub ratio_min: Option<f64>,
    #[serde(default)]
    pub ratio_max: Option<RatioSpec>,

    /// Objective selector, 0..=4.
    #[serde(default)]
    pub objective: Option<i64>,
    #[serde(default)]
    pub objective_totals: ObjectiveTotals,
    #[serde(default)]
    pub use_ratio_in_objective: bool,
    #[serde(default)]
    pub use_points: bool,
    #[serde(default)]
    pub rounding_digits: Option<u32>,
}

impl MealRequest {
    /// Build a meal from this request, resolving ingredient names in `catalog`.
    ///
    /// Unknown foods are skipped with a warning. A malformed `ratio_max` fails
    /// the whole request before anything is built.
    pub fn build_meal(&self, catalog: &FoodCatalog) -> Result<(MealModel, Vec<Warning>)> {
        let ratio_max = self.ratio_max.as_ref().map(RatioSpec::value).transpose()?.flatten();

        let name = self
            .meal_name
            .clone()
            .unwrap_or_else(|| DEFAULT_REQUEST_MEAL_NAME.to_string());
        let mut meal = MealModel::new(name);
        let mut warnings = Vec::new();

        if let Some(digits) = self.rounding_digits {
            warnings.extend(meal.set_rounding_digits(digits));
        }

        for ingredient in &self.ingredients {
            let Some(food) = catalog.get(&ingredient.name) else {
                warnings.push(unknown_food(catalog, &ingredient.name));
                continue;
            };

            let overrides = IngredientOverrides {
                name: None,
                grams_minimum: ingredient.grams_minimum,
                grams_maximum: ingredient.grams_maximum.map(UpperBound::Finite),
                include_in_objective: Some(ingredient.use_in_objective_function),
                weight_per_gram: ingredient.points_per_gram,
                target_grams: ingredient.target_grams,
            };
            warnings.extend(meal.add_ingredient(IngredientSource::Food(food.clone()), overrides));
        }

        let bounds = [
            (Nutrient::Calories, Some(self.calories_min.unwrap_or(0.0)), self.calories_max),
            (Nutrient::Protein, self.protein_min, self.protein_max),
            (Nutrient::Fat, self.fat_min, self.fat_max),
            (Nutrient::Carbs, self.carb_min, self.carb_max),
            (Nutrient::Volume, self.volume_min, self.volume_max),
        ];
        for (nutrient, min, max) in bounds {
            if let Some(min) = min {
                warnings.extend(meal.set_nutrient_minimum(nutrient, min));
            }
            if let Some(max) = max {
                warnings.extend(meal.set_nutrient_maximum(nutrient, max));
            }
        }

        if let Some(min) = self.ratio_min {
            warnings.extend(meal.set_ratio_minimum(min));
        }
        if let Some(max) = ratio_max {
            warnings.extend(meal.set_ratio_maximum(max));
        }

        if let Some(code) = self.objective {
            warnings.extend(meal.set_objective_mode(code));
        }
        for nutrient in Nutrient::ALL {
            meal.set_total_in_objective(nutrient, self.objective_totals.get(nutrient));
        }
        meal.set_ratio_in_objective(self.use_ratio_in_objective);
        meal.set_points_mode(self.use_points);

        Ok((meal, warnings))
    }
}

fn unknown_food(catalog: &FoodCatalog, name: &str) -> Warning {
    let message = match catalog.best_suggestion(name) {
        Some(food) => format!("unknown food '{}'; did you mean '{}'?", name, food.name()),
        None => format!("unknown food '{}'; skipping", name),
    };
    Warning::new(WarningKind::UnknownFood, message)
}

/// Parse `"num:den"` or `"value"`. An empty string means no ratio.
pub fn parse_ratio(raw: &str) -> Result<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|_| MealError::InvalidInput(format!("invalid ratio '{}'", raw)))
    };

    match raw.split_once(':') {
        Some((num, den)) => {
            let den = parse(den)?;
            if den == 0.0 {
                return Err(MealError::InvalidInput(format!(
                    "ratio '{}' has a zero denominator",
                    raw
                )));
            }
            Ok(Some(parse(num)? / den))
        }
        None => parse(raw).map(Some),
    }
}
