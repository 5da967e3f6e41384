use dialoguer::{Confirm, Input, Select};

use crate::error::{MealError, Result};
use crate::models::{FoodRecord, Warning};
use crate::optimizer::{
    IngredientOverrides, IngredientSource, MealModel, Nutrient, ObjectiveMode,
};
use crate::state::{parse_ratio, FoodCatalog, DEFAULT_REQUEST_MEAL_NAME};

/// Prompt for a meal name.
pub fn prompt_meal_name() -> Result<String> {
    let name: String = Input::new()
        .with_prompt("Meal name")
        .default(DEFAULT_REQUEST_MEAL_NAME.to_string())
        .interact_text()?;
    Ok(name.trim().to_string())
}

/// Prompt for a number; an empty answer means no value.
pub fn prompt_optional_number(prompt: &str) -> Result<Option<f64>> {
    let input: String = Input::new()
        .with_prompt(format!("{} (Enter to skip)", prompt))
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let value: f64 = input
        .parse()
        .map_err(|_| MealError::InvalidInput(format!("Invalid number '{}'", input)))?;
    Ok(Some(value))
}

/// Prompt for a maximum fat ratio such as `3:1` or `4`.
pub fn prompt_ratio_maximum() -> Result<Option<f64>> {
    let input: String = Input::new()
        .with_prompt("Maximum fat : (protein + carbs) ratio, e.g. 3:1 (Enter to skip)")
        .allow_empty(true)
        .interact_text()?;
    parse_ratio(&input)
}

/// Let the user pick the objective mode.
pub fn prompt_objective_mode() -> Result<ObjectiveMode> {
    let modes = [
        ObjectiveMode::None,
        ObjectiveMode::Minimize,
        ObjectiveMode::Maximize,
        ObjectiveMode::MinMax,
        ObjectiveMode::MaxMin,
    ];
    let options: Vec<String> = modes
        .iter()
        .map(|m| format!("{} ({})", m.code(), m))
        .collect();

    let selection = Select::new()
        .with_prompt("Objective")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(modes[selection])
}

/// Prompt for foods by name with fuzzy matching.
pub fn prompt_foods(catalog: &FoodCatalog) -> Result<Vec<FoodRecord>> {
    let mut chosen: Vec<FoodRecord> = Vec::new();

    loop {
        let input: String = Input::new()
            .with_prompt("Enter a food (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        if let Some(food) = catalog.find(input) {
            println!("Added: {}", food.name());
            chosen.push(food.clone());
            continue;
        }

        let candidates = catalog.suggestions(input);

        if candidates.is_empty() {
            println!("No matching food found for '{}'", input);
            continue;
        }

        if candidates.len() == 1 {
            let food = candidates[0].0;
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", food.name()))
                .default(true)
                .interact()?;

            if confirm {
                println!("Added: {}", food.name());
                chosen.push(food.clone());
            }
        } else {
            let options: Vec<&FoodRecord> = candidates.iter().take(5).map(|(f, _)| *f).collect();

            let mut labels: Vec<String> = options.iter().map(|f| f.name().to_string()).collect();
            labels.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&labels)
                .default(0)
                .interact()?;

            if let Some(food) = options.get(selection) {
                println!("Added: {}", food.name());
                chosen.push((*food).clone());
            }
        }
    }

    Ok(chosen)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Meal-level bounds collected at the prompts. `None` keeps the default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealBoundAnswers {
    /// `(nutrient, minimum, maximum)` in [`Nutrient::ALL`] order.
    pub nutrients: Vec<(Nutrient, Option<f64>, Option<f64>)>,
    pub ratio_minimum: Option<f64>,
    pub ratio_maximum: Option<f64>,
}

/// Ask for the minimum and maximum of every nutrient, then the ratio range.
pub fn prompt_meal_bounds() -> Result<MealBoundAnswers> {
    let mut answers = MealBoundAnswers::default();
    for nutrient in Nutrient::ALL {
        let min = prompt_optional_number(&format!("Minimum {} ({})", nutrient, nutrient.unit()))?;
        let max = prompt_optional_number(&format!("Maximum {} ({})", nutrient, nutrient.unit()))?;
        answers.nutrients.push((nutrient, min, max));
    }
    answers.ratio_minimum = prompt_optional_number("Minimum fat : (protein + carbs) ratio")?;
    answers.ratio_maximum = prompt_ratio_maximum()?;
    Ok(answers)
}

/// Apply answered bounds through the meal's setters.
pub fn apply_meal_bounds(meal: &mut MealModel, answers: &MealBoundAnswers) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for &(nutrient, min, max) in &answers.nutrients {
        if let Some(min) = min {
            warnings.extend(meal.set_nutrient_minimum(nutrient, min));
        }
        if let Some(max) = max {
            warnings.extend(meal.set_nutrient_maximum(nutrient, max));
        }
    }
    if let Some(min) = answers.ratio_minimum {
        warnings.extend(meal.set_ratio_minimum(min));
    }
    if let Some(max) = answers.ratio_maximum {
        warnings.extend(meal.set_ratio_maximum(max));
    }
    warnings
}

/// Build a meal interactively from the catalog.
pub fn compose_meal(catalog: &FoodCatalog) -> Result<(MealModel, Vec<Warning>)> {
    let mut meal = MealModel::new(prompt_meal_name()?);
    let mut warnings = Vec::new();

    for food in prompt_foods(catalog)? {
        let grams_maximum = prompt_optional_number(&format!("Maximum grams of {}", food.name()))?;
        let overrides = IngredientOverrides {
            grams_maximum: grams_maximum.map(Into::into),
            ..Default::default()
        };
        warnings.extend(meal.add_ingredient(IngredientSource::Food(food), overrides));
    }

    if meal.ingredient_count() == 0 {
        return Err(MealError::InvalidInput("No foods selected".to_string()));
    }

    let answers = prompt_meal_bounds()?;
    warnings.extend(apply_meal_bounds(&mut meal, &answers));

    let mode = prompt_objective_mode()?;
    meal.set_objective(mode);
    if mode != ObjectiveMode::None {
        let calories = prompt_yes_no("Include total calories in the objective?", false)?;
        meal.set_total_in_objective(Nutrient::Calories, calories);
    }

    Ok((meal, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UpperBound, WarningKind};

    #[test]
    fn test_apply_meal_bounds_covers_every_nutrient() {
        let mut meal = MealModel::new("Lunch");
        let answers = MealBoundAnswers {
            nutrients: vec![
                (Nutrient::Fat, Some(30.0), Some(60.0)),
                (Nutrient::Protein, None, Some(40.0)),
                (Nutrient::Carbs, None, None),
                (Nutrient::Calories, Some(500.0), None),
                (Nutrient::Volume, None, Some(750.0)),
            ],
            ratio_minimum: Some(2.0),
            ratio_maximum: Some(4.0),
        };

        let warnings = apply_meal_bounds(&mut meal, &answers);

        assert!(warnings.is_empty());
        assert_eq!(meal.nutrient_bounds(Nutrient::Fat).minimum(), 30.0);
        assert_eq!(meal.nutrient_bounds(Nutrient::Fat).maximum(), UpperBound::Finite(60.0));
        assert_eq!(meal.nutrient_bounds(Nutrient::Protein).maximum(), UpperBound::Finite(40.0));
        assert_eq!(meal.nutrient_bounds(Nutrient::Carbs).maximum(), UpperBound::Unbounded);
        assert_eq!(meal.nutrient_bounds(Nutrient::Calories).minimum(), 500.0);
        assert_eq!(meal.nutrient_bounds(Nutrient::Volume).maximum(), UpperBound::Finite(750.0));
        assert_eq!(meal.ratio_bounds().minimum(), 2.0);
        assert_eq!(meal.ratio_bounds().maximum(), UpperBound::Finite(4.0));
    }

    #[test]
    fn test_apply_meal_bounds_reports_reconciled_ratio() {
        let mut meal = MealModel::new("Lunch");
        let answers = MealBoundAnswers {
            ratio_minimum: Some(5.0),
            ratio_maximum: Some(3.0),
            ..Default::default()
        };

        let warnings = apply_meal_bounds(&mut meal, &answers);

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::BoundReconciled);
        assert_eq!(meal.ratio_bounds().minimum(), 3.0);
    }
}
