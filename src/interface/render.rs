use crate::error::{MealError, Result};
use crate::models::{FoodRecord, IngredientAmount, MealReport};
use crate::optimizer::constants::round_to;
use crate::optimizer::{MealModel, Nutrient, SolveOutcome};

/// Render a rounded amount, always showing at least one decimal.
fn amount(value: f64, digits: u32) -> String {
    let rounded = round_to(value, digits);
    if rounded.fract() == 0.0 {
        format!("{:.1}", rounded)
    } else {
        format!("{}", rounded)
    }
}

/// Text block describing the meal at its current solved grams.
pub fn format_meal(meal: &MealModel) -> String {
    let digits = meal.rounding_digits();
    let width = meal.ingredients().map(|c| c.name().len()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("\nMeal:\n\t{}\n\n\t\tIngredients:\n", meal.name()));
    for choice in meal.ingredients() {
        out.push_str(&format!(
            "\n\t\t\t{:<width$} : {}g\n",
            choice.name(),
            amount(choice.solved_grams(), digits),
            width = width
        ));
    }

    let rows = [
        ("fat content", Nutrient::Fat),
        ("protein content", Nutrient::Protein),
        ("carbs content", Nutrient::Carbs),
        ("calorie content", Nutrient::Calories),
        ("volume", Nutrient::Volume),
    ];
    for (label, nutrient) in rows {
        out.push_str(&format!(
            "\n\n\t\t{:<38}:\t{}{}",
            format!("Current meal {}", label),
            amount(meal.nutrient_total(nutrient), digits),
            nutrient.unit()
        ));
    }

    let ratio = meal
        .ratio()
        .map_or_else(|| "N/A".to_string(), |r| amount(r, digits));
    out.push_str(&format!(
        "\n\n\t\t{:<38}:\t{}",
        "Current meal macronutrient ratio", ratio
    ));
    out
}

/// Print the meal to stdout.
pub fn display_meal(meal: &MealModel) {
    println!("{}", format_meal(meal));
    println!();
}

/// Summarize a solve attempt for the request layer.
pub fn build_report(meal: &MealModel, outcome: &Result<SolveOutcome>) -> MealReport {
    let digits = meal.rounding_digits();
    MealReport {
        meal_name: meal.name().to_string(),
        success: outcome.is_ok(),
        ingredients: meal
            .ingredients()
            .map(|c| IngredientAmount {
                name: c.name().to_string(),
                grams: round_to(c.solved_grams(), digits),
            })
            .collect(),
        totals: meal.totals(),
        meal_plan: format_meal(meal),
        error: outcome.as_ref().err().map(MealError::to_string),
    }
}

/// Display a simple list of foods with their per-100 g values.
pub fn display_food_list<'a>(foods: impl IntoIterator<Item = &'a FoodRecord>, title: &str) {
    let foods: Vec<&FoodRecord> = foods.into_iter().collect();
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    let width = foods.iter().map(|f| f.name().len()).max().unwrap_or(10);
    for food in foods {
        println!(
            "  {:<width$} - {:>5.0} cal | F:{:>5.1} P:{:>5.1} C:{:>5.1} | {:.0} ml  (per 100 g)",
            food.name(),
            food.calories() * 100.0,
            food.fat() * 100.0,
            food.protein() * 100.0,
            food.carbs() * 100.0,
            food.volume() * 100.0,
            width = width
        );
    }

    println!();
}
