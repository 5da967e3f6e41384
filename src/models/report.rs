use serde::Serialize;

/// Aggregate nutrient totals of a meal, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealTotals {
    pub fat: f64,
    pub protein: f64,
    pub carbs: f64,
    pub calories: f64,
    pub volume: f64,
    /// Fat to (protein + carbs) ratio; `None` when protein + carbs is zero.
    pub ratio: Option<f64>,
}

/// Solved amount of one ingredient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientAmount {
    pub name: String,
    pub grams: f64,
}

/// Result record handed back to the request layer.
#[derive(Debug, Clone, Serialize)]
pub struct MealReport {
    pub meal_name: String,
    pub success: bool,
    pub ingredients: Vec<IngredientAmount>,
    pub totals: MealTotals,
    /// Human-readable rendering of the meal.
    pub meal_plan: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
