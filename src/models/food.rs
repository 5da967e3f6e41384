use serde::{Deserialize, Serialize};

/// Per-gram nutritional profile of one food.
///
/// Every ratio is "units of nutrient per gram of food": grams of fat, protein
/// and carbs, calories, and milliliters of volume. Values are not validated;
/// callers supply physically sane data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    name: String,
    fat: f64,
    protein: f64,
    carbs: f64,
    calories: f64,
    volume: f64,
}

impl FoodRecord {
    pub fn new(
        name: impl Into<String>,
        fat: f64,
        protein: f64,
        carbs: f64,
        calories: f64,
        volume: f64,
    ) -> Self {
        Self {
            name: name.into(),
            fat,
            protein,
            carbs,
            calories,
            volume,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Grams of fat per gram of food.
    #[inline]
    pub fn fat(&self) -> f64 {
        self.fat
    }

    /// Grams of protein per gram of food.
    #[inline]
    pub fn protein(&self) -> f64 {
        self.protein
    }

    /// Grams of carbs per gram of food.
    #[inline]
    pub fn carbs(&self) -> f64 {
        self.carbs
    }

    /// Calories per gram of food.
    #[inline]
    pub fn calories(&self) -> f64 {
        self.calories
    }

    /// Milliliters per gram of food.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{}: F:{} P:{} C:{} cal:{} ml:{} per g",
            self.name, self.fat, self.protein, self.carbs, self.calories, self.volume
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let butter = FoodRecord::new("Butter", 0.81, 0.01, 0.0, 7.17, 1.05);
        assert_eq!(butter.name(), "Butter");
        assert!((butter.fat() - 0.81).abs() < 1e-12);
        assert!((butter.protein() - 0.01).abs() < 1e-12);
        assert_eq!(butter.carbs(), 0.0);
        assert!((butter.calories() - 7.17).abs() < 1e-12);
        assert!((butter.volume() - 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_no_validation_on_ratios() {
        let odd = FoodRecord::new("Odd", -1.0, 2.0, 0.0, 0.0, 0.0);
        assert_eq!(odd.fat(), -1.0);
        assert_eq!(odd.protein(), 2.0);
    }

    #[test]
    fn test_debug_string_mentions_name() {
        let egg = FoodRecord::new("Egg", 0.1, 0.13, 0.01, 1.43, 1.0);
        assert!(egg.debug_string().starts_with("Egg:"));
    }
}
