use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::FoodRecord;

/// A meal-level aggregate quantity with its own bounds.
///
/// `ALL` fixes the order used for constraints and objective terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Fat,
    Protein,
    Carbs,
    Calories,
    Volume,
}

impl Nutrient {
    pub const ALL: [Nutrient; 5] = [
        Nutrient::Fat,
        Nutrient::Protein,
        Nutrient::Carbs,
        Nutrient::Calories,
        Nutrient::Volume,
    ];

    /// Position in [`Nutrient::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Nutrient::Fat => 0,
            Nutrient::Protein => 1,
            Nutrient::Carbs => 2,
            Nutrient::Calories => 3,
            Nutrient::Volume => 4,
        }
    }

    /// Per-gram amount of this nutrient in `food`.
    #[inline]
    pub fn ratio_of(self, food: &FoodRecord) -> f64 {
        match self {
            Nutrient::Fat => food.fat(),
            Nutrient::Protein => food.protein(),
            Nutrient::Carbs => food.carbs(),
            Nutrient::Calories => food.calories(),
            Nutrient::Volume => food.volume(),
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Nutrient::Fat | Nutrient::Protein | Nutrient::Carbs => "g",
            Nutrient::Calories => "cal",
            Nutrient::Volume => "ml",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Nutrient::Fat => "fat",
            Nutrient::Protein => "protein",
            Nutrient::Carbs => "carbs",
            Nutrient::Calories => "calories",
            Nutrient::Volume => "volume",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
