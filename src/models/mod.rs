pub mod bounds;
pub mod food;
pub mod ingredient;
pub mod report;

pub use bounds::{BoundPair, UpperBound, Warning, WarningKind};
pub use food::FoodRecord;
pub use ingredient::IngredientChoice;
pub use report::{IngredientAmount, MealReport, MealTotals};
