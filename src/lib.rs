pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod optimizer;
pub mod state;

pub use error::{MealError, Result};
pub use models::{FoodRecord, IngredientChoice, MealReport, MealTotals, UpperBound, Warning, WarningKind};
pub use optimizer::{IngredientOverrides, IngredientSource, MealModel, Nutrient, ObjectiveMode, SolveOutcome};
pub use state::{FoodCatalog, MealRequest};
