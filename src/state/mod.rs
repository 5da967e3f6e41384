mod catalog;
mod persistence;
mod registry;
mod request;

pub use catalog::{FoodCatalog, FUZZY_MATCH_THRESHOLD};
pub use persistence::{load_foods, load_request, save_report, DEFAULT_ML_PER_GRAM};
pub use registry::Registry;
pub use request::{
    parse_ratio, IngredientRequest, MealRequest, ObjectiveTotals, RatioSpec,
    DEFAULT_REQUEST_MEAL_NAME,
};
