pub mod prompts;
pub mod render;

pub use prompts::{
    apply_meal_bounds, compose_meal, prompt_foods, prompt_meal_bounds, prompt_meal_name,
    prompt_objective_mode, prompt_optional_number, prompt_ratio_maximum, prompt_yes_no,
    MealBoundAnswers,
};
pub use render::{build_report, display_food_list, display_meal, format_meal};
