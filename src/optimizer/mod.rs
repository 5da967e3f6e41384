pub mod assembly;
pub mod constants;
pub mod meal;
pub mod nutrient;
pub mod objective;
pub mod program;
pub mod solver;

pub use meal::{IngredientOverrides, IngredientSource, MealModel, SolveOutcome};
pub use nutrient::Nutrient;
pub use objective::{ObjectiveFlags, ObjectiveMode, ObjectiveTerm};
pub use program::{Constraint, LinearExpr, LinearProgram, Objective, Sense, VariableBounds};
pub use solver::{LpSolver, MicroLpSolver};
