use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::error::{MealError, Result};
use crate::models::{BoundPair, FoodRecord, IngredientChoice, MealTotals, UpperBound, Warning, WarningKind};
use crate::optimizer::assembly;
use crate::optimizer::constants::{
    round_to, DEFAULT_MEAL_NAME, DEFAULT_ROUNDING_DIGITS, MAX_ROUNDING_DIGITS, OBJECTIVE_MODE_COUNT,
    RATIO_DENOMINATOR_EPSILON,
};
use crate::optimizer::nutrient::Nutrient;
use crate::optimizer::objective::{build_terms, ObjectiveFlags, ObjectiveMode, ObjectiveTerm};
use crate::optimizer::program::LinearProgram;
use crate::optimizer::solver::{LpSolver, MicroLpSolver};
use crate::state::Registry;

/// Where a new ingredient's food comes from.
#[derive(Debug, Clone)]
pub enum IngredientSource {
    /// A food already in the meal catalog, by name.
    Catalog(String),
    /// A food record; added to the catalog if its name is new.
    Food(FoodRecord),
}

/// Optional per-ingredient settings applied when the ingredient is added.
#[derive(Debug, Clone, Default)]
pub struct IngredientOverrides {
    pub name: Option<String>,
    pub grams_minimum: Option<f64>,
    pub grams_maximum: Option<UpperBound>,
    pub include_in_objective: Option<bool>,
    pub weight_per_gram: Option<f64>,
    pub target_grams: Option<f64>,
}

/// Summary of a successful solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    /// Reduced objective at the solved grams; `None` for a feasibility-only solve.
    pub objective_value: Option<f64>,
    pub variables: usize,
    pub constraints: usize,
}

/// A meal to optimize: catalog, ingredients, meal-level bounds and objective.
///
/// Not safe to mutate during a solve; independent meals share nothing.
#[derive(Debug, Clone)]
pub struct MealModel {
    name: String,
    foods: Registry<Arc<FoodRecord>>,
    ingredients: Registry<IngredientChoice>,
    nutrient_bounds: [BoundPair; 5],
    ratio_bounds: BoundPair,
    mode: ObjectiveMode,
    flags: ObjectiveFlags,
    rounding_digits: u32,
}

impl Default for MealModel {
    fn default() -> Self {
        Self::new(DEFAULT_MEAL_NAME)
    }
}

impl MealModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            foods: Registry::new(),
            ingredients: Registry::new(),
            nutrient_bounds: [BoundPair::default(); 5],
            ratio_bounds: BoundPair::default(),
            mode: ObjectiveMode::None,
            flags: ObjectiveFlags::default(),
            rounding_digits: DEFAULT_ROUNDING_DIGITS,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Catalog and ingredients
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a food to the catalog. Duplicate names are dropped with a warning.
    pub fn add_food(&mut self, food: FoodRecord) -> Option<Warning> {
        let name = food.name().to_string();
        match self.foods.try_insert(name.clone(), Arc::new(food)) {
            Ok(_) => None,
            Err(_) => Some(Warning::new(
                WarningKind::DuplicateEntity,
                format!("food '{}' already added; ignoring", name),
            )),
        }
    }

    pub fn food(&self, name: &str) -> Option<&FoodRecord> {
        self.foods.get(name).map(|f| f.as_ref())
    }

    pub fn foods(&self) -> impl Iterator<Item = &FoodRecord> {
        self.foods.values().map(|f| f.as_ref())
    }

    /// Add an ingredient, then apply `overrides` through the regular setters.
    ///
    /// Returns every warning raised on the way. Nothing is added for an unknown
    /// catalog name or a duplicate ingredient name.
    pub fn add_ingredient(
        &mut self,
        source: IngredientSource,
        overrides: IngredientOverrides,
    ) -> Vec<Warning> {
        let mut warnings = Vec::new();

        let food = match source {
            IngredientSource::Catalog(name) => match self.foods.get(&name) {
                Some(food) => Arc::clone(food),
                None => {
                    warnings.push(Warning::new(
                        WarningKind::UnknownFood,
                        format!("unknown food '{}' referenced; ignoring", name),
                    ));
                    return warnings;
                }
            },
            IngredientSource::Food(record) => {
                let (food, warning) = self.register_food(record);
                warnings.extend(warning);
                food
            }
        };

        let name = overrides
            .name
            .clone()
            .unwrap_or_else(|| food.name().to_string());
        let food_description = food.debug_string();
        let choice = IngredientChoice::with_name(food, name.clone());

        match self.ingredients.try_insert(name.clone(), choice) {
            Ok(position) => {
                debug!(meal = %self.name, ingredient = %name, position, food = %food_description, "added ingredient");
                if let Some(choice) = self.ingredients.get_mut(&name) {
                    warnings.extend(apply_overrides(choice, &overrides));
                }
            }
            Err(_) => warnings.push(Warning::new(
                WarningKind::DuplicateEntity,
                format!("ingredient '{}' already added; ignoring", name),
            )),
        }
        warnings
    }

    /// Catalog entry for `record`'s name, inserting `record` if the name is new.
    fn register_food(&mut self, record: FoodRecord) -> (Arc<FoodRecord>, Option<Warning>) {
        let food = Arc::new(record);
        let rejected = match self.foods.try_insert(food.name().to_string(), Arc::clone(&food)) {
            Ok(_) => return (food, None),
            Err(rejected) => rejected,
        };

        let existing = self
            .foods
            .get(rejected.name())
            .map_or_else(|| Arc::clone(&rejected), Arc::clone);
        let warning = (*existing != *rejected).then(|| {
            Warning::new(
                WarningKind::DuplicateEntity,
                format!(
                    "food '{}' already in catalog with different values; keeping catalog entry",
                    rejected.name()
                ),
            )
        });
        (existing, warning)
    }

    pub fn ingredient(&self, name: &str) -> Option<&IngredientChoice> {
        self.ingredients.get(name)
    }

    pub fn ingredient_mut(&mut self, name: &str) -> Option<&mut IngredientChoice> {
        self.ingredients.get_mut(name)
    }

    /// Ingredients in insertion order (the solver variable order).
    pub fn ingredients(&self) -> impl Iterator<Item = &IngredientChoice> {
        self.ingredients.values()
    }

    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Meal-level bounds
    // ─────────────────────────────────────────────────────────────────────────

    pub fn nutrient_bounds(&self, nutrient: Nutrient) -> BoundPair {
        self.nutrient_bounds[nutrient.index()]
    }

    pub fn set_nutrient_minimum(&mut self, nutrient: Nutrient, value: f64) -> Option<Warning> {
        let subject = format!("meal {}", nutrient);
        self.nutrient_bounds[nutrient.index()].set_minimum(value, &subject)
    }

    pub fn set_nutrient_maximum(
        &mut self,
        nutrient: Nutrient,
        value: impl Into<UpperBound>,
    ) -> Option<Warning> {
        let subject = format!("meal {}", nutrient);
        self.nutrient_bounds[nutrient.index()].set_maximum(value, &subject)
    }

    /// Bounds on total fat / (total protein + total carbs).
    pub fn ratio_bounds(&self) -> BoundPair {
        self.ratio_bounds
    }

    pub fn set_ratio_minimum(&mut self, value: f64) -> Option<Warning> {
        self.ratio_bounds.set_minimum(value, "meal ratio")
    }

    pub fn set_ratio_maximum(&mut self, value: impl Into<UpperBound>) -> Option<Warning> {
        self.ratio_bounds.set_maximum(value, "meal ratio")
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Objective selection
    // ─────────────────────────────────────────────────────────────────────────

    pub fn objective_mode(&self) -> ObjectiveMode {
        self.mode
    }

    /// Select the objective by number (0 none, 1 minimize, 2 maximize, 3 min-max, 4 max-min).
    ///
    /// Out-of-range selectors keep the current mode.
    pub fn set_objective_mode(&mut self, code: i64) -> Option<Warning> {
        match ObjectiveMode::from_code(code) {
            Some(mode) => {
                self.mode = mode;
                None
            }
            None => Some(Warning::new(
                WarningKind::UnknownObjectiveMode,
                format!(
                    "objective mode {} outside 0..{}; keeping {} ({})",
                    code,
                    OBJECTIVE_MODE_COUNT,
                    self.mode.code(),
                    self.mode
                ),
            )),
        }
    }

    pub fn set_objective(&mut self, mode: ObjectiveMode) {
        self.mode = mode;
    }

    pub fn objective_flags(&self) -> ObjectiveFlags {
        self.flags
    }

    pub fn set_total_in_objective(&mut self, nutrient: Nutrient, value: bool) {
        self.flags.set_total(nutrient, value);
    }

    pub fn set_ratio_in_objective(&mut self, value: bool) {
        self.flags.ratio = value;
    }

    /// Weight ingredient deviations by their points per gram.
    pub fn set_points_mode(&mut self, value: bool) {
        self.flags.points = value;
    }

    /// Objective terms in their fixed order for the current state.
    pub fn objective_terms(&self) -> Vec<ObjectiveTerm> {
        let ingredients: Vec<&IngredientChoice> = self.ingredients().collect();
        build_terms(&self.flags, &ingredients)
    }

    pub fn rounding_digits(&self) -> u32 {
        self.rounding_digits
    }

    pub fn set_rounding_digits(&mut self, digits: u32) -> Option<Warning> {
        if digits > MAX_ROUNDING_DIGITS {
            return Some(Warning::new(
                WarningKind::InvalidBoundary,
                format!(
                    "rounding digits {} above {}; ignoring",
                    digits, MAX_ROUNDING_DIGITS
                ),
            ));
        }
        self.rounding_digits = digits;
        None
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Solve
    // ─────────────────────────────────────────────────────────────────────────

    /// Linear program for the current state.
    pub fn build_program(&self) -> Result<LinearProgram> {
        assembly::build_program(self)
    }

    /// Solve with the default microlp backend.
    pub fn solve(&mut self) -> Result<SolveOutcome> {
        self.solve_with(&MicroLpSolver::new())
    }

    /// Solve with `solver` and write the grams back onto the ingredients.
    ///
    /// On any error no ingredient is touched.
    pub fn solve_with(&mut self, solver: &impl LpSolver) -> Result<SolveOutcome> {
        let program = self.build_program()?;

        let values = match solver.solve(&program) {
            Ok(values) => values,
            Err(err) => {
                self.log_failure(&err);
                return Err(err);
            }
        };

        if values.len() < self.ingredients.len() {
            let err = MealError::SolverFault(format!(
                "solver {} returned {} values for {} ingredients",
                solver.name(),
                values.len(),
                self.ingredients.len()
            ));
            self.log_failure(&err);
            return Err(err);
        }

        for (choice, value) in self.ingredients.values_mut().zip(&values) {
            choice.set_solved_grams(*value);
        }

        let outcome = SolveOutcome {
            objective_value: self.objective_value(),
            variables: program.num_vars(),
            constraints: program.constraints.len(),
        };
        info!(
            meal = %self.name,
            solver = solver.name(),
            objective = ?outcome.objective_value,
            "meal optimized"
        );
        Ok(outcome)
    }

    fn log_failure(&self, err: &MealError) {
        match err {
            MealError::Infeasible => {
                warn!(meal = %self.name, kind = "infeasible", "no feasible meal")
            }
            MealError::SolverFault(reason) => {
                error!(meal = %self.name, kind = "solver_fault", "{}", reason)
            }
            other => warn!(meal = %self.name, "{}", other),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reporting (always derived from the current solved grams)
    // ─────────────────────────────────────────────────────────────────────────

    /// Unrounded Σ ratio_i · solved_grams_i.
    pub fn nutrient_total(&self, nutrient: Nutrient) -> f64 {
        self.ingredients
            .values()
            .map(|c| nutrient.ratio_of(c.food()) * c.solved_grams())
            .sum()
    }

    /// Unrounded fat / (protein + carbs); `None` when the denominator is zero.
    pub fn ratio(&self) -> Option<f64> {
        let denominator = self.nutrient_total(Nutrient::Protein) + self.nutrient_total(Nutrient::Carbs);
        if denominator.abs() < RATIO_DENOMINATOR_EPSILON {
            return None;
        }
        Some(self.nutrient_total(Nutrient::Fat) / denominator)
    }

    /// Totals rounded to the configured precision.
    pub fn totals(&self) -> MealTotals {
        let digits = self.rounding_digits;
        let rounded = |n: Nutrient| round_to(self.nutrient_total(n), digits);
        MealTotals {
            fat: rounded(Nutrient::Fat),
            protein: rounded(Nutrient::Protein),
            carbs: rounded(Nutrient::Carbs),
            calories: rounded(Nutrient::Calories),
            volume: rounded(Nutrient::Volume),
            ratio: self.ratio().map(|r| round_to(r, digits)),
        }
    }

    /// Objective value at the current solved grams, using exact term values.
    pub fn objective_value(&self) -> Option<f64> {
        let ingredients: Vec<&IngredientChoice> = self.ingredients().collect();
        let grams: Vec<f64> = ingredients.iter().map(|c| c.solved_grams()).collect();
        let values: Vec<f64> = self
            .objective_terms()
            .iter()
            .map(|term| term.evaluate(&ingredients, &grams))
            .collect();
        self.mode.reduce(&values)
    }
}

fn apply_overrides(choice: &mut IngredientChoice, overrides: &IngredientOverrides) -> Vec<Warning> {
    let mut warnings = Vec::new();
    if let Some(min) = overrides.grams_minimum {
        warnings.extend(choice.set_grams_minimum(min));
    }
    if let Some(max) = overrides.grams_maximum {
        warnings.extend(choice.set_grams_maximum(max));
    }
    if let Some(include) = overrides.include_in_objective {
        choice.set_use_in_objective(include);
    }
    if let Some(weight) = overrides.weight_per_gram {
        choice.set_weight_per_gram(weight);
    }
    if let Some(target) = overrides.target_grams {
        warnings.extend(choice.set_target_grams(target));
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::program::Objective;

    fn egg() -> FoodRecord {
        FoodRecord::new("Egg", 0.1, 0.13, 0.01, 1.43, 1.0)
    }

    /// Solver stub returning fixed values.
    struct FixedSolver(Result<Vec<f64>>);

    impl LpSolver for FixedSolver {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn solve(&self, _program: &LinearProgram) -> Result<Vec<f64>> {
            match &self.0 {
                Ok(values) => Ok(values.clone()),
                Err(MealError::Infeasible) => Err(MealError::Infeasible),
                Err(other) => Err(MealError::SolverFault(other.to_string())),
            }
        }
    }

    #[test]
    fn test_defaults() {
        let meal = MealModel::default();
        assert_eq!(meal.name(), "Default");
        assert_eq!(meal.objective_mode(), ObjectiveMode::None);
        assert_eq!(meal.rounding_digits(), 2);
        for nutrient in Nutrient::ALL {
            assert_eq!(meal.nutrient_bounds(nutrient), BoundPair::default());
        }
        assert_eq!(meal.ratio_bounds().maximum(), UpperBound::Unbounded);
    }

    #[test]
    fn test_add_food_duplicate() {
        let mut meal = MealModel::new("Breakfast");
        assert!(meal.add_food(egg()).is_none());
        let warning = meal.add_food(egg()).unwrap();
        assert_eq!(warning.kind, WarningKind::DuplicateEntity);
        assert_eq!(meal.foods().count(), 1);
    }

    #[test]
    fn test_add_ingredient_from_catalog() {
        let mut meal = MealModel::new("Breakfast");
        meal.add_food(egg());
        let warnings = meal.add_ingredient(
            IngredientSource::Catalog("Egg".to_string()),
            IngredientOverrides {
                grams_maximum: Some(UpperBound::Finite(120.0)),
                target_grams: Some(50.0),
                ..Default::default()
            },
        );

        assert!(warnings.is_empty());
        let choice = meal.ingredient("Egg").unwrap();
        assert_eq!(choice.grams_maximum(), UpperBound::Finite(120.0));
        assert_eq!(choice.target_grams(), 50.0);
    }

    #[test]
    fn test_unknown_catalog_food() {
        let mut meal = MealModel::new("Breakfast");
        let warnings = meal.add_ingredient(
            IngredientSource::Catalog("Unicorn".to_string()),
            IngredientOverrides::default(),
        );
        assert_eq!(warnings[0].kind, WarningKind::UnknownFood);
        assert_eq!(meal.ingredient_count(), 0);
    }

    #[test]
    fn test_food_source_registers_catalog_entry() {
        let mut meal = MealModel::new("Breakfast");
        meal.add_ingredient(IngredientSource::Food(egg()), IngredientOverrides::default());

        assert!(meal.food("Egg").is_some());
        assert_eq!(meal.ingredient("Egg").unwrap().food(), meal.food("Egg").unwrap());
    }

    #[test]
    fn test_conflicting_food_keeps_catalog_entry() {
        let mut meal = MealModel::new("Breakfast");
        meal.add_food(egg());
        let impostor = FoodRecord::new("Egg", 0.5, 0.5, 0.0, 6.5, 1.0);
        let warnings = meal.add_ingredient(
            IngredientSource::Food(impostor),
            IngredientOverrides::default(),
        );

        assert_eq!(warnings[0].kind, WarningKind::DuplicateEntity);
        assert_eq!(meal.ingredient("Egg").unwrap().food(), &egg());
    }

    #[test]
    fn test_duplicate_ingredient_rejected() {
        let mut meal = MealModel::new("Breakfast");
        meal.add_ingredient(
            IngredientSource::Food(egg()),
            IngredientOverrides {
                target_grams: Some(10.0),
                ..Default::default()
            },
        );
        let warnings = meal.add_ingredient(
            IngredientSource::Food(egg()),
            IngredientOverrides {
                target_grams: Some(99.0),
                ..Default::default()
            },
        );

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::DuplicateEntity);
        assert_eq!(meal.ingredient("Egg").unwrap().target_grams(), 10.0);
    }

    #[test]
    fn test_duplicate_ingredient_skips_override_warnings() {
        let mut meal = MealModel::new("Breakfast");
        meal.add_ingredient(IngredientSource::Food(egg()), IngredientOverrides::default());
        let warnings = meal.add_ingredient(
            IngredientSource::Food(egg()),
            IngredientOverrides {
                grams_minimum: Some(-5.0),
                target_grams: Some(-1.0),
                ..Default::default()
            },
        );

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::DuplicateEntity);
        assert_eq!(meal.ingredient("Egg").unwrap().grams_minimum(), 0.0);
        assert_eq!(meal.ingredient_count(), 1);
    }

    #[test]
    fn test_identical_food_reuses_catalog_entry() {
        let mut meal = MealModel::new("Breakfast");
        meal.add_food(egg());
        let warnings = meal.add_ingredient(IngredientSource::Food(egg()), IngredientOverrides::default());

        assert!(warnings.is_empty());
        assert_eq!(meal.foods().count(), 1);
        assert!(std::ptr::eq(
            meal.ingredient("Egg").unwrap().food(),
            meal.food("Egg").unwrap()
        ));
    }

    #[test]
    fn test_same_food_under_two_names() {
        let mut meal = MealModel::new("Breakfast");
        meal.add_ingredient(IngredientSource::Food(egg()), IngredientOverrides::default());
        let warnings = meal.add_ingredient(
            IngredientSource::Catalog("Egg".to_string()),
            IngredientOverrides {
                name: Some("Second egg".to_string()),
                ..Default::default()
            },
        );

        assert!(warnings.is_empty());
        assert_eq!(meal.ingredient_count(), 2);
        assert_eq!(meal.foods().count(), 1);
    }

    #[test]
    fn test_override_warnings_collected() {
        let mut meal = MealModel::new("Breakfast");
        let warnings = meal.add_ingredient(
            IngredientSource::Food(egg()),
            IngredientOverrides {
                grams_minimum: Some(80.0),
                grams_maximum: Some(UpperBound::Finite(50.0)),
                target_grams: Some(-1.0),
                ..Default::default()
            },
        );

        let kinds: Vec<WarningKind> = warnings.iter().map(|w| w.kind).collect();
        assert_eq!(kinds, vec![WarningKind::BoundReconciled, WarningKind::InvalidBoundary]);
        let choice = meal.ingredient("Egg").unwrap();
        assert_eq!(choice.grams_minimum(), 50.0);
        assert_eq!(choice.grams_maximum(), UpperBound::Finite(50.0));
    }

    #[test]
    fn test_objective_mode_out_of_range_keeps_prior() {
        let mut meal = MealModel::new("Dinner");
        assert!(meal.set_objective_mode(3).is_none());
        let warning = meal.set_objective_mode(7).unwrap();
        assert_eq!(warning.kind, WarningKind::UnknownObjectiveMode);
        assert_eq!(meal.objective_mode(), ObjectiveMode::MinMax);
        assert!(meal.set_objective_mode(-1).is_some());
        assert_eq!(meal.objective_mode(), ObjectiveMode::MinMax);
    }

    #[test]
    fn test_meal_bounds_elastic() {
        let mut meal = MealModel::new("Dinner");
        meal.set_nutrient_maximum(Nutrient::Protein, 40.0);
        let warning = meal.set_nutrient_minimum(Nutrient::Protein, 60.0).unwrap();
        assert_eq!(warning.kind, WarningKind::BoundReconciled);
        assert_eq!(meal.nutrient_bounds(Nutrient::Protein).maximum(), UpperBound::Finite(60.0));

        meal.set_ratio_minimum(4.0);
        meal.set_ratio_maximum(3.0);
        assert_eq!(meal.ratio_bounds().minimum(), 3.0);

        let warning = meal.set_nutrient_minimum(Nutrient::Calories, -5.0).unwrap();
        assert_eq!(warning.kind, WarningKind::InvalidBoundary);
        assert_eq!(meal.nutrient_bounds(Nutrient::Calories).minimum(), 0.0);
    }

    #[test]
    fn test_rounding_digits_range() {
        let mut meal = MealModel::new("Dinner");
        assert!(meal.set_rounding_digits(4).is_none());
        assert!(meal.set_rounding_digits(MAX_ROUNDING_DIGITS + 1).is_some());
        assert_eq!(meal.rounding_digits(), 4);
    }

    #[test]
    fn test_solve_writes_clamped_values() {
        let mut meal = MealModel::new("Dinner");
        meal.add_ingredient(IngredientSource::Food(egg()), IngredientOverrides::default());
        meal.add_ingredient(
            IngredientSource::Food(FoodRecord::new("Butter", 0.81, 0.01, 0.0, 7.17, 1.05)),
            IngredientOverrides::default(),
        );

        // Trailing values belong to auxiliary variables and are ignored.
        let solver = FixedSolver(Ok(vec![100.0, -1e-10, 42.0]));
        meal.solve_with(&solver).unwrap();

        assert_eq!(meal.ingredient("Egg").unwrap().solved_grams(), 100.0);
        assert_eq!(meal.ingredient("Butter").unwrap().solved_grams(), 0.0);
    }

    #[test]
    fn test_failed_solve_leaves_grams() {
        let mut meal = MealModel::new("Dinner");
        meal.add_ingredient(IngredientSource::Food(egg()), IngredientOverrides::default());
        meal.solve_with(&FixedSolver(Ok(vec![30.0]))).unwrap();

        let err = meal.solve_with(&FixedSolver(Err(MealError::Infeasible))).unwrap_err();
        assert!(matches!(err, MealError::Infeasible));
        assert_eq!(meal.ingredient("Egg").unwrap().solved_grams(), 30.0);

        let err = meal
            .solve_with(&FixedSolver(Err(MealError::SolverFault("boom".to_string()))))
            .unwrap_err();
        assert!(err.is_solve_failure());
        assert_eq!(meal.ingredient("Egg").unwrap().solved_grams(), 30.0);

        let err = meal.solve_with(&FixedSolver(Ok(Vec::new()))).unwrap_err();
        assert!(matches!(err, MealError::SolverFault(_)));
        assert_eq!(meal.ingredient("Egg").unwrap().solved_grams(), 30.0);
    }

    #[test]
    fn test_totals_track_solved_grams() {
        let mut meal = MealModel::new("Dinner");
        meal.add_ingredient(IngredientSource::Food(egg()), IngredientOverrides::default());
        assert_eq!(meal.totals().calories, 0.0);
        assert_eq!(meal.totals().ratio, None);

        meal.ingredient_mut("Egg").unwrap().set_solved_grams(100.0);
        let totals = meal.totals();
        assert!((totals.calories - 143.0).abs() < 1e-9);
        assert!((totals.protein - 13.0).abs() < 1e-9);
        assert_eq!(totals.ratio, Some(0.71));
        assert_eq!(meal.totals(), totals);
    }

    #[test]
    fn test_feasibility_mode_has_no_objective_value() {
        let mut meal = MealModel::new("Dinner");
        meal.add_ingredient(IngredientSource::Food(egg()), IngredientOverrides::default());
        let program = meal.build_program().unwrap();
        assert_eq!(program.objective, Objective::None);
        assert_eq!(meal.objective_value(), None);
    }
}
