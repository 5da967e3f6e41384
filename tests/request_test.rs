use std::io::Write;

use assert_float_eq::*;
use tempfile::NamedTempFile;

use keto_meal_optimizer_rs::interface::build_report;
use keto_meal_optimizer_rs::models::WarningKind;
use keto_meal_optimizer_rs::state::{load_foods, load_request, save_report, MealRequest};

const FOOD_TABLE: &str = "\
Food,Fat,Protein,Carb,Calories
Lean Protein,0,100,0,400
Pure Fat,100,0,0,900
Egg,10,13,1,143
";

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_request_end_to_end() {
    let table = temp_file(FOOD_TABLE);
    let request = temp_file(
        r#"{
            "meal_name": "Ratio dinner",
            "ingredients": [
                {"name": "Pure Fat"},
                {"name": "Lean Protein"}
            ],
            "calories_min": 520,
            "calories_max": 520,
            "ratio_max": "1:1",
            "ratio_min": 1
        }"#,
    );

    let (catalog, warnings) = load_foods(table.path()).unwrap();
    assert!(warnings.is_empty());
    let request = load_request(request.path()).unwrap();
    let (mut meal, warnings) = request.build_meal(&catalog).unwrap();
    assert!(warnings.is_empty());

    let outcome = meal.solve();
    assert!(outcome.is_ok());
    let report = build_report(&meal, &outcome);

    assert!(report.success);
    assert_eq!(report.meal_name, "Ratio dinner");
    assert_float_absolute_eq!(report.ingredients[0].grams, 40.0, 1e-6);
    assert_float_absolute_eq!(report.ingredients[1].grams, 40.0, 1e-6);
    assert_float_absolute_eq!(report.totals.calories, 520.0, 1e-6);
    assert_eq!(report.totals.ratio, Some(1.0));
    assert!(report.meal_plan.contains("Ratio dinner"));

    let out = NamedTempFile::new().unwrap();
    save_report(out.path(), &report).unwrap();
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.path()).unwrap()).unwrap();
    assert_eq!(saved["success"], true);
}

#[test]
fn test_infeasible_request_reports_failure() {
    let table = temp_file(FOOD_TABLE);
    let (catalog, _) = load_foods(table.path()).unwrap();

    let request: MealRequest = serde_json::from_str(
        r#"{
            "ingredients": [{"name": "Egg", "grams_maximum": 10}],
            "calories_min": 1000
        }"#,
    )
    .unwrap();
    let (mut meal, _) = request.build_meal(&catalog).unwrap();

    let outcome = meal.solve();
    let report = build_report(&meal, &outcome);

    assert!(!report.success);
    assert!(report.error.is_some());
    assert_eq!(report.ingredients[0].grams, 0.0);
}

#[test]
fn test_request_with_unknown_and_duplicate_foods() {
    let table = temp_file(FOOD_TABLE);
    let (catalog, _) = load_foods(table.path()).unwrap();

    let request: MealRequest = serde_json::from_str(
        r#"{
            "ingredients": [
                {"name": "Eg"},
                {"name": "Egg"},
                {"name": "Egg", "grams_minimum": 5}
            ]
        }"#,
    )
    .unwrap();
    let (meal, warnings) = request.build_meal(&catalog).unwrap();

    let kinds: Vec<WarningKind> = warnings.iter().map(|w| w.kind).collect();
    assert_eq!(kinds, vec![WarningKind::UnknownFood, WarningKind::DuplicateEntity]);
    assert_eq!(meal.ingredient_count(), 1);
    assert_eq!(meal.ingredient("Egg").unwrap().grams_minimum(), 0.0);
}

#[test]
fn test_objective_request_minimizes_mass() {
    let table = temp_file(FOOD_TABLE);
    let (catalog, _) = load_foods(table.path()).unwrap();

    let request: MealRequest = serde_json::from_str(
        r#"{
            "ingredients": [
                {"name": "Lean Protein", "use_in_objective_function": true},
                {"name": "Pure Fat", "use_in_objective_function": true}
            ],
            "calories_min": 900,
            "calories_max": 900,
            "objective": 1
        }"#,
    )
    .unwrap();
    let (mut meal, _) = request.build_meal(&catalog).unwrap();

    let outcome = meal.solve().unwrap();
    assert_float_absolute_eq!(outcome.objective_value.unwrap(), 100.0, 1e-6);
    assert_float_absolute_eq!(meal.ingredient("Pure Fat").unwrap().solved_grams(), 100.0, 1e-6);
}
