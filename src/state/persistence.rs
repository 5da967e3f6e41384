use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{FoodRecord, MealReport, Warning};
use crate::state::catalog::FoodCatalog;
use crate::state::request::MealRequest;

/// Volume per gram assumed when the table has no milliliter column.
pub const DEFAULT_ML_PER_GRAM: f64 = 1.0;

/// One row of the food table. Nutrients are given per 100 g.
#[derive(Debug, Deserialize)]
struct FoodRow {
    #[serde(rename = "Food")]
    name: String,
    #[serde(rename = "Fat")]
    fat: f64,
    #[serde(rename = "Protein")]
    protein: f64,
    #[serde(rename = "Carb")]
    carbs: f64,
    #[serde(rename = "Calories")]
    calories: f64,
    #[serde(rename = "Milliliters", default)]
    milliliters: Option<f64>,
}

impl FoodRow {
    fn into_record(self) -> FoodRecord {
        let volume = self
            .milliliters
            .map_or(DEFAULT_ML_PER_GRAM, |ml| ml / 100.0);
        FoodRecord::new(
            self.name.trim(),
            self.fat / 100.0,
            self.protein / 100.0,
            self.carbs / 100.0,
            self.calories / 100.0,
            volume,
        )
    }
}

/// Load the food table from a CSV file.
///
/// Duplicate names keep their first row.
pub fn load_foods<P: AsRef<Path>>(path: P) -> Result<(FoodCatalog, Vec<Warning>)> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;

    let mut records = Vec::new();
    for row in reader.deserialize::<FoodRow>() {
        records.push(row?.into_record());
    }

    let (catalog, warnings) = FoodCatalog::from_records(records);
    info!(path = %path.display(), foods = catalog.len(), "loaded food table");
    Ok((catalog, warnings))
}

/// Load an optimization request from a JSON file.
pub fn load_request<P: AsRef<Path>>(path: P) -> Result<MealRequest> {
    let content = fs::read_to_string(path.as_ref())?;
    let request: MealRequest = serde_json::from_str(&content)?;
    debug!(path = %path.as_ref().display(), ingredients = request.ingredients.len(), "loaded request");
    Ok(request)
}

/// Save a meal report as pretty JSON.
pub fn save_report<P: AsRef<Path>>(path: P, report: &MealReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}
