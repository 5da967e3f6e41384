use strsim::jaro_winkler;

use crate::models::{FoodRecord, Warning, WarningKind};
use crate::state::registry::Registry;

/// Minimum Jaro-Winkler similarity for a fuzzy name suggestion.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// The food table requests and interactive sessions pick ingredients from.
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    foods: Registry<FoodRecord>,
}

impl FoodCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, keeping the first record for each name.
    pub fn from_records(records: impl IntoIterator<Item = FoodRecord>) -> (Self, Vec<Warning>) {
        let mut catalog = Self::new();
        let warnings = records
            .into_iter()
            .filter_map(|record| catalog.insert(record))
            .collect();
        (catalog, warnings)
    }

    /// Add a food. A name already present is dropped with a warning.
    pub fn insert(&mut self, food: FoodRecord) -> Option<Warning> {
        let name = food.name().to_string();
        self.foods.try_insert(name.clone(), food).err().map(|_| {
            Warning::new(
                WarningKind::DuplicateEntity,
                format!("food '{}' listed more than once; keeping first entry", name),
            )
        })
    }

    /// Exact name lookup.
    pub fn get(&self, name: &str) -> Option<&FoodRecord> {
        self.foods.get(name)
    }

    /// Exact lookup, falling back to a case-insensitive match.
    pub fn find(&self, name: &str) -> Option<&FoodRecord> {
        self.get(name).or_else(|| {
            let wanted = name.to_lowercase();
            self.foods
                .values()
                .find(|f| f.name().to_lowercase() == wanted)
        })
    }

    /// Foods whose names resemble `name`, best match first.
    pub fn suggestions(&self, name: &str) -> Vec<(&FoodRecord, f64)> {
        let wanted = name.to_lowercase();
        let mut candidates: Vec<(&FoodRecord, f64)> = self
            .foods
            .values()
            .map(|f| (f, jaro_winkler(&f.name().to_lowercase(), &wanted)))
            .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        candidates
    }

    pub fn best_suggestion(&self, name: &str) -> Option<&FoodRecord> {
        self.suggestions(name).first().map(|(food, _)| *food)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FoodRecord> {
        self.foods.values()
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}
