use std::str::FromStr;
use std::sync::OnceLock;

use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::error::CatalogError;
use crate::types::{CostTier, MealType, Recipe};

/// Minimum number of recipes guaranteed per meal category after expansion.
pub const MIN_PER_MEAL: usize = 50;

#[derive(RustEmbed)]
#[folder = "data"]
struct Dataset;

const DATASET_FILE: &str = "recipes.json";

/// A raw dataset record before normalization.
///
/// Optional booleans default to false, cost to the cheapest tier, calories
/// to 0. The meal-category tag is validated separately so a bad tag fails
/// with the offending recipe id rather than a serde position.
#[derive(Debug, Deserialize)]
struct RawRecord {
    id: String,
    name: String,
    meal: String,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    steps: Vec<String>,
    #[serde(default)]
    minutes: Option<u32>,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    vegetarian: bool,
    #[serde(default)]
    vegan: bool,
    #[serde(default)]
    gluten_free: bool,
    #[serde(default)]
    lactose_free: bool,
    #[serde(default)]
    cost: Option<String>,
    #[serde(default)]
    calories: u32,
}

impl RawRecord {
    fn normalize(self) -> Result<Recipe, CatalogError> {
        let meal = MealType::from_str(&self.meal).map_err(|_| CatalogError::InvalidMealCategory {
            id: self.id.clone(),
            value: self.meal.clone(),
        })?;

        let cost = match self.cost {
            Some(value) => {
                CostTier::from_str(&value).map_err(|_| CatalogError::InvalidCostTier {
                    id: self.id.clone(),
                    value,
                })?
            }
            None => CostTier::default(),
        };

        Ok(Recipe {
            id: self.id,
            name: self.name,
            meal,
            ingredients: self.ingredients,
            steps: self.steps,
            minutes: self.minutes,
            note: self.note,
            vegetarian: self.vegetarian,
            vegan: self.vegan,
            gluten_free: self.gluten_free,
            lactose_free: self.lactose_free,
            cost,
            calories: self.calories,
            synthetic: false,
        })
    }
}

/// The in-memory recipe catalog.
///
/// Built once from the bundled dataset: records are normalized, then every
/// meal category with a non-empty pool smaller than [`MIN_PER_MEAL`] is
/// expanded by cyclically duplicating its entries as labeled synthetic
/// variants. A category with no natural recipes stays empty; variants are
/// never manufactured from nothing.
#[derive(Debug, Clone)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

static SHARED: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    /// Build a catalog from already-normalized recipes, applying pool
    /// expansion. The injection point for tests and alternate datasets.
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Catalog {
            recipes: expand_pools(recipes),
        }
    }

    /// Parse and normalize the bundled dataset.
    ///
    /// A malformed record (bad JSON, unknown meal-category or cost tag) is a
    /// packaging error and fails the whole load.
    pub fn load() -> Result<Self, CatalogError> {
        let file = Dataset::get(DATASET_FILE).ok_or(CatalogError::DatasetMissing)?;
        let raw: Vec<RawRecord> = serde_json::from_slice(&file.data)?;

        let natural = raw.len();
        let recipes = raw
            .into_iter()
            .map(RawRecord::normalize)
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = Self::new(recipes);
        tracing::info!(
            natural,
            total = catalog.recipes.len(),
            "recipe catalog loaded"
        );
        Ok(catalog)
    }

    /// Process-wide catalog, loaded on first use and cached for the process
    /// lifetime. Repeated calls return the same instance without re-parsing
    /// or re-expanding.
    pub fn shared() -> Result<&'static Catalog, CatalogError> {
        if let Some(catalog) = SHARED.get() {
            return Ok(catalog);
        }
        let catalog = Self::load()?;
        Ok(SHARED.get_or_init(|| catalog))
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn by_meal(&self, meal: MealType) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter().filter(move |r| r.meal == meal)
    }

    pub fn pool_size(&self, meal: MealType) -> usize {
        self.by_meal(meal).count()
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }
}

/// Grow every non-empty category pool to [`MIN_PER_MEAL`] entries by cycling
/// through its natural recipes. Each duplicate gets a unique derived id, a
/// variant-marked name, and the synthetic flag.
fn expand_pools(mut recipes: Vec<Recipe>) -> Vec<Recipe> {
    use strum::VariantArray;

    for meal in MealType::VARIANTS {
        let pool: Vec<Recipe> = recipes.iter().filter(|r| r.meal == *meal).cloned().collect();
        let natural = pool.len();
        if natural == 0 || natural >= MIN_PER_MEAL {
            continue;
        }

        for i in 0..(MIN_PER_MEAL - natural) {
            let source = &pool[i % natural];
            // The same source repeats once per full cycle through the pool,
            // so (source id, round) is unique.
            let round = i / natural + 1;
            recipes.push(Recipe {
                id: format!("{}-v{}", source.id, round),
                name: format!("{} (variant {})", source.name, round),
                synthetic: true,
                ..source.clone()
            });
        }
        tracing::debug!(meal = %meal, natural, expanded = MIN_PER_MEAL, "category pool expanded");
    }

    recipes
}
