use rand::Rng;

use meal_planning::{
    pick_recipe, CalorieBudget, FilterSet, History, PlanMode, WeekPlan, WeeklyPlanner,
};
use preferences::{PreferenceStore, StorageBackend, StoreError};
use recipe::{Catalog, MealType, Recipe};

/// One row of the favorites view. Every listed entry is favorited by
/// construction; `name` is `None` when the id no longer resolves against
/// the bundled catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteEntry {
    pub id: String,
    pub name: Option<String>,
}

/// The application service the views talk to: the catalog plus the
/// persisted preference store.
pub struct App<'a, B: StorageBackend> {
    catalog: &'a Catalog,
    store: PreferenceStore<B>,
}

impl<'a, B: StorageBackend> App<'a, B> {
    pub fn new(catalog: &'a Catalog, store: PreferenceStore<B>) -> Self {
        App { catalog, store }
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    /// Suggest one recipe for a meal and record it as shown today.
    ///
    /// Returns `Ok(None)` when the filtered pool is empty; that is a notice
    /// for the user, not an error.
    pub async fn suggest<R: Rng + ?Sized>(
        &self,
        meal: MealType,
        filters: &FilterSet,
        today: i64,
        rng: &mut R,
    ) -> Result<Option<Recipe>, StoreError> {
        let history = self.store.history().await;
        let Some(choice) = pick_recipe(self.catalog, meal, filters, &history, today, rng) else {
            return Ok(None);
        };
        let choice = choice.clone();

        self.store.record_shown(&choice.id, meal, today).await?;
        tracing::info!(recipe_id = %choice.id, meal = %meal, "suggestion recorded");
        Ok(Some(choice))
    }

    /// Generate a weekly plan and reserve its selections in history.
    pub async fn generate_plan<R: Rng + ?Sized>(
        &self,
        filters: &FilterSet,
        budget: &CalorieBudget,
        mode: PlanMode,
        today: i64,
        rng: &mut R,
    ) -> Result<WeekPlan, StoreError> {
        let plan = WeeklyPlanner::generate(self.catalog, filters, budget, mode, rng);
        self.store.reserve_week(&plan, today).await?;
        Ok(plan)
    }

    pub async fn toggle_favorite(&self, recipe_id: &str) -> Result<bool, StoreError> {
        self.store.toggle_favorite(recipe_id).await
    }

    /// The favorites view: persisted ids joined against the catalog for
    /// display names, sorted by id for stable output.
    pub async fn favorites(&self) -> Vec<FavoriteEntry> {
        let mut ids: Vec<String> = self.store.favorites().await.into_iter().collect();
        ids.sort();
        ids.into_iter()
            .map(|id| {
                let name = self.catalog.get(&id).map(|r| r.name.clone());
                FavoriteEntry { id, name }
            })
            .collect()
    }

    pub async fn history(&self) -> History {
        self.store.history().await
    }

    /// Share-text for a recipe id, if it exists in the catalog.
    pub fn share_text(&self, recipe_id: &str) -> Option<String> {
        self.catalog.get(recipe_id).map(crate::share::share_text)
    }
}
