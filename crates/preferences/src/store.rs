use std::collections::HashSet;

use meal_planning::{History, WeekPlan};
use recipe::MealType;

use crate::backend::StorageBackend;
use crate::error::StoreError;

pub const FAVORITES_KEY: &str = "favorites";
pub const HISTORY_KEY: &str = "history";

/// Persisted user preferences: the favorite-id set and the shown-history
/// blob, each stored under its own key.
///
/// Reads are fail-soft: a missing or unparseable value falls back to the
/// empty default and is never surfaced to the user. Every history save
/// prunes entries that have aged out of the history window first. Each
/// logical operation runs one read-modify-write cycle against the backend,
/// so it observes its own prior state; concurrent operations may still race
/// on the blob (accepted limitation).
pub struct PreferenceStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> PreferenceStore<B> {
    pub fn new(backend: B) -> Self {
        PreferenceStore { backend }
    }

    /// The persisted favorite recipe ids.
    pub async fn favorites(&self) -> HashSet<String> {
        match self.backend.read(FAVORITES_KEY).await {
            Ok(Some(blob)) => match serde_json::from_str(&blob) {
                Ok(ids) => ids,
                Err(error) => {
                    tracing::warn!(%error, "unparseable favorites blob, starting empty");
                    HashSet::new()
                }
            },
            Ok(None) => HashSet::new(),
            Err(error) => {
                tracing::warn!(%error, "failed to read favorites, starting empty");
                HashSet::new()
            }
        }
    }

    pub async fn is_favorite(&self, recipe_id: &str) -> bool {
        self.favorites().await.contains(recipe_id)
    }

    /// Add the id if absent, remove it if present. Returns whether the
    /// recipe is a favorite afterwards.
    pub async fn toggle_favorite(&self, recipe_id: &str) -> Result<bool, StoreError> {
        let mut favorites = self.favorites().await;
        let now_favorite = if favorites.remove(recipe_id) {
            false
        } else {
            favorites.insert(recipe_id.to_string());
            true
        };

        // Stored sorted so the persisted file is deterministic.
        let mut ids: Vec<&String> = favorites.iter().collect();
        ids.sort();
        let blob = serde_json::to_string(&ids)?;
        self.backend.write(FAVORITES_KEY, &blob).await?;

        tracing::debug!(recipe_id, now_favorite, "favorite toggled");
        Ok(now_favorite)
    }

    /// The persisted shown-history.
    pub async fn history(&self) -> History {
        match self.backend.read(HISTORY_KEY).await {
            Ok(Some(blob)) => History::from_json(&blob),
            Ok(None) => History::new(),
            Err(error) => {
                tracing::warn!(%error, "failed to read history, starting empty");
                History::new()
            }
        }
    }

    /// Prune and persist the history.
    pub async fn save_history(
        &self,
        history: &mut History,
        today: i64,
    ) -> Result<(), StoreError> {
        history.prune(today);
        let blob = history.to_json()?;
        self.backend.write(HISTORY_KEY, &blob).await
    }

    /// Record that a recipe was shown today, as one read-modify-write
    /// cycle.
    pub async fn record_shown(
        &self,
        recipe_id: &str,
        meal: MealType,
        today: i64,
    ) -> Result<(), StoreError> {
        let mut history = self.history().await;
        history.record(recipe_id, meal, today);
        self.save_history(&mut history, today).await
    }

    /// Fold a generated plan's selections into history, claiming every
    /// filled slot for the upcoming week, as one read-modify-write cycle.
    pub async fn reserve_week(&self, plan: &WeekPlan, today: i64) -> Result<(), StoreError> {
        let mut history = self.history().await;
        plan.reserve_into(&mut history, today);
        self.save_history(&mut history, today).await
    }
}
