use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use recipe::MealType;

/// Entries older than this many days are pruned on every save.
pub const HISTORY_WINDOW_DAYS: i64 = 30;

/// Window consulted by the selector when avoiding repeats, inclusive of
/// today: day indices in `[today - 6, today]`.
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Days claimed by one planner reservation (offsets 0..6 from today).
const RESERVATION_SPAN_DAYS: i64 = 7;

/// Days since the reference epoch (1970-01-01).
pub fn day_index(date: NaiveDate) -> i64 {
    date.signed_duration_since(NaiveDate::default()).num_days()
}

pub fn today_index() -> i64 {
    day_index(Utc::now().date_naive())
}

/// One "this recipe was shown" event.
///
/// Entries are append-only; they are never mutated individually, only
/// bulk-pruned when they age out of the history window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub recipe_id: String,
    pub meal: MealType,
    pub day: i64,
}

/// The rolling shown-history consulted by the selector.
///
/// Persisted as a JSON text blob that round-trips the entry list losslessly.
/// An unparseable blob deserializes to an empty history rather than
/// surfacing an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record that a recipe was shown for a meal on the given day.
    pub fn record(&mut self, recipe_id: impl Into<String>, meal: MealType, day: i64) {
        self.entries.push(HistoryEntry {
            recipe_id: recipe_id.into(),
            meal,
            day,
        });
    }

    /// Claim a recipe as shown for every day of the upcoming week.
    ///
    /// Appends one entry per day offset 0..6 from `start_day`, independent
    /// of which day the recipe is actually scheduled for. The selector will
    /// therefore disfavor the recipe for the whole week.
    pub fn reserve(&mut self, recipe_id: &str, meal: MealType, start_day: i64) {
        for offset in 0..RESERVATION_SPAN_DAYS {
            self.record(recipe_id, meal, start_day + offset);
        }
    }

    /// Drop entries older than the history window relative to `today`.
    pub fn prune(&mut self, today: i64) {
        self.entries.retain(|e| e.day >= today - HISTORY_WINDOW_DAYS);
    }

    /// Recipe ids shown for `meal` within the recent window ending at
    /// `today`.
    pub fn recent_ids(&self, meal: MealType, today: i64) -> HashSet<&str> {
        let oldest = today - (RECENT_WINDOW_DAYS - 1);
        self.entries
            .iter()
            .filter(|e| e.meal == meal && e.day >= oldest && e.day <= today)
            .map(|e| e.recipe_id.as_str())
            .collect()
    }

    /// Serialize to the persisted text form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize the persisted text form, falling back to an empty
    /// history when the blob does not parse.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(history) => history,
            Err(error) => {
                tracing::warn!(%error, "unparseable history blob, starting empty");
                Self::default()
            }
        }
    }
}
