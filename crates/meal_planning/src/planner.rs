use chrono::Weekday;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::VariantArray;

use recipe::{Catalog, MealType, Recipe};

use crate::error::PlanningError;
use crate::filter::FilterSet;
use crate::history::History;

/// Default weekly calorie limit when the user has not set one.
pub const DEFAULT_WEEKLY_CALORIES: u32 = 14_000;

/// The seven fixed day labels of a plan, Monday-first.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Per-meal calorie caps derived from a weekly limit.
///
/// `daily_target = weekly / 7`; breakfast, lunch and dinner get 25%, 35%
/// and 40% of that, each floored. The caps are independent soft ceilings;
/// with flooring they sum to the daily target or slightly under, never
/// over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalorieBudget {
    pub weekly: u32,
    pub daily_target: u32,
    pub breakfast_cap: u32,
    pub lunch_cap: u32,
    pub dinner_cap: u32,
}

impl CalorieBudget {
    const fn from_weekly(weekly: u32) -> Self {
        let daily = weekly / 7;
        CalorieBudget {
            weekly,
            daily_target: daily,
            breakfast_cap: (daily as u64 * 25 / 100) as u32,
            lunch_cap: (daily as u64 * 35 / 100) as u32,
            dinner_cap: (daily as u64 * 40 / 100) as u32,
        }
    }

    pub fn new(weekly: u32) -> Result<Self, PlanningError> {
        if weekly == 0 {
            return Err(PlanningError::InvalidWeeklyBudget(weekly));
        }
        Ok(Self::from_weekly(weekly))
    }

    pub fn cap_for(&self, meal: MealType) -> u32 {
        match meal {
            MealType::Breakfast => self.breakfast_cap,
            MealType::Lunch => self.lunch_cap,
            MealType::Dinner => self.dinner_cap,
        }
    }
}

impl Default for CalorieBudget {
    fn default() -> Self {
        Self::from_weekly(DEFAULT_WEEKLY_CALORIES)
    }
}

/// Whether slot pools are narrowed by the per-meal calorie cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlanMode {
    #[default]
    Unconstrained,
    CalorieCapped,
}

/// One cell of the weekly grid. `recipe` is `None` when no candidate
/// satisfied the slot's constraints.
#[derive(Debug, Clone)]
pub struct PlanSlot {
    pub day: Weekday,
    pub meal: MealType,
    pub recipe: Option<Recipe>,
}

/// A generated 7-day × 3-meal plan, held only in transient state.
///
/// Plans are regenerated on demand and never persisted directly; their
/// selections are folded into [`History`] via [`WeekPlan::reserve_into`].
#[derive(Debug, Clone)]
pub struct WeekPlan {
    slots: Vec<PlanSlot>,
}

impl WeekPlan {
    /// Slots in day-major order: all three meals of Monday, then Tuesday,
    /// and so on.
    pub fn slots(&self) -> &[PlanSlot] {
        &self.slots
    }

    pub fn get(&self, day: Weekday, meal: MealType) -> Option<&Recipe> {
        self.slots
            .iter()
            .find(|s| s.day == day && s.meal == meal)
            .and_then(|s| s.recipe.as_ref())
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.recipe.is_some()).count()
    }

    /// Reserve the whole week in history: every non-empty slot claims its
    /// recipe for all seven upcoming days, regardless of which day the
    /// slot is scheduled for.
    pub fn reserve_into(&self, history: &mut History, today: i64) {
        for slot in &self.slots {
            if let Some(recipe) = &slot.recipe {
                history.reserve(&recipe.id, slot.meal, today);
            }
        }
    }
}

/// Fills the weekly grid by uniform random choice from each meal's
/// filtered pool.
pub struct WeeklyPlanner;

impl WeeklyPlanner {
    /// Generate a plan for the seven fixed day labels.
    ///
    /// In [`PlanMode::CalorieCapped`] each meal's pool is first narrowed to
    /// recipes whose calorie count fits that meal's cap; a slot whose pool
    /// comes up empty stays unfilled rather than taking an over-cap recipe.
    pub fn generate<R: Rng + ?Sized>(
        catalog: &Catalog,
        filters: &FilterSet,
        budget: &CalorieBudget,
        mode: PlanMode,
        rng: &mut R,
    ) -> WeekPlan {
        let pools: Vec<(MealType, Vec<&Recipe>)> = MealType::VARIANTS
            .iter()
            .map(|&meal| {
                let pool = catalog
                    .by_meal(meal)
                    .filter(|r| filters.matches(r))
                    .filter(|r| match mode {
                        PlanMode::Unconstrained => true,
                        PlanMode::CalorieCapped => r.calories <= budget.cap_for(meal),
                    })
                    .collect();
                (meal, pool)
            })
            .collect();

        let mut slots = Vec::with_capacity(WEEK.len() * pools.len());
        for day in WEEK {
            for (meal, pool) in &pools {
                let recipe = pool.choose(rng).map(|r| (*r).clone());
                slots.push(PlanSlot {
                    day,
                    meal: *meal,
                    recipe,
                });
            }
        }

        let plan = WeekPlan { slots };
        tracing::info!(
            filled = plan.filled_count(),
            mode = ?mode,
            weekly = budget.weekly,
            "weekly plan generated"
        );
        plan
    }
}
