pub mod error;
pub mod filter;
pub mod history;
pub mod planner;
pub mod selector;

pub use error::PlanningError;
pub use filter::{FilterSet, QUICK_MINUTES_MAX};
pub use history::{day_index, today_index, History, HistoryEntry, HISTORY_WINDOW_DAYS, RECENT_WINDOW_DAYS};
pub use planner::{
    CalorieBudget, PlanMode, PlanSlot, WeekPlan, WeeklyPlanner, DEFAULT_WEEKLY_CALORIES, WEEK,
};
pub use selector::pick_recipe;
