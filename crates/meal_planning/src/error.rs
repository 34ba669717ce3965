use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanningError {
    #[error("weekly calorie limit must be positive, got {0}")]
    InvalidWeeklyBudget(u32),
}
