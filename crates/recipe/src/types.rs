use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

/// Price tier of a recipe, ordered cheapest-first.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CostTier {
    #[default]
    Budget,
    Moderate,
    Premium,
}

impl CostTier {
    /// The two cheapest tiers count as budget-friendly.
    pub fn is_budget_friendly(self) -> bool {
        self <= CostTier::Moderate
    }
}

/// A normalized catalog entry.
///
/// Entries come from the bundled dataset with missing optional fields
/// defaulted (see [`crate::catalog::Catalog`]); `synthetic` marks variants
/// generated during minimum-pool expansion, which exist only in memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub meal: MealType,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub minutes: Option<u32>,
    pub note: Option<String>,
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub lactose_free: bool,
    pub cost: CostTier,
    pub calories: u32,
    pub synthetic: bool,
}

impl Recipe {
    /// Vegan recipes count as vegetarian for all filtering purposes, whether
    /// or not the stored vegetarian flag was set.
    pub fn is_vegetarian_friendly(&self) -> bool {
        self.vegetarian || self.vegan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_meal_type_parses_lowercase_tags() {
        assert_eq!(MealType::from_str("breakfast").unwrap(), MealType::Breakfast);
        assert_eq!(MealType::from_str("lunch").unwrap(), MealType::Lunch);
        assert_eq!(MealType::from_str("dinner").unwrap(), MealType::Dinner);
        assert!(MealType::from_str("brunch").is_err());
    }

    #[test]
    fn test_cost_tier_ordering_cheapest_first() {
        assert!(CostTier::Budget < CostTier::Moderate);
        assert!(CostTier::Moderate < CostTier::Premium);
        assert_eq!(CostTier::default(), CostTier::Budget);
    }

    #[test]
    fn test_budget_friendly_covers_two_cheapest_tiers() {
        assert!(CostTier::Budget.is_budget_friendly());
        assert!(CostTier::Moderate.is_budget_friendly());
        assert!(!CostTier::Premium.is_budget_friendly());
    }

    #[test]
    fn test_vegan_implies_vegetarian_friendly() {
        let recipe = Recipe {
            id: "r1".to_string(),
            name: "Test".to_string(),
            meal: MealType::Lunch,
            ingredients: vec![],
            steps: vec![],
            minutes: None,
            note: None,
            vegetarian: false,
            vegan: true,
            gluten_free: false,
            lactose_free: false,
            cost: CostTier::Budget,
            calories: 0,
            synthetic: false,
        };
        assert!(recipe.is_vegetarian_friendly());
    }
}
