use recipe::Recipe;

/// Recipes at most this long count as quick.
pub const QUICK_MINUTES_MAX: u32 = 20;

/// A missing duration is treated as effectively unbounded so quick-only
/// filtering excludes it.
const MISSING_DURATION_MINUTES: u32 = 999;

/// The active filter toggles, held only in transient UI state.
///
/// `matches` is a pure predicate; the vegan/vegetarian coupling lives in the
/// setters because it is a UI convenience, not a data invariant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub lactose_free: bool,
    pub quick_only: bool,
    pub budget_only: bool,
}

impl FilterSet {
    /// All enabled constraints must hold for a recipe to be included.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if self.vegan {
            if !recipe.vegan {
                return false;
            }
        } else if self.vegetarian && !recipe.is_vegetarian_friendly() {
            return false;
        }

        if self.quick_only
            && recipe.minutes.unwrap_or(MISSING_DURATION_MINUTES) > QUICK_MINUTES_MAX
        {
            return false;
        }

        if self.budget_only && !recipe.cost.is_budget_friendly() {
            return false;
        }

        if self.gluten_free && !recipe.gluten_free {
            return false;
        }

        if self.lactose_free && !recipe.lactose_free {
            return false;
        }

        true
    }

    /// Turning vegan on also turns vegetarian on.
    pub fn set_vegan(&mut self, on: bool) {
        self.vegan = on;
        if on {
            self.vegetarian = true;
        }
    }

    /// Turning vegetarian off clears vegan; turning it on leaves vegan as
    /// it was.
    pub fn set_vegetarian(&mut self, on: bool) {
        self.vegetarian = on;
        if !on {
            self.vegan = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe::{CostTier, MealType};

    fn recipe() -> Recipe {
        Recipe {
            id: "r1".to_string(),
            name: "Test Recipe".to_string(),
            meal: MealType::Lunch,
            ingredients: vec![],
            steps: vec![],
            minutes: Some(15),
            note: None,
            vegetarian: false,
            vegan: false,
            gluten_free: false,
            lactose_free: false,
            cost: CostTier::Budget,
            calories: 400,
            synthetic: false,
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(FilterSet::default().matches(&recipe()));
    }

    #[test]
    fn test_vegan_filter_requires_vegan_flag() {
        let filters = FilterSet {
            vegan: true,
            vegetarian: true,
            ..FilterSet::default()
        };

        let mut r = recipe();
        r.vegetarian = true;
        assert!(!filters.matches(&r), "vegetarian alone does not satisfy vegan");

        r.vegan = true;
        assert!(filters.matches(&r));
    }

    #[test]
    fn test_vegetarian_filter_accepts_vegan_recipes() {
        let filters = FilterSet {
            vegetarian: true,
            ..FilterSet::default()
        };

        let mut r = recipe();
        assert!(!filters.matches(&r));

        r.vegan = true;
        assert!(filters.matches(&r), "vegan implies vegetarian when filtering");
    }

    #[test]
    fn test_quick_filter_boundary_and_missing_duration() {
        let filters = FilterSet {
            quick_only: true,
            ..FilterSet::default()
        };

        let mut r = recipe();
        r.minutes = Some(QUICK_MINUTES_MAX);
        assert!(filters.matches(&r), "exactly 20 minutes is quick");

        r.minutes = Some(QUICK_MINUTES_MAX + 1);
        assert!(!filters.matches(&r));

        r.minutes = None;
        assert!(!filters.matches(&r), "missing duration is excluded");
    }

    #[test]
    fn test_budget_filter_allows_two_cheapest_tiers() {
        let filters = FilterSet {
            budget_only: true,
            ..FilterSet::default()
        };

        let mut r = recipe();
        r.cost = CostTier::Budget;
        assert!(filters.matches(&r));
        r.cost = CostTier::Moderate;
        assert!(filters.matches(&r));
        r.cost = CostTier::Premium;
        assert!(!filters.matches(&r));
    }

    #[test]
    fn test_dietary_flag_filters() {
        let mut r = recipe();
        r.gluten_free = true;

        let gluten = FilterSet {
            gluten_free: true,
            ..FilterSet::default()
        };
        assert!(gluten.matches(&r));

        let lactose = FilterSet {
            lactose_free: true,
            ..FilterSet::default()
        };
        assert!(!lactose.matches(&r));
    }

    #[test]
    fn test_all_constraints_are_anded() {
        let filters = FilterSet {
            vegetarian: true,
            quick_only: true,
            budget_only: true,
            ..FilterSet::default()
        };

        let mut r = recipe();
        r.vegetarian = true;
        r.minutes = Some(10);
        r.cost = CostTier::Budget;
        assert!(filters.matches(&r));

        r.cost = CostTier::Premium;
        assert!(!filters.matches(&r), "one failing constraint excludes");
    }

    #[test]
    fn test_setting_vegan_forces_vegetarian() {
        let mut filters = FilterSet::default();
        filters.set_vegan(true);

        assert!(filters.vegan);
        assert!(filters.vegetarian);
    }

    #[test]
    fn test_clearing_vegetarian_clears_vegan() {
        let mut filters = FilterSet::default();
        filters.set_vegan(true);
        filters.set_vegetarian(false);

        assert!(!filters.vegetarian);
        assert!(!filters.vegan);
    }

    #[test]
    fn test_clearing_vegan_keeps_vegetarian() {
        let mut filters = FilterSet::default();
        filters.set_vegan(true);
        filters.set_vegan(false);

        assert!(filters.vegetarian, "vegan off does not clear vegetarian");
        assert!(!filters.vegan);
    }
}
