use rand::seq::IndexedRandom;
use rand::Rng;

use recipe::{Catalog, MealType, Recipe};

use crate::filter::FilterSet;
use crate::history::History;

/// Pick one recipe for a meal, preferring ones not shown recently.
///
/// The eligible pool is the catalog narrowed to the meal category and the
/// filter predicate. Entries shown for that category within the recent
/// window are removed first; if that leaves nothing, the choice falls back
/// to the full eligible pool (repeats allowed when no fresh option exists).
/// An empty eligible pool yields `None`; "nothing available" is a
/// user-visible outcome, not an error.
///
/// Random choice goes through the caller-supplied `rng` so selection is
/// deterministic under test.
pub fn pick_recipe<'a, R: Rng + ?Sized>(
    catalog: &'a Catalog,
    meal: MealType,
    filters: &FilterSet,
    history: &History,
    today: i64,
    rng: &mut R,
) -> Option<&'a Recipe> {
    let eligible: Vec<&Recipe> = catalog
        .by_meal(meal)
        .filter(|r| filters.matches(r))
        .collect();
    if eligible.is_empty() {
        tracing::debug!(meal = %meal, "no eligible recipe for selection");
        return None;
    }

    let recent = history.recent_ids(meal, today);
    let fresh: Vec<&Recipe> = eligible
        .iter()
        .copied()
        .filter(|r| !recent.contains(r.id.as_str()))
        .collect();

    let pool = if fresh.is_empty() { &eligible } else { &fresh };
    pool.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use recipe::CostTier;

    fn recipe(id: &str, meal: MealType) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: format!("Recipe {}", id),
            meal,
            ingredients: vec![],
            steps: vec![],
            minutes: Some(30),
            note: None,
            vegetarian: false,
            vegan: false,
            gluten_free: false,
            lactose_free: false,
            cost: CostTier::Moderate,
            calories: 500,
            synthetic: false,
        }
    }

    fn catalog_of(ids: &[&str], meal: MealType) -> Catalog {
        Catalog::new(ids.iter().map(|id| recipe(id, meal)).collect())
    }

    #[test]
    fn test_recently_shown_recipes_are_avoided() {
        let catalog = catalog_of(&["a", "b", "c"], MealType::Lunch);
        let today = 100;

        // Everything but the expanded variants of "c" was shown this week.
        let mut history = History::new();
        for r in catalog.by_meal(MealType::Lunch) {
            if !r.id.starts_with("c") {
                history.record(r.id.clone(), MealType::Lunch, today - 1);
            }
        }

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let chosen = pick_recipe(
                &catalog,
                MealType::Lunch,
                &FilterSet::default(),
                &history,
                today,
                &mut rng,
            )
            .expect("pool is non-empty");
            assert!(
                chosen.id.starts_with("c"),
                "picked recently shown '{}'",
                chosen.id
            );
        }
    }

    #[test]
    fn test_falls_back_to_full_pool_when_everything_is_recent() {
        let catalog = catalog_of(&["a"], MealType::Dinner);
        let today = 100;

        let mut history = History::new();
        for r in catalog.by_meal(MealType::Dinner) {
            history.record(r.id.clone(), MealType::Dinner, today);
        }

        let mut rng = StdRng::seed_from_u64(1);
        let chosen = pick_recipe(
            &catalog,
            MealType::Dinner,
            &FilterSet::default(),
            &history,
            today,
            &mut rng,
        );

        assert!(chosen.is_some(), "repeat allowed when no fresh option exists");
    }

    #[test]
    fn test_empty_eligible_pool_yields_none() {
        let catalog = catalog_of(&["a"], MealType::Lunch);

        let mut rng = StdRng::seed_from_u64(1);
        let chosen = pick_recipe(
            &catalog,
            MealType::Breakfast,
            &FilterSet::default(),
            &History::new(),
            100,
            &mut rng,
        );

        assert!(chosen.is_none());
    }

    #[test]
    fn test_filters_narrow_the_eligible_pool() {
        let mut vegan = recipe("vegan-bowl", MealType::Lunch);
        vegan.vegan = true;
        let catalog = Catalog::new(vec![recipe("omnivore", MealType::Lunch), vegan]);

        let filters = FilterSet {
            vegan: true,
            vegetarian: true,
            ..FilterSet::default()
        };

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            let chosen = pick_recipe(
                &catalog,
                MealType::Lunch,
                &filters,
                &History::new(),
                100,
                &mut rng,
            )
            .expect("vegan pool is non-empty");
            assert!(chosen.vegan, "picked non-vegan '{}'", chosen.id);
        }
    }

    #[test]
    fn test_entries_shown_a_week_ago_are_eligible_again() {
        let catalog = catalog_of(&["a"], MealType::Breakfast);
        let today = 100;

        let mut history = History::new();
        history.record("a", MealType::Breakfast, today - 7);

        // "a" itself is out of the recent window, so only its variants
        // compete with it; either way a recipe is returned.
        let recent = history.recent_ids(MealType::Breakfast, today);
        assert!(!recent.contains("a"));
    }
}
