use std::collections::HashMap;

use meal_planning::WeekPlan;

/// One shopping list line: an ingredient and how many plan slots need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingItem {
    pub ingredient: String,
    pub count: usize,
}

/// Shopping List Service
///
/// Stateless domain service that tallies ingredient occurrences across the
/// non-empty slots of a weekly plan and renders them as "ingredient ×count"
/// lines, most-needed first.
pub struct ShoppingListService;

impl ShoppingListService {
    /// Tally ingredient occurrence counts across all filled plan slots.
    ///
    /// Sorted descending by count; ties keep the order in which the
    /// ingredients first appear in the plan (stable sort).
    pub fn build(plan: &WeekPlan) -> Vec<ShoppingItem> {
        let mut items: Vec<ShoppingItem> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for slot in plan.slots() {
            let Some(recipe) = &slot.recipe else {
                continue;
            };
            for ingredient in &recipe.ingredients {
                match index.get(ingredient) {
                    Some(&i) => items[i].count += 1,
                    None => {
                        index.insert(ingredient.clone(), items.len());
                        items.push(ShoppingItem {
                            ingredient: ingredient.clone(),
                            count: 1,
                        });
                    }
                }
            }
        }

        items.sort_by(|a, b| b.count.cmp(&a.count));
        items
    }

    /// Render one "ingredient ×count" line per item.
    pub fn render(items: &[ShoppingItem]) -> String {
        items
            .iter()
            .map(|item| format!("{} ×{}", item.ingredient, item.count))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
