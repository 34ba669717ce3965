use recipe::Recipe;

/// Format the text block handed to the platform share action: name,
/// ingredient bullets, numbered steps, calorie line.
pub fn share_text(recipe: &Recipe) -> String {
    let mut lines = Vec::new();

    lines.push(recipe.name.clone());
    lines.push(String::new());

    lines.push("Ingredients:".to_string());
    for ingredient in &recipe.ingredients {
        lines.push(format!("- {}", ingredient));
    }
    lines.push(String::new());

    lines.push("Steps:".to_string());
    for (i, step) in recipe.steps.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, step));
    }
    lines.push(String::new());

    lines.push(format!("Calories: {} kcal", recipe.calories));

    lines.join("\n")
}
