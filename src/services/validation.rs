use crate::models::Recipe;

/// Checks a parsed recipe against the invariants the client relies on.
/// Reports every problem found; never modifies the recipe.
pub fn validate_recipe(recipe: &Recipe) -> Result<(), Vec<String>> {
    let mut violations = Vec::new();

    if recipe.title.trim().is_empty() {
        violations.push("title is empty".to_string());
    }
    if recipe.servings == 0 {
        violations.push("servings must be at least 1".to_string());
    }
    if recipe.ingredients.is_empty() {
        violations.push("recipe has no ingredients".to_string());
    }
    if recipe.instructions.is_empty() {
        violations.push("recipe has no instructions".to_string());
    }

    for (index, ingredient) in recipe.ingredients.iter().enumerate() {
        if ingredient.name.trim().is_empty() {
            violations.push(format!("ingredient {} has no name", index + 1));
        }
        if ingredient.amount.trim().is_empty() {
            violations.push(format!("ingredient {} has no amount", index + 1));
        }
        if ingredient.original_name.is_some() != ingredient.substitution_reason.is_some() {
            violations.push(format!(
                "ingredient {} has only one of originalName/substitutionReason",
                index + 1
            ));
        }
    }

    for step in &recipe.instructions {
        if step.step_number == 0 {
            violations.push("instruction step numbers start at 1".to_string());
        }
        if step.instruction.trim().is_empty() {
            violations.push(format!("step {} has no instruction", step.step_number));
        }
    }

    if !(0..=100).contains(&recipe.nutrition.health_score) {
        violations.push(format!(
            "healthScore {} is outside 0-100",
            recipe.nutrition.health_score
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
