use serde_json::json;

use crate::models::IngredientCategory;

pub const RESPONSE_MIME_TYPE: &str = "application/json";

pub const RECIPE_REQUIRED: [&str; 5] = ["title", "ingredients", "instructions", "nutrition", "servings"];
pub const INGREDIENT_REQUIRED: [&str; 3] = ["name", "amount", "category"];
pub const STEP_REQUIRED: [&str; 2] = ["stepNumber", "instruction"];
pub const NUTRITION_REQUIRED: [&str; 5] = ["calories", "protein", "carbs", "fats", "healthScore"];

/// Response schema for recipe conversion, in the OpenAPI subset Gemini's
/// `responseSchema` accepts. Mirrors `models::Recipe` field for field.
pub fn recipe_schema() -> serde_json::Value {
    let categories: Vec<&str> = IngredientCategory::ALL.iter().map(|c| c.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "description": { "type": "STRING" },
            "prepTime": { "type": "STRING" },
            "cookTime": { "type": "STRING" },
            "servings": { "type": "INTEGER" },
            "ingredients": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "amount": { "type": "STRING" },
                        "originalName": {
                            "type": "STRING",
                            "description": "The name of the original ingredient if this is a substitution"
                        },
                        "substitutionReason": {
                            "type": "STRING",
                            "description": "Why this substitution was made"
                        },
                        "category": { "type": "STRING", "enum": categories },
                        "approxCost": {
                            "type": "STRING",
                            "description": "Estimated cost in user's currency (e.g., $1.50 or ₹50)"
                        }
                    },
                    "required": INGREDIENT_REQUIRED
                }
            },
            "instructions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "stepNumber": { "type": "INTEGER" },
                        "instruction": { "type": "STRING" }
                    },
                    "required": STEP_REQUIRED
                }
            },
            "nutrition": {
                "type": "OBJECT",
                "properties": {
                    "calories": { "type": "INTEGER" },
                    "protein": { "type": "STRING" },
                    "carbs": { "type": "STRING" },
                    "fats": { "type": "STRING" },
                    "healthScore": {
                        "type": "INTEGER",
                        "description": "Score from 0 to 100 based on nutritional density"
                    },
                    "insights": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "Brief bullet points about the nutritional value or health benefits"
                    }
                },
                "required": NUTRITION_REQUIRED
            },
            "estimatedCost": { "type": "STRING", "description": "Total estimated cost" },
            "tags": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": RECIPE_REQUIRED
    })
}
