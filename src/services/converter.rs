use std::sync::Arc;

use crate::errors::{ConversionError, ModelError};
use crate::models::{ConversionInput, Preferences, Recipe};
use crate::services::ai_service::{GenerationRequest, GenerativeModel};
use crate::services::{prompt, schema, validation};

/// Low temperature keeps the JSON shape consistent between calls.
pub const CONVERSION_TEMPERATURE: f32 = 0.4;

/// Turns raw recipe input plus preferences into a `Recipe` with one model call.
/// Holds no per-call state, so a single instance can serve concurrent requests.
pub struct RecipeConverter {
    model: Arc<dyn GenerativeModel>,
}

impl RecipeConverter {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub fn build_request(&self, input: &ConversionInput, prefs: &Preferences) -> GenerationRequest {
        GenerationRequest {
            parts: prompt::build_parts(input, prefs),
            response_mime_type: schema::RESPONSE_MIME_TYPE.to_string(),
            response_schema: schema::recipe_schema(),
            temperature: CONVERSION_TEMPERATURE,
        }
    }

    pub async fn convert(
        &self,
        input: &ConversionInput,
        prefs: &Preferences,
    ) -> Result<Recipe, ConversionError> {
        if input.is_empty() {
            log::warn!("⚠️ Refusing to convert empty {} input", input.kind());
            return Err(ConversionError::EmptyInput);
        }

        let request = self.build_request(input, prefs);

        log::info!(
            "🍳 Converting {} input with {} (diet={}, region={}, servings={}, goal={})",
            input.kind(),
            self.model.model_name(),
            prefs.dietary(),
            prefs.region(),
            prefs.servings(),
            prefs.goal()
        );

        let text = match self.model.generate(&request).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                log::error!("❌ Recipe conversion failed: model returned no text");
                return Err(ConversionError::Failed(ModelError::EmptyResponse));
            }
            Err(e) => {
                log::error!("❌ Recipe conversion failed: {}", e);
                return Err(ConversionError::Failed(e));
            }
        };

        log::debug!("📄 Model returned {} bytes", text.len());

        let recipe = parse_recipe(&text)?;

        if let Err(violations) = validation::validate_recipe(&recipe) {
            log::error!("❌ Converted recipe failed validation: {}", violations.join("; "));
            return Err(ConversionError::InvalidRecipe(violations));
        }

        if recipe.servings != prefs.servings() {
            // Trusted as reported; the model owns scaling.
            log::warn!(
                "⚠️ Requested {} servings but model returned {}",
                prefs.servings(),
                recipe.servings
            );
        }

        log::info!(
            "✅ Converted '{}' ({} ingredients, {} steps)",
            recipe.title,
            recipe.ingredients.len(),
            recipe.instructions.len()
        );

        Ok(recipe)
    }
}

fn parse_recipe(text: &str) -> Result<Recipe, ConversionError> {
    serde_json::from_str(text.trim()).map_err(|e| {
        log::error!("❌ Could not parse model output as a recipe: {}", e);
        ConversionError::Malformed(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DietaryFilter, Goal, IngredientCategory, RegionalStyle};
    use crate::services::ai_service::fake::{sample_recipe_json, ScriptedModel};
    use crate::services::ai_service::Part;

    fn vegan_indian_budget() -> Preferences {
        Preferences::new(DietaryFilter::Vegan, RegionalStyle::Indian, 4, Goal::Budget)
    }

    fn converter(model: &Arc<ScriptedModel>) -> RecipeConverter {
        RecipeConverter::new(model.clone())
    }

    #[tokio::test]
    async fn test_convert_text_returns_parsed_recipe() {
        let model = Arc::new(ScriptedModel::replying(sample_recipe_json(4)));
        let recipe = converter(&model)
            .convert(&ConversionInput::text("Butter Chicken"), &vegan_indian_budget())
            .await
            .unwrap();

        assert_eq!(recipe.title, "Vegan Butter Tofu Masala");
        assert!(!recipe.ingredients.is_empty());
        assert!(!recipe.instructions.is_empty());
        for ingredient in &recipe.ingredients {
            assert!(!ingredient.name.is_empty());
            assert!(!ingredient.amount.is_empty());
            assert!(IngredientCategory::ALL.contains(&ingredient.category));
        }
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_request_carries_schema_and_temperature() {
        let model = Arc::new(ScriptedModel::replying(sample_recipe_json(4)));
        converter(&model)
            .convert(&ConversionInput::text("Butter Chicken"), &vegan_indian_budget())
            .await
            .unwrap();

        let request = &model.requests()[0];
        assert_eq!(request.response_mime_type, "application/json");
        assert_eq!(request.response_schema, schema::recipe_schema());
        assert_eq!(request.temperature, 0.4);
        assert_eq!(request.parts.len(), 2);
        assert!(matches!(&request.parts[1], Part::Text(t) if t.contains("Dietary Requirement: Vegan")));
    }

    #[tokio::test]
    async fn test_steps_pass_through_unchanged() {
        let model = Arc::new(ScriptedModel::replying(sample_recipe_json(2)));
        let recipe = converter(&model)
            .convert(&ConversionInput::text("Butter Chicken"), &Preferences::default())
            .await
            .unwrap();

        let steps: Vec<u32> = recipe.instructions.iter().map(|s| s.step_number).collect();
        assert_eq!(steps, vec![1, 3, 2]);
        assert_eq!(recipe.instructions[1].instruction, "Simmer the tofu in the sauce.");
    }

    #[tokio::test]
    async fn test_model_servings_are_trusted_verbatim() {
        // Asked for 4, model says 6: returned as-is, only logged.
        let model = Arc::new(ScriptedModel::replying(sample_recipe_json(6)));
        let recipe = converter(&model)
            .convert(&ConversionInput::text("Butter Chicken"), &vegan_indian_budget())
            .await
            .unwrap();

        assert_eq!(recipe.servings, 6);
    }

    #[tokio::test]
    async fn test_repeated_calls_conform_without_being_equal() {
        let mut second: serde_json::Value = serde_json::from_str(&sample_recipe_json(4)).unwrap();
        second["title"] = serde_json::json!("Tofu Makhani");
        let model = Arc::new(ScriptedModel::new(vec![
            Ok(Some(sample_recipe_json(4))),
            Ok(Some(second.to_string())),
        ]));
        let converter = converter(&model);
        let input = ConversionInput::text("Butter Chicken");

        for _ in 0..2 {
            let recipe = converter.convert(&input, &vegan_indian_budget()).await.unwrap();
            assert!(validation::validate_recipe(&recipe).is_ok());
        }
        assert_eq!(model.call_count(), 2);
    }

    #[tokio::test]
    async fn test_transport_error_maps_to_conversion_failure() {
        let model = Arc::new(ScriptedModel::new(vec![Err(ModelError::Api {
            status: 500,
            message: "internal".to_string(),
        })]));
        let err = converter(&model)
            .convert(&ConversionInput::text("Pancakes"), &Preferences::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ConversionError::Failed(ModelError::Api { status: 500, .. })));
        assert_eq!(err.to_string(), "Failed to convert recipe. Please try again.");
    }

    #[tokio::test]
    async fn test_missing_text_maps_to_conversion_failure() {
        let model = Arc::new(ScriptedModel::new(vec![Ok(None)]));
        let err = converter(&model)
            .convert(&ConversionInput::text("Pancakes"), &Preferences::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ConversionError::Failed(ModelError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_truncated_json_is_malformed() {
        let json = sample_recipe_json(2);
        let truncated: String = json.chars().take(json.chars().count() / 2).collect();
        let model = Arc::new(ScriptedModel::replying(truncated));

        let err = converter(&model)
            .convert(&ConversionInput::text("Pancakes"), &Preferences::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ConversionError::Malformed(_)));
        assert_eq!(err.to_string(), "Failed to convert recipe. Please try again.");
    }

    #[tokio::test]
    async fn test_missing_required_field_is_malformed() {
        let mut value: serde_json::Value = serde_json::from_str(&sample_recipe_json(2)).unwrap();
        value["nutrition"].as_object_mut().unwrap().remove("healthScore");
        let model = Arc::new(ScriptedModel::replying(value.to_string()));

        let err = converter(&model)
            .convert(&ConversionInput::text("Pancakes"), &Preferences::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ConversionError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_schema_violation_is_distinguishable() {
        let mut value: serde_json::Value = serde_json::from_str(&sample_recipe_json(2)).unwrap();
        value["ingredients"] = serde_json::json!([]);
        let model = Arc::new(ScriptedModel::replying(value.to_string()));

        let err = converter(&model)
            .convert(&ConversionInput::text("Pancakes"), &Preferences::default())
            .await
            .unwrap_err();

        match err {
            ConversionError::InvalidRecipe(violations) => {
                assert_eq!(violations, vec!["recipe has no ingredients".to_string()]);
            }
            other => panic!("expected InvalidRecipe, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_image_short_circuits() {
        let model = Arc::new(ScriptedModel::replying(sample_recipe_json(2)));
        let err = converter(&model)
            .convert(&ConversionInput::image(Vec::new(), None), &Preferences::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ConversionError::EmptyInput));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_text_short_circuits() {
        let model = Arc::new(ScriptedModel::replying(sample_recipe_json(2)));
        let err = converter(&model)
            .convert(&ConversionInput::text("  \n "), &Preferences::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ConversionError::EmptyInput));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_image_request_uses_detected_mime_type() {
        let model = Arc::new(ScriptedModel::replying(sample_recipe_json(2)));
        let png = b"\x89PNG\r\n\x1a\n\x00\x00".to_vec();
        converter(&model)
            .convert(&ConversionInput::image(png.clone(), None), &Preferences::default())
            .await
            .unwrap();

        let request = &model.requests()[0];
        assert_eq!(
            request.parts[0],
            Part::InlineData {
                mime_type: "image/png".to_string(),
                data: png,
            }
        );
    }
}
