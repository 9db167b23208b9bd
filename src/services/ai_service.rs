use crate::errors::ModelError;

/// One piece of a multimodal prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    InlineData { mime_type: String, data: Vec<u8> },
}

/// Provider-neutral description of a structured generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub parts: Vec<Part>,
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
    pub temperature: f32,
}

/// Trait for hosted generative models (Gemini, test fakes, ...)
#[async_trait::async_trait]
pub trait GenerativeModel: Send + Sync {
    fn model_name(&self) -> &str;

    /// Sends one request. `Ok(None)` means the provider answered without any text.
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, ModelError>;
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned responses in order and records every request it sees.
    pub struct ScriptedModel {
        responses: Mutex<VecDeque<Result<Option<String>, ModelError>>>,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedModel {
        pub fn new(responses: Vec<Result<Option<String>, ModelError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn replying(text: impl Into<String>) -> Self {
            Self::new(vec![Ok(Some(text.into()))])
        }

        pub fn requests(&self) -> Vec<GenerationRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl GenerativeModel for ScriptedModel {
        fn model_name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, ModelError> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ModelError::EmptyResponse))
        }
    }

    /// Never answers; stands in for a model call the client gives up on.
    pub struct StalledModel;

    #[async_trait::async_trait]
    impl GenerativeModel for StalledModel {
        fn model_name(&self) -> &str {
            "stalled"
        }

        async fn generate(&self, _request: &GenerationRequest) -> Result<Option<String>, ModelError> {
            std::future::pending().await
        }
    }

    /// A complete, valid model reply for a vegan Indian butter chicken.
    pub fn sample_recipe_json(servings: u32) -> String {
        serde_json::json!({
            "title": "Vegan Butter Tofu Masala",
            "description": "A budget-friendly plant-based take on butter chicken.",
            "prepTime": "15 mins",
            "cookTime": "30 mins",
            "servings": servings,
            "ingredients": [
                {
                    "name": "Firm tofu",
                    "amount": "400 g",
                    "originalName": "Chicken thighs",
                    "substitutionReason": "Vegan protein that holds its shape",
                    "category": "pantry",
                    "approxCost": "₹120"
                },
                { "name": "Coconut cream", "amount": "200 ml", "category": "pantry" },
                { "name": "Tomatoes", "amount": "4 medium", "category": "produce" },
                { "name": "Garam masala", "amount": "2 tsp", "category": "spices" }
            ],
            "instructions": [
                { "stepNumber": 1, "instruction": "Press and cube the tofu." },
                { "stepNumber": 3, "instruction": "Simmer the tofu in the sauce." },
                { "stepNumber": 2, "instruction": "Blend tomatoes with spices and cook down." }
            ],
            "nutrition": {
                "calories": 380,
                "protein": "18g",
                "carbs": "16g",
                "fats": "26g",
                "healthScore": 72,
                "insights": ["High in plant protein", "No cholesterol"]
            },
            "estimatedCost": "₹350",
            "tags": ["vegan", "indian", "budget"]
        })
        .to_string()
    }
}
