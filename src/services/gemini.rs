use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ModelError;
use crate::services::ai_service::{GenerationRequest, GenerativeModel, Part};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Google Gemini `generateContent` client.
pub struct GeminiService {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiService {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replaces the HTTP client with one that gives up after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, reqwest::Error> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_body(request: &GenerationRequest) -> GenerateContentRequest {
        let parts = request
            .parts
            .iter()
            .map(|part| match part {
                Part::Text(text) => ContentPart::Text { text: text.clone() },
                Part::InlineData { mime_type, data } => ContentPart::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.clone(),
                        data: general_purpose::STANDARD.encode(data),
                    },
                },
            })
            .collect();

        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config: GenerationConfig {
                response_mime_type: request.response_mime_type.clone(),
                response_schema: request.response_schema.clone(),
                temperature: request.temperature,
            },
        }
    }

    /// Text of the first candidate, parts joined. `None` if there is none.
    fn extract_text(response: GenerateContentResponse) -> Option<String> {
        let candidate = response.candidates.into_iter().next()?;

        if let Some(reason) = candidate.finish_reason.as_deref() {
            if reason != "STOP" {
                log::warn!("⚠️ Gemini finished with reason: {}", reason);
            }
        }

        let text: String = candidate
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait::async_trait]
impl GenerativeModel for GeminiService {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, ModelError> {
        let body = Self::build_body(request);

        log::info!("🤖 Sending request to Gemini with model: {}", self.model);
        log::debug!("📤 Request payload size: {} bytes", serde_json::to_vec(&body)?.len());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        log::debug!("📥 Gemini response status: {}", status);

        let response_text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&response_text)
                .map(|body| body.error.message)
                .unwrap_or(response_text);
            log::error!("❌ Gemini API error ({}): {}", status, message);
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&response_text)?;

        if let Some(reason) = parsed
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            log::warn!("⚠️ Gemini blocked the prompt: {}", reason);
        }

        Ok(Self::extract_text(parsed))
    }
}
