use axum::{
    extract::{DefaultBodyLimit, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::errors::ConversionError;
use crate::handlers::{ConversionOutcome, ConversionSession};
use crate::models::{ConversionInput, DietaryFilter, Goal, Preferences, RegionalStyle};

/// Body of `POST /api/convert`.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ConvertRequest {
    Text {
        content: String,
    },
    Image {
        /// Base64 payload or a `data:` URL.
        data: String,
        #[serde(rename = "mimeType", default)]
        mime_type: Option<String>,
    },
}

impl ConvertRequest {
    fn into_input(self) -> Result<ConversionInput, base64::DecodeError> {
        match self {
            ConvertRequest::Text { content } => Ok(ConversionInput::text(content)),
            ConvertRequest::Image { data, mime_type } => ConversionInput::image_base64(&data, mime_type),
        }
    }
}

/// Body of `PATCH /api/preferences`: only the fields present change.
#[derive(Debug, Default, Deserialize)]
pub struct PreferencesPatch {
    pub dietary: Option<DietaryFilter>,
    pub region: Option<RegionalStyle>,
    pub servings: Option<u32>,
    pub goal: Option<Goal>,
}

impl PreferencesPatch {
    fn apply(self, mut prefs: Preferences) -> Preferences {
        if let Some(dietary) = self.dietary {
            prefs = prefs.with_dietary(dietary);
        }
        if let Some(region) = self.region {
            prefs = prefs.with_region(region);
        }
        if let Some(servings) = self.servings {
            prefs = prefs.with_servings(servings);
        }
        if let Some(goal) = self.goal {
            prefs = prefs.with_goal(goal);
        }
        prefs
    }
}

const DEFAULT_HISTORY_PAGE: usize = 20;
const MAX_HISTORY_PAGE: usize = 100;

/// Query of `GET /api/history`.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<ConversionSession>,
}

/// `max_body_bytes` caps request bodies; photos arrive base64-encoded inside
/// the JSON, so it must cover the encoded size.
pub fn create_router(session: Arc<ConversionSession>, max_body_bytes: usize) -> Router {
    let state = AppState { session };

    Router::new()
        .route("/health", get(health_check))
        .route("/api/session", get(get_session))
        .route(
            "/api/preferences",
            get(get_preferences).put(put_preferences).patch(patch_preferences),
        )
        .route("/api/convert", post(convert_recipe))
        .route("/api/recipe", get(get_recipe).delete(reset_recipe))
        .route("/api/recipe/shopping-list", get(get_shopping_list))
        .route("/api/error", delete(dismiss_error))
        .route("/api/history", get(get_history))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

async fn health_check() -> &'static str {
    "OK"
}

async fn get_session(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.session.snapshot().await)
}

async fn get_preferences(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.session.preferences().await)
}

async fn put_preferences(
    State(state): State<AppState>,
    Json(preferences): Json<Preferences>,
) -> impl IntoResponse {
    state.session.set_preferences(preferences).await;
    Json(preferences)
}

async fn patch_preferences(
    State(state): State<AppState>,
    Json(patch): Json<PreferencesPatch>,
) -> impl IntoResponse {
    let preferences = state
        .session
        .update_preferences(|current| patch.apply(current))
        .await;
    Json(preferences)
}

async fn convert_recipe(State(state): State<AppState>, Json(body): Json<ConvertRequest>) -> Response {
    log::info!("📨 Conversion request received");

    let input = match body.into_input() {
        Ok(input) => input,
        Err(e) => {
            log::warn!("⚠️ Rejecting image that is not valid base64: {}", e);
            return error_response(StatusCode::BAD_REQUEST, "Image data is not valid base64.");
        }
    };

    match state.session.convert(input).await {
        ConversionOutcome::Applied(recipe) => (StatusCode::OK, Json(recipe)).into_response(),
        ConversionOutcome::Failed(err) => {
            let status = match err {
                ConversionError::EmptyInput => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            };
            error_response(status, err.user_message())
        }
        ConversionOutcome::Superseded => error_response(
            StatusCode::CONFLICT,
            "A newer conversion replaced this one.",
        ),
    }
}

async fn get_recipe(State(state): State<AppState>) -> Response {
    match state.session.current_recipe().await {
        Some(recipe) => Json(recipe).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "No recipe converted yet."),
    }
}

async fn reset_recipe(State(state): State<AppState>) -> StatusCode {
    state.session.reset().await;
    StatusCode::NO_CONTENT
}

async fn dismiss_error(State(state): State<AppState>) -> StatusCode {
    state.session.dismiss_error().await;
    StatusCode::NO_CONTENT
}

async fn get_shopping_list(State(state): State<AppState>) -> Response {
    match state.session.current_recipe().await {
        Some(recipe) => Json(recipe.shopping_list()).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "No recipe converted yet."),
    }
}

async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> impl IntoResponse {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_PAGE)
        .min(MAX_HISTORY_PAGE);
    Json(state.session.history(query.offset.unwrap_or(0), limit).await)
}
