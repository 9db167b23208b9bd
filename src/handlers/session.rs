use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::ConversionError;
use crate::models::{ConversionInput, Preferences, Recipe};
use crate::services::RecipeConverter;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub converted_at: DateTime<Utc>,
    pub recipe: Recipe,
}

/// Identifies one conversion. Only the most recently issued ticket may
/// update the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionTicket(u64);

#[derive(Debug)]
pub enum ConversionOutcome {
    Applied(Recipe),
    Failed(ConversionError),
    /// A newer conversion started while this one was in flight; its result was dropped.
    Superseded,
}

/// Read-only view of the session for the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub preferences: Preferences,
    pub is_loading: bool,
    pub error: Option<String>,
    pub current_recipe: Option<Recipe>,
    pub history_len: usize,
}

#[derive(Debug, Default)]
struct SessionState {
    preferences: Preferences,
    is_loading: bool,
    error: Option<String>,
    current_recipe: Option<Recipe>,
    history: Vec<HistoryEntry>, // newest first
    generation: u64,
}

/// Client-facing conversion state: preferences, current recipe, last error and
/// history. The lock is never held while the model is working.
pub struct ConversionSession {
    converter: Arc<RecipeConverter>,
    state: Arc<Mutex<SessionState>>,
}

/// Clears the loading flag if a conversion future is dropped before
/// `finish` runs (client went away mid-request).
struct InFlight {
    state: Arc<Mutex<SessionState>>,
    ticket: ConversionTicket,
    finished: bool,
}

impl InFlight {
    fn release(state: &mut SessionState, ticket: ConversionTicket) {
        if state.generation == ticket.0 && state.is_loading {
            log::warn!("🚫 Conversion #{} abandoned before it finished", ticket.0);
            state.is_loading = false;
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.finished {
            return;
        }

        let ticket = self.ticket;
        if let Ok(mut state) = self.state.try_lock() {
            Self::release(&mut state, ticket);
            return;
        }

        // Lock is busy; finish the cleanup on the runtime instead.
        let state = self.state.clone();
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                Self::release(&mut *state.lock().await, ticket);
            });
        }
    }
}

impl ConversionSession {
    pub fn new(converter: Arc<RecipeConverter>) -> Self {
        Self {
            converter,
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    pub async fn preferences(&self) -> Preferences {
        self.state.lock().await.preferences
    }

    pub async fn set_preferences(&self, preferences: Preferences) {
        log::debug!("⚙️ Preferences updated: {:?}", preferences);
        self.state.lock().await.preferences = preferences;
    }

    /// Applies `update` to the current preferences under one lock, so
    /// concurrent partial updates never lose each other's changes.
    pub async fn update_preferences<F>(&self, update: F) -> Preferences
    where
        F: FnOnce(Preferences) -> Preferences,
    {
        let mut state = self.state.lock().await;
        state.preferences = update(state.preferences);
        log::debug!("⚙️ Preferences updated: {:?}", state.preferences);
        state.preferences
    }

    /// Starts a conversion: marks the session loading, clears the error and
    /// returns the ticket plus the preferences the call must use.
    pub async fn begin(&self) -> (ConversionTicket, Preferences) {
        let mut state = self.state.lock().await;
        state.generation += 1;
        state.is_loading = true;
        state.error = None;
        (ConversionTicket(state.generation), state.preferences)
    }

    pub async fn finish(
        &self,
        ticket: ConversionTicket,
        result: Result<Recipe, ConversionError>,
    ) -> ConversionOutcome {
        let mut state = self.state.lock().await;

        if ticket.0 != state.generation {
            log::warn!(
                "⏭️ Dropping result of conversion #{} (latest is #{})",
                ticket.0,
                state.generation
            );
            return ConversionOutcome::Superseded;
        }

        state.is_loading = false;

        match result {
            Ok(recipe) => {
                let substitutions = recipe.substitutions().len();
                log::info!("📚 Storing '{}' ({} substitutions)", recipe.title, substitutions);

                state.current_recipe = Some(recipe.clone());
                state.history.insert(
                    0,
                    HistoryEntry {
                        converted_at: Utc::now(),
                        recipe: recipe.clone(),
                    },
                );
                ConversionOutcome::Applied(recipe)
            }
            Err(e) => {
                log::info!("🔁 Conversion failed (retryable: {})", e.is_retryable());
                state.error = Some(e.user_message());
                ConversionOutcome::Failed(e)
            }
        }
    }

    /// Empty input is rejected up front and leaves the session untouched, so
    /// it can never supersede a conversion already in flight.
    pub async fn convert(&self, input: ConversionInput) -> ConversionOutcome {
        if input.is_empty() {
            log::warn!("⚠️ Ignoring empty {} input", input.kind());
            return ConversionOutcome::Failed(ConversionError::EmptyInput);
        }

        let (ticket, preferences) = self.begin().await;
        let mut in_flight = InFlight {
            state: self.state.clone(),
            ticket,
            finished: false,
        };

        let result = self.converter.convert(&input, &preferences).await;
        let outcome = self.finish(ticket, result).await;
        in_flight.finished = true;
        outcome
    }

    pub async fn current_recipe(&self) -> Option<Recipe> {
        self.state.lock().await.current_recipe.clone()
    }

    /// One page of history, newest first.
    pub async fn history(&self, offset: usize, limit: usize) -> Vec<HistoryEntry> {
        self.state
            .lock()
            .await
            .history
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    pub async fn dismiss_error(&self) {
        self.state.lock().await.error = None;
    }

    /// Back to the input screen. History is kept.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.current_recipe = None;
        state.error = None;
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().await;
        SessionSnapshot {
            preferences: state.preferences,
            is_loading: state.is_loading,
            error: state.error.clone(),
            current_recipe: state.current_recipe.clone(),
            history_len: state.history.len(),
        }
    }
}
