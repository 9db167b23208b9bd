use thiserror::Error;

/// Shown for every transport, provider or parse failure.
pub const CONVERSION_FAILED_MESSAGE: &str = "Failed to convert recipe. Please try again.";
pub const INVALID_RECIPE_MESSAGE: &str = "The converted recipe was incomplete. Please try again.";
pub const EMPTY_INPUT_MESSAGE: &str = "Please paste a recipe or add a photo first.";

/// Failures talking to the generative model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode model response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("model returned no text")]
    EmptyResponse,
}

/// The only error the converter hands back to its callers. `Display` is the
/// message the client shows to the user verbatim; causes stay in `source()`.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("{}", EMPTY_INPUT_MESSAGE)]
    EmptyInput,

    #[error("{}", CONVERSION_FAILED_MESSAGE)]
    Failed(#[source] ModelError),

    #[error("{}", CONVERSION_FAILED_MESSAGE)]
    Malformed(#[source] serde_json::Error),

    #[error("{}", INVALID_RECIPE_MESSAGE)]
    InvalidRecipe(Vec<String>),
}

impl ConversionError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Whether sending the same input again could succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ConversionError::EmptyInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_transport_and_parse_failures_share_one_message() {
        let failed = ConversionError::Failed(ModelError::EmptyResponse);
        let malformed = ConversionError::Malformed(
            serde_json::from_str::<serde_json::Value>("{\"title\":").unwrap_err(),
        );
        let api = ConversionError::Failed(ModelError::Api {
            status: 503,
            message: "overloaded".to_string(),
        });

        assert_eq!(failed.user_message(), "Failed to convert recipe. Please try again.");
        assert_eq!(malformed.user_message(), failed.user_message());
        assert_eq!(api.user_message(), failed.user_message());
    }

    #[test]
    fn test_source_is_kept_for_logs() {
        let api = ConversionError::Failed(ModelError::Api {
            status: 503,
            message: "overloaded".to_string(),
        });

        let source = api.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("model API error (503): overloaded"));
    }

    #[test]
    fn test_invalid_recipe_is_distinguishable() {
        let invalid = ConversionError::InvalidRecipe(vec!["title is empty".to_string()]);

        assert_ne!(invalid.user_message(), CONVERSION_FAILED_MESSAGE);
        assert!(invalid.is_retryable());
        assert!(!ConversionError::EmptyInput.is_retryable());
    }
}
