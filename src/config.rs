use anyhow::{anyhow, Context, Result};
use std::env;
use std::time::Duration;

use crate::services::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";
/// 20 MB of image data after base64 expansion, plus room for the JSON around it.
pub const DEFAULT_MAX_BODY_BYTES: usize = 28 * 1024 * 1024;

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub request_timeout: Duration,
    pub server_addr: String,
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow!("GEMINI_API_KEY must be set in .env file"))?;

        let request_timeout = match lookup("GEMINI_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .with_context(|| format!("GEMINI_TIMEOUT_SECS is not a number: {}", raw))?,
            ),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("MAX_BODY_BYTES is not a number: {}", raw))?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            gemini_api_key,
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: lookup("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout,
            server_addr: lookup("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string()),
            max_body_bytes,
        })
    }
}
