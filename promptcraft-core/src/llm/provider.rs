//! Provider abstraction for the generation service
//!
//! The orchestrator only talks to [`LLMProvider`]; the Gemini adapter lives in
//! `providers::gemini`, and tests substitute their own implementations.

use crate::config::constants::defaults;
use crate::error::GenerationError;
use async_trait::async_trait;

/// Generic message shown for failures that are not the caller's fault
pub const UNCLASSIFIED_MESSAGE: &str = "An error occurred while calling the Gemini API";

/// One outbound generation request
#[derive(Debug, Clone, PartialEq)]
pub struct LLMRequest {
    pub model: String,
    /// The composed document, sent as a single user turn
    pub document: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LLMResponse {
    pub content: String,
    pub finish_reason: Option<String>,
}

/// Generation service trait
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Provider name (e.g., "gemini")
    fn name(&self) -> &str;

    /// Generate completion
    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError>;

    /// Get supported models
    fn supported_models(&self) -> Vec<String>;

    /// Validate request for this provider
    fn validate_request(&self, request: &LLMRequest) -> Result<(), LLMError> {
        if request.document.trim().is_empty() {
            return Err(LLMError::InvalidRequest {
                status: None,
                message: "document is empty".to_string(),
            });
        }
        if !(defaults::MIN_TEMPERATURE..=defaults::MAX_TEMPERATURE).contains(&request.temperature) {
            return Err(LLMError::InvalidRequest {
                status: None,
                message: format!(
                    "temperature {} is outside {}..={}",
                    request.temperature,
                    defaults::MIN_TEMPERATURE,
                    defaults::MAX_TEMPERATURE
                ),
            });
        }
        if !self.supported_models().contains(&request.model) {
            tracing::warn!(model = %request.model, provider = self.name(), "model is not in the curated list");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LLMError {
    /// The service rejected the request (4xx)
    #[error("Invalid request: {message}")]
    InvalidRequest { status: Option<u16>, message: String },
    #[error("Network error: {0}")]
    Network(String),
    /// The service failed (5xx or other non-success status)
    #[error("Provider error (HTTP {status}): {message}")]
    Provider { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<LLMError> for GenerationError {
    fn from(err: LLMError) -> Self {
        match err {
            LLMError::InvalidRequest { status, message } => {
                GenerationError::Client { status, message }
            }
            other => GenerationError::Unclassified {
                message: UNCLASSIFIED_MESSAGE.to_string(),
                detail: other.to_string(),
            },
        }
    }
}
