//! # LLM Integration Layer
//!
//! A single provider trait ([`LLMProvider`]) with a Gemini adapter. Failures
//! are reported as [`LLMError`] and converted into
//! [`GenerationError`](crate::error::GenerationError) by the orchestrator:
//! 4xx responses become client errors, everything else is unclassified.

pub mod provider;
pub mod providers;

pub use provider::{LLMError, LLMProvider, LLMRequest, LLMResponse};
pub use providers::GeminiProvider;
