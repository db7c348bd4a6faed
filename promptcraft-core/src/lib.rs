//! # promptcraft-core
//!
//! Turns a short, unstructured instruction into a structured prompt document
//! by composing optional prompting techniques, then sends that document to
//! Gemini and keeps a small history of the results.
//!
//! ## Architecture Overview
//!
//! - `techniques` / `presets`: the six technique switches, built-in and custom
//!   presets, and resolution of the configuration actually used.
//! - `prompts`: the pure document composer and the input sanitizer.
//! - `session`: per-user state (history capped at five entries, rate limiter,
//!   custom presets, latest output).
//! - `orchestrator`: the generation flow, including the three-temperature
//!   variations mode.
//! - `llm` / `gemini`: provider trait and the Gemini `generateContent` client.
//! - `config`: `promptcraft.toml`, constants and API key resolution.
//!
//! ## Quickstart
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use promptcraft_core::{
//!     EnhanceRequest, GeminiProvider, PromptEnhancer, Session, TechniqueConfig,
//! };
//!
//! # async fn run() -> anyhow::Result<()> {
//! let provider = GeminiProvider::new(std::env::var("GEMINI_API_KEY")?)?;
//! let enhancer = PromptEnhancer::new(Arc::new(provider));
//! let mut session = Session::default();
//!
//! let config = TechniqueConfig {
//!     role: true,
//!     format: true,
//!     format_details: "bullet points".into(),
//!     ..Default::default()
//! };
//! let generated = enhancer
//!     .generate(&mut session, &EnhanceRequest::new("Write a tagline", config))
//!     .await?;
//! println!("{}", generated.text);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod gemini;
pub mod llm;
pub mod orchestrator;
pub mod presets;
pub mod prompts;
pub mod session;
pub mod techniques;

pub use config::{ConfigManager, PromptCraftConfig};
pub use context::{ContextSource, ResolvedContext};
pub use error::{GenerationError, GenerationWarning};
pub use llm::{GeminiProvider, LLMError, LLMProvider, LLMRequest, LLMResponse};
pub use orchestrator::{
    EnhanceRequest, Generated, PreparedPrompt, PromptEnhancer, VariationOutcome, prepare_prompt,
};
pub use presets::{LiveTechniques, PresetFlags, PresetRegistry, Selection, resolve_config};
pub use prompts::{compose, sanitize};
pub use session::{History, HistoryEntry, RateLimiter, Session};
pub use techniques::{Technique, TechniqueConfig, TechniquePatch};
