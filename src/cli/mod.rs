//! Command-line interface module
//!
//! Argument parsing lives in `args`; each subcommand has its own handler.

pub mod args;
pub mod compose;
pub mod enhance;
pub mod history;
pub mod init;
pub mod interactive;
pub mod presets;
pub mod render;
pub mod variations;

pub use args::{Cli, Commands, EnhanceArgs};
pub use compose::handle_compose_command;
pub use enhance::handle_enhance_command;
pub use init::handle_init_command;
pub use interactive::handle_interactive_command;
pub use presets::handle_presets_command;
pub use variations::handle_variations_command;

use anyhow::{Context, Result, anyhow};
use promptcraft_core::config::constants::model_helpers;
use promptcraft_core::gemini::ClientConfig;
use promptcraft_core::{
    ContextSource, EnhanceRequest, GeminiProvider, PromptCraftConfig, PromptEnhancer, Selection,
    Session,
};
use std::sync::Arc;
use std::time::Duration;

/// Settings resolved from the config file and global flags
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: PromptCraftConfig,
    pub model: String,
    pub temperature: f32,
}

impl RunContext {
    pub fn new(config: PromptCraftConfig, model: Option<String>, temperature: Option<f32>) -> Self {
        let model = model.unwrap_or_else(|| config.generation.model.clone());
        if !model_helpers::is_supported(&model) {
            tracing::warn!(%model, "model is not one of the curated Gemini models");
        }
        let temperature = temperature.unwrap_or(config.generation.temperature);
        Self {
            config,
            model,
            temperature,
        }
    }

    /// Fresh session seeded with the configured techniques and throttle
    pub fn new_session(&self) -> Session {
        Session::with_min_interval(self.config.rate_limit.min_interval())
            .with_live(self.config.techniques.clone())
    }

    /// Apply technique flags, detail text and preset choice from `args`
    pub fn apply_args(&self, session: &mut Session, args: &EnhanceArgs) -> Result<()> {
        if let Some(details) = &args.format_details {
            session.live.format_details = details.clone();
        }
        if let Some(instructions) = &args.iterate_instructions {
            session.live.iterate_instructions = instructions.clone();
        }
        if let Some(details) = &args.negative_details {
            session.live.negative_details = details.clone();
        }

        let toggles = args.toggles();
        for (technique, enabled) in &toggles {
            session.live.flags.set(*technique, *enabled);
        }

        session.selection = match &args.preset {
            Some(name) => session
                .presets
                .select(name)
                .ok_or_else(|| anyhow!("Unknown preset '{name}'. Run `promptcraft presets` to list them."))?,
            None => Selection::Manual,
        };
        if !session.selection.is_manual() && !toggles.is_empty() {
            tracing::warn!(
                preset = session.selection.name(),
                "technique switches are ignored while a preset is selected"
            );
        }
        Ok(())
    }

    pub fn build_request(&self, session: &Session, args: &EnhanceArgs) -> EnhanceRequest {
        EnhanceRequest {
            raw_task: args.task_text(),
            config: session.active_config(),
            role_persona: args
                .persona
                .clone()
                .unwrap_or_else(|| self.config.persona.role.clone()),
            tone_style: args
                .tone
                .clone()
                .unwrap_or_else(|| self.config.persona.tone.clone()),
            context: ContextSource::from_path(args.context_file.clone()),
            model: self.model.clone(),
            temperature: self.temperature,
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let http = &self.config.http;
        let config = ClientConfig::default().with_timeouts(
            Duration::from_secs(http.request_timeout_secs),
            Duration::from_secs(http.connect_timeout_secs),
        );
        if http.base_url.trim().is_empty() {
            config
        } else {
            config.with_base_url(http.base_url.trim())
        }
    }

    pub fn build_enhancer(&self, api_key: String) -> Result<PromptEnhancer> {
        let provider = GeminiProvider::with_config(api_key, self.client_config())
            .context("Failed to create Gemini client")?;
        Ok(PromptEnhancer::new(Arc::new(provider))
            .with_max_input_length(self.config.input.max_length))
    }
}
