//! Per-user session state
//!
//! Everything that outlives a single request (history, throttle, custom
//! presets, the live technique state and the latest output) lives in a
//! [`Session`] owned by the caller and passed into the orchestrator.

pub mod history;
pub mod rate_limiter;

pub use history::{History, HistoryEntry};
pub use rate_limiter::RateLimiter;

use crate::presets::{LiveTechniques, PresetRegistry, Selection};
use crate::techniques::TechniqueConfig;
use anyhow::{Context, Result, bail};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Session {
    pub history: History,
    pub rate_limiter: RateLimiter,
    pub presets: PresetRegistry,
    pub live: LiveTechniques,
    pub selection: Selection,
    latest_output: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RateLimiter::default())
    }
}

impl Session {
    pub fn new(rate_limiter: RateLimiter) -> Self {
        Self {
            history: History::new(),
            rate_limiter,
            presets: PresetRegistry::new(),
            live: LiveTechniques::default(),
            selection: Selection::Manual,
            latest_output: None,
        }
    }

    pub fn with_min_interval(min_interval: Duration) -> Self {
        Self::new(RateLimiter::new(min_interval))
    }

    pub fn with_live(mut self, live: LiveTechniques) -> Self {
        self.live = live;
        self
    }

    /// The configuration the composer would use right now
    pub fn active_config(&self) -> TechniqueConfig {
        crate::presets::resolve_config(&self.selection, &self.live)
    }

    pub fn latest_output(&self) -> Option<&str> {
        self.latest_output.as_deref()
    }

    pub(crate) fn set_latest_output(&mut self, output: String) {
        self.latest_output = Some(output);
    }

    /// Drop history and the latest output; presets and live toggles stay
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.latest_output = None;
    }

    /// Write the latest generated text to `path`
    pub fn download_latest(&self, path: &Path) -> Result<()> {
        let Some(output) = self.latest_output() else {
            bail!("Nothing to download yet: generate a prompt first");
        };
        std::fs::write(path, output)
            .with_context(|| format!("Failed to write output to {}", path.display()))?;
        tracing::info!(path = %path.display(), "saved latest output");
        Ok(())
    }

    pub fn export_history(&self, path: &Path) -> Result<()> {
        self.history.export_json(path)
    }
}
