use crate::config::constants::defaults;
use serde::{Deserialize, Serialize};

/// Model and sampling settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GenerationConfig {
    /// Gemini model id
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature, 0.0 to 2.0
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
        }
    }
}

impl GenerationConfig {
    /// Clamp the temperature into range, logging when it had to move
    pub fn normalize(&mut self) {
        let clamped = self
            .temperature
            .clamp(defaults::MIN_TEMPERATURE, defaults::MAX_TEMPERATURE);
        if self.temperature.is_nan() {
            tracing::warn!("temperature is not a number, using default");
            self.temperature = defaults::DEFAULT_TEMPERATURE;
        } else if clamped != self.temperature {
            tracing::warn!(
                configured = self.temperature,
                clamped,
                "temperature out of range, clamping"
            );
            self.temperature = clamped;
        }
    }
}

fn default_model() -> String {
    defaults::DEFAULT_MODEL.to_string()
}
fn default_temperature() -> f32 {
    defaults::DEFAULT_TEMPERATURE
}
