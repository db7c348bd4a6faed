use crate::config::constants::defaults;
use serde::{Deserialize, Serialize};

/// Persona and tone used by the ROLE and TONE sections
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PersonaConfig {
    #[serde(default = "default_role")]
    pub role: String,

    #[serde(default = "default_tone")]
    pub tone: String,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            role: default_role(),
            tone: default_tone(),
        }
    }
}

fn default_role() -> String {
    defaults::DEFAULT_ROLE_PERSONA.to_string()
}
fn default_tone() -> String {
    defaults::DEFAULT_TONE_STYLE.to_string()
}
