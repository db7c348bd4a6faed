use crate::config::api_keys::ApiKeySources;
use crate::config::constants::defaults;
use serde::{Deserialize, Serialize};

/// Credential lookup settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Environment variable holding the key
    #[serde(default = "default_key_env")]
    pub key_env: String,

    /// Key stored in the config file, used when no environment variable is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key_env: default_key_env(),
            key: None,
        }
    }
}

impl ApiConfig {
    pub fn key_sources(&self) -> ApiKeySources {
        ApiKeySources {
            gemini_env: self.key_env.clone(),
            gemini_config: self.key.clone(),
            ..ApiKeySources::default()
        }
    }
}

fn default_key_env() -> String {
    defaults::DEFAULT_API_KEY_ENV.to_string()
}
