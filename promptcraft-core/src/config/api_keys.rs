//! API key management module for retrieval from environment variables,
//! .env files, and configuration files.
//!
//! Environment variables win over the configuration file. A key that is
//! missing or still equal to a template placeholder is a startup failure:
//! callers must refuse to serve any generation request.

use crate::config::constants::{credentials, defaults};
use crate::error::GenerationError;
use std::env;

/// Where to look for the Gemini API key
#[derive(Debug, Clone)]
pub struct ApiKeySources {
    /// Primary environment variable name
    pub gemini_env: String,
    /// Secondary environment variable name, checked after the primary one
    pub fallback_env: String,
    /// API key from configuration file
    pub gemini_config: Option<String>,
}

impl Default for ApiKeySources {
    fn default() -> Self {
        Self {
            gemini_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            fallback_env: defaults::FALLBACK_API_KEY_ENV.to_string(),
            gemini_config: None,
        }
    }
}

/// Load environment variables from a .env file in the current directory.
///
/// A missing file is fine; a malformed one is logged and ignored.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded environment variables from .env");
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(error = %e, "failed to load .env file");
        }
    }
}

/// Whether `key` is one of the known template placeholders
pub fn is_placeholder(key: &str) -> bool {
    let trimmed = key.trim();
    credentials::PLACEHOLDER_KEYS
        .iter()
        .any(|placeholder| trimmed == *placeholder)
}

/// Resolve the API key from the process environment, then the config file.
pub fn get_api_key(sources: &ApiKeySources) -> Result<String, GenerationError> {
    get_api_key_with(sources, |name| env::var(name).ok())
}

/// Resolve the API key using `lookup` for environment access.
pub fn get_api_key_with<F>(sources: &ApiKeySources, lookup: F) -> Result<String, GenerationError>
where
    F: Fn(&str) -> Option<String>,
{
    let candidate = [&sources.gemini_env, &sources.fallback_env]
        .into_iter()
        .filter_map(|name| lookup(name))
        .chain(sources.gemini_config.clone())
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty());

    match candidate {
        Some(key) if is_placeholder(&key) => Err(GenerationError::Configuration(format!(
            "API key is still a placeholder value. Replace it in your .env file ({}) or in {}",
            sources.gemini_env,
            defaults::DEFAULT_CONFIG_FILE
        ))),
        Some(key) => Ok(key),
        None => Err(GenerationError::Configuration(format!(
            "No API key found. Set {} or {} (or add it to a .env file), or configure [api] key in {}. \
             Get a key from https://aistudio.google.com/app/apikey",
            sources.gemini_env,
            sources.fallback_env,
            defaults::DEFAULT_CONFIG_FILE
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn prefers_primary_env_var() {
        let vars = env_of(&[("GEMINI_API_KEY", "primary"), ("GOOGLE_API_KEY", "fallback")]);
        let sources = ApiKeySources {
            gemini_config: Some("config-key".into()),
            ..Default::default()
        };

        let key = get_api_key_with(&sources, |name| vars.get(name).cloned()).unwrap();
        assert_eq!(key, "primary");
    }

    #[test]
    fn falls_back_to_google_env_var() {
        let vars = env_of(&[("GOOGLE_API_KEY", "fallback")]);
        let key = get_api_key_with(&ApiKeySources::default(), |name| vars.get(name).cloned())
            .unwrap();
        assert_eq!(key, "fallback");
    }

    #[test]
    fn falls_back_to_config_value() {
        let sources = ApiKeySources {
            gemini_config: Some("config-key".into()),
            ..Default::default()
        };
        let key = get_api_key_with(&sources, |_| None).unwrap();
        assert_eq!(key, "config-key");
    }

    #[test]
    fn empty_env_value_is_skipped() {
        let vars = env_of(&[("GEMINI_API_KEY", "   "), ("GOOGLE_API_KEY", "fallback")]);
        let key = get_api_key_with(&ApiKeySources::default(), |name| vars.get(name).cloned())
            .unwrap();
        assert_eq!(key, "fallback");
    }

    #[test]
    fn missing_key_is_configuration_error() {
        let err = get_api_key_with(&ApiKeySources::default(), |_| None).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn placeholder_key_is_rejected() {
        for placeholder in credentials::PLACEHOLDER_KEYS {
            let vars = env_of(&[("GEMINI_API_KEY", placeholder)]);
            let err = get_api_key_with(&ApiKeySources::default(), |name| vars.get(name).cloned())
                .unwrap_err();
            assert!(matches!(err, GenerationError::Configuration(_)));
        }
    }

    #[test]
    fn placeholder_detection_ignores_surrounding_whitespace() {
        assert!(is_placeholder("  YOUR_API_KEY_HERE\n"));
        assert!(!is_placeholder("AIzaSyRealLookingKey"));
    }
}
