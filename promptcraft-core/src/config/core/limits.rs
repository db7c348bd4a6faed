use crate::config::constants::defaults;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outbound call throttle
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Minimum milliseconds between two generation calls
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

impl RateLimitConfig {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

/// HTTP client settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct HttpConfig {
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Override for the API root; empty uses the public endpoint
    #[serde(default)]
    pub base_url: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            base_url: String::new(),
        }
    }
}

/// Raw input limits
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct InputConfig {
    /// Characters kept from the raw task
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
        }
    }
}

fn default_min_interval_ms() -> u64 {
    defaults::DEFAULT_MIN_INTERVAL_MS
}
fn default_request_timeout_secs() -> u64 {
    defaults::DEFAULT_REQUEST_TIMEOUT_SECS
}
fn default_connect_timeout_secs() -> u64 {
    defaults::DEFAULT_CONNECT_TIMEOUT_SECS
}
fn default_max_length() -> usize {
    defaults::DEFAULT_MAX_INPUT_LENGTH
}
