//! Configuration Module
//!
//! Loads `promptcraft.toml` (every section optional), holds the compile-time
//! constants in [`constants`], and resolves the API credential in [`api_keys`].

pub mod api_keys;
pub mod constants;
pub mod core;
pub mod loader;

pub use api_keys::{ApiKeySources, get_api_key, load_dotenv};
pub use core::{
    ApiConfig, GenerationConfig, HttpConfig, InputConfig, PersonaConfig, RateLimitConfig,
};
pub use loader::{ConfigManager, PromptCraftConfig};
