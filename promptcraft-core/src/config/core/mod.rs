pub mod api;
pub mod generation;
pub mod limits;
pub mod persona;

pub use api::ApiConfig;
pub use generation::GenerationConfig;
pub use limits::{HttpConfig, InputConfig, RateLimitConfig};
pub use persona::PersonaConfig;
