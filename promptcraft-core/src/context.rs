//! Optional reference material injected into the CONTEXT section

use crate::config::constants::document;
use crate::error::GenerationWarning;
use std::path::PathBuf;

/// Where context text comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContextSource {
    #[default]
    None,
    Text(String),
    /// Raw upload, must decode as UTF-8
    Bytes(Vec<u8>),
    File(PathBuf),
}

/// Context text ready for the composer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContext {
    pub text: String,
    pub warning: Option<GenerationWarning>,
}

impl ResolvedContext {
    fn ok(text: String) -> Self {
        Self {
            text,
            warning: None,
        }
    }

    fn unreadable(detail: String) -> Self {
        tracing::warn!(%detail, "context source unreadable");
        Self {
            text: document::CONTEXT_READ_ERROR_MARKER.to_string(),
            warning: Some(GenerationWarning::ContextUnreadable { detail }),
        }
    }
}

impl ContextSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map(Self::File).unwrap_or_default()
    }

    /// Resolve to text. Read or decode failures substitute a marker and
    /// return a warning instead of failing the request.
    pub async fn resolve(&self) -> ResolvedContext {
        match self {
            Self::None => ResolvedContext::ok(document::NO_CONTEXT_SENTINEL.to_string()),
            Self::Text(text) => ResolvedContext::ok(text.clone()),
            Self::Bytes(bytes) => decode(bytes.clone()),
            Self::File(path) => match tokio::fs::read(path).await {
                Ok(bytes) => decode(bytes),
                Err(e) => ResolvedContext::unreadable(format!("{}: {e}", path.display())),
            },
        }
    }
}

fn decode(bytes: Vec<u8>) -> ResolvedContext {
    match String::from_utf8(bytes) {
        Ok(text) => ResolvedContext::ok(text),
        Err(e) => ResolvedContext::unreadable(format!("not valid UTF-8 text: {e}")),
    }
}
