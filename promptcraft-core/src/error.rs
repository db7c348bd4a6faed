//! Error and warning types surfaced by the generation pipeline

use std::fmt;

/// Failures of a single generation request, or of startup configuration.
///
/// Every variant except [`GenerationError::Configuration`] is recoverable:
/// the caller reports it and the session keeps going.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// Credential missing or still a template placeholder. Fatal at startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request was rejected before any outbound call was made.
    #[error("{0}")]
    Validation(String),

    /// The generation service rejected the request (bad credential, bad request shape).
    #[error("API error: invalid API key or request: {message}")]
    Client { status: Option<u16>, message: String },

    /// Any other failure of the outbound call.
    #[error("{message}")]
    Unclassified { message: String, detail: String },
}

impl GenerationError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error must stop the process instead of a single request
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Operator-facing diagnostic detail, when there is more than the message
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unclassified { detail, .. } if !detail.is_empty() => Some(detail),
            _ => None,
        }
    }
}

/// Non-fatal conditions reported alongside a successful (or attempted) generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationWarning {
    /// The raw task was longer than the configured limit and was cut.
    InputTruncated { max_length: usize },
    /// The context source could not be decoded; a marker was used instead.
    ContextUnreadable { detail: String },
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputTruncated { max_length } => {
                write!(f, "Input truncated to {max_length} characters")
            }
            Self::ContextUnreadable { detail } => {
                write!(f, "Could not read context file: {detail}")
            }
        }
    }
}
