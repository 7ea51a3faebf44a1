use thiserror::Error;

use crate::topic::TopicBucket;

/// Errors assembling the runtime configuration. Fatal at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<String>),

    #[error("invalid configuration value for {key}: {message}")]
    Invalid { key: String, message: String },
}

/// Errors from the external retrieval-and-generation service.
///
/// Shown to the user inline in place of the assistant's reply; never fatal to
/// the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteServiceError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("request throttled by the service")]
    Throttled,

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("no knowledge base configured for topic '{0}'")]
    UnconfiguredTopic(TopicBucket),
}

impl RemoteServiceError {
    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            RemoteServiceError::Transport(_)
            | RemoteServiceError::Timeout(_)
            | RemoteServiceError::Throttled => true,
            RemoteServiceError::Status { status, .. } => *status >= 500,
            RemoteServiceError::Authentication(_)
            | RemoteServiceError::Malformed(_)
            | RemoteServiceError::UnconfiguredTopic(_) => false,
        }
    }
}

/// Why a citation was skipped. Logged, never surfaced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CitationError {
    #[error("citation has no resolvable URL")]
    NoResolvableUrl,

    #[error("citation URL is not http(s): {0}")]
    NonHttpUrl(String),
}
