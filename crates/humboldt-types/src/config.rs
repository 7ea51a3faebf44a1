//! Tunable settings for Humboldt Helper.
//!
//! `AssistantSettings` represents the optional `humboldt.toml` that controls
//! generation parameters, request timeout, retry behaviour, and citation
//! filtering. All fields have sensible defaults; credentials and
//! knowledge-base handles come from the environment instead.

use serde::{Deserialize, Serialize};

/// Top-level settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantSettings {
    /// Upper bound on a single retrieval-and-generation call, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub citations: CitationConfig,
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            generation: GenerationConfig::default(),
            retry: RetryConfig::default(),
            citations: CitationConfig::default(),
        }
    }
}

/// Text inference parameters passed through to the foundation model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.9
}

fn default_max_tokens() -> u32 {
    700
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Bounded retry for transient remote failures.
///
/// `max_attempts = 1` means fail fast: the error is shown to the user
/// immediately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

fn default_max_attempts() -> u32 {
    1
}

fn default_initial_backoff_ms() -> u64 {
    500
}

fn default_max_backoff_ms() -> u64 {
    4_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

/// Citation filtering policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationConfig {
    /// Drop references whose URL is not a well-formed `http`/`https` URL
    /// (e.g. raw `s3://` URIs).
    #[serde(default = "default_require_http_urls")]
    pub require_http_urls: bool,
}

fn default_require_http_urls() -> bool {
    true
}

impl Default for CitationConfig {
    fn default() -> Self {
        Self {
            require_http_urls: default_require_http_urls(),
        }
    }
}
