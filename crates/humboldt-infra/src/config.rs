//! Configuration loading for Humboldt Helper.
//!
//! Two sources:
//! - the environment (credentials, region, model id, knowledge-base ids),
//!   validated once into [`RuntimeConfig`] with every missing key reported
//!   together;
//! - an optional `humboldt.toml` deserialized into [`AssistantSettings`],
//!   falling back to defaults when the file is missing or malformed.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use secrecy::SecretString;

use humboldt_core::knowledge::gateway::GatewayConfig;
use humboldt_types::config::AssistantSettings;
use humboldt_types::error::ConfigError;
use humboldt_types::knowledge::foundation_model_arn;
use humboldt_types::topic::TopicBucket;

use crate::bedrock::sigv4::AwsCredentials;

/// Default settings file name, looked up in the working directory.
pub const SETTINGS_FILE: &str = "humboldt.toml";

pub const ACCESS_KEY_ID_VAR: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";
pub const SESSION_TOKEN_VAR: &str = "AWS_SESSION_TOKEN";
pub const REGION_VAR: &str = "AWS_DEFAULT_REGION";
/// Accepted when [`REGION_VAR`] is unset.
pub const REGION_FALLBACK_VAR: &str = "AWS_REGION";
pub const MODEL_ID_VAR: &str = "BEDROCK_MODEL_ID";

/// Environment variable holding each topic's knowledge-base id.
pub const KNOWLEDGE_BASE_VARS: [(TopicBucket, &str); 3] = [
    (TopicBucket::Research, "KNOWLEDGE_BASE_ID"),
    (TopicBucket::MeetingMinutes, "KNOWLEDGE_BASE_ID2"),
    (TopicBucket::PeopleSoft, "KNOWLEDGE_BASE_ID3"),
];

/// Validated environment configuration.
pub struct RuntimeConfig {
    pub credentials: AwsCredentials,
    pub region: String,
    pub model_id: String,
    pub knowledge_bases: BTreeMap<TopicBucket, String>,
}

impl RuntimeConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut missing = Vec::new();
        let mut require = |key: &str| {
            let value = get(key);
            if value.is_none() {
                missing.push(key.to_string());
            }
            value
        };

        let access_key_id = require(ACCESS_KEY_ID_VAR);
        let secret_access_key = require(SECRET_ACCESS_KEY_VAR);
        let region = match get(REGION_VAR).or_else(|| get(REGION_FALLBACK_VAR)) {
            Some(region) => Some(region),
            None => require(REGION_VAR),
        };
        let model_id = require(MODEL_ID_VAR);
        let knowledge_bases: Vec<(TopicBucket, Option<String>)> = KNOWLEDGE_BASE_VARS
            .iter()
            .map(|(bucket, key)| (*bucket, require(key)))
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        // Every `require` above returned Some, so these cannot fail.
        let (Some(access_key_id), Some(secret_access_key), Some(region), Some(model_id)) =
            (access_key_id, secret_access_key, region, model_id)
        else {
            return Err(ConfigError::Missing(Vec::new()));
        };

        validate_region(&region)?;

        Ok(Self {
            credentials: AwsCredentials {
                access_key_id,
                secret_access_key: SecretString::from(secret_access_key),
                session_token: get(SESSION_TOKEN_VAR).map(SecretString::from),
            },
            region,
            model_id,
            knowledge_bases: knowledge_bases
                .into_iter()
                .filter_map(|(bucket, id)| id.map(|id| (bucket, id)))
                .collect(),
        })
    }

    /// `arn:aws:bedrock:<region>::foundation-model/<model-id>`.
    pub fn model_reference(&self) -> String {
        foundation_model_arn(&self.region, &self.model_id)
    }

    /// Combine with the tunable settings into the gateway's configuration.
    pub fn gateway_config(&self, settings: &AssistantSettings) -> GatewayConfig {
        GatewayConfig {
            knowledge_bases: self.knowledge_bases.clone(),
            model_reference: self.model_reference(),
            generation: settings.generation.clone(),
            citations: settings.citations.clone(),
            retry: settings.retry.clone(),
            request_timeout: Duration::from_secs(settings.request_timeout_secs),
        }
    }
}

/// The region ends up in a hostname; only lowercase letters, digits and `-`.
fn validate_region(region: &str) -> Result<(), ConfigError> {
    let valid = region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key: REGION_VAR.to_string(),
            message: format!("'{region}' is not a valid AWS region"),
        })
    }
}

/// Replace values that would make every call fail (a zero timeout, zero
/// attempts) with their defaults.
fn clamp_settings(mut settings: AssistantSettings) -> AssistantSettings {
    let defaults = AssistantSettings::default();
    if settings.request_timeout_secs == 0 {
        tracing::warn!(
            "request_timeout_secs must be at least 1, using {}",
            defaults.request_timeout_secs
        );
        settings.request_timeout_secs = defaults.request_timeout_secs;
    }
    if settings.retry.max_attempts == 0 {
        tracing::warn!("retry.max_attempts must be at least 1, using 1");
        settings.retry.max_attempts = 1;
    }
    settings
}

/// Load settings from `path`.
///
/// - Missing file: [`AssistantSettings::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
/// - Zero timeout or zero attempts: logs a warning and uses the default value.
pub async fn load_settings(path: &Path) -> AssistantSettings {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            return AssistantSettings::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return AssistantSettings::default();
        }
    };

    match toml::from_str::<AssistantSettings>(&content) {
        Ok(settings) => clamp_settings(settings),
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            AssistantSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
            ("AWS_DEFAULT_REGION", "us-west-2"),
            ("BEDROCK_MODEL_ID", "anthropic.claude-3-haiku-20240307-v1:0"),
            ("KNOWLEDGE_BASE_ID", "KB1"),
            ("KNOWLEDGE_BASE_ID2", "KB2"),
            ("KNOWLEDGE_BASE_ID3", "KB3"),
        ])
    }

    fn lookup<'a>(
        env: &'a HashMap<&'static str, &'static str>,
    ) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| env.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_from_lookup_complete() {
        let env = full_env();
        let config = RuntimeConfig::from_lookup(lookup(&env)).unwrap();
        assert_eq!(config.region, "us-west-2");
        assert_eq!(config.credentials.access_key_id, "AKIDEXAMPLE");
        assert_eq!(config.credentials.secret_access_key.expose_secret(), "secret");
        assert!(config.credentials.session_token.is_none());
        assert_eq!(config.knowledge_bases[&TopicBucket::MeetingMinutes], "KB2");
        assert_eq!(
            config.model_reference(),
            "arn:aws:bedrock:us-west-2::foundation-model/anthropic.claude-3-haiku-20240307-v1:0"
        );
    }

    #[test]
    fn test_all_missing_keys_reported_together() {
        let mut env = full_env();
        env.remove("AWS_SECRET_ACCESS_KEY");
        env.remove("KNOWLEDGE_BASE_ID2");
        env.insert("BEDROCK_MODEL_ID", "   ");

        let err = RuntimeConfig::from_lookup(lookup(&env)).err().unwrap();
        assert_eq!(
            err,
            ConfigError::Missing(vec![
                "AWS_SECRET_ACCESS_KEY".to_string(),
                "BEDROCK_MODEL_ID".to_string(),
                "KNOWLEDGE_BASE_ID2".to_string(),
            ])
        );
    }

    #[test]
    fn test_empty_environment_lists_everything() {
        let err = RuntimeConfig::from_lookup(|_| None).err().unwrap();
        let ConfigError::Missing(keys) = err else {
            panic!("expected Missing");
        };
        assert_eq!(keys.len(), 7);
        assert!(!keys.contains(&"AWS_SESSION_TOKEN".to_string()));
    }

    #[test]
    fn test_region_fallback_and_session_token() {
        let mut env = full_env();
        env.remove("AWS_DEFAULT_REGION");
        env.insert("AWS_REGION", "eu-central-1");
        env.insert("AWS_SESSION_TOKEN", "token");

        let config = RuntimeConfig::from_lookup(lookup(&env)).unwrap();
        assert_eq!(config.region, "eu-central-1");
        assert_eq!(
            config.credentials.session_token.as_ref().map(|t| t.expose_secret().to_string()),
            Some("token".to_string())
        );
    }

    #[test]
    fn test_invalid_region_rejected() {
        let mut env = full_env();
        env.insert("AWS_DEFAULT_REGION", "evil.com/x");
        let err = RuntimeConfig::from_lookup(lookup(&env)).err().unwrap();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_gateway_config_uses_settings() {
        let env = full_env();
        let config = RuntimeConfig::from_lookup(lookup(&env)).unwrap();
        let mut settings = AssistantSettings::default();
        settings.request_timeout_secs = 15;
        settings.generation.max_tokens = 300;

        let gateway = config.gateway_config(&settings);
        assert_eq!(gateway.request_timeout, Duration::from_secs(15));
        assert_eq!(gateway.generation.max_tokens, 300);
        assert_eq!(gateway.knowledge_bases.len(), 3);
        assert!(gateway.model_reference.starts_with("arn:aws:bedrock:us-west-2::"));
    }

    #[tokio::test]
    async fn load_settings_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let settings = load_settings(&tmp.path().join(SETTINGS_FILE)).await;
        assert_eq!(settings, AssistantSettings::default());
    }

    #[tokio::test]
    async fn load_settings_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(SETTINGS_FILE);
        tokio::fs::write(
            &path,
            r#"
request_timeout_secs = 20

[retry]
max_attempts = 3

[citations]
require_http_urls = false
"#,
        )
        .await
        .unwrap();

        let settings = load_settings(&path).await;
        assert_eq!(settings.request_timeout_secs, 20);
        assert_eq!(settings.retry.max_attempts, 3);
        assert_eq!(settings.retry.initial_backoff_ms, 500);
        assert!(!settings.citations.require_http_urls);
        assert_eq!(settings.generation.max_tokens, 700);
    }

    #[tokio::test]
    async fn load_settings_zero_timeout_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(SETTINGS_FILE);
        tokio::fs::write(
            &path,
            "request_timeout_secs = 0\n\n[retry]\nmax_attempts = 0\n\n[generation]\nmax_tokens = 300\n",
        )
        .await
        .unwrap();

        let settings = load_settings(&path).await;
        assert_eq!(settings.request_timeout_secs, 60);
        assert_eq!(settings.retry.max_attempts, 1);
        assert_eq!(settings.generation.max_tokens, 300);
    }

    #[tokio::test]
    async fn load_settings_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(SETTINGS_FILE);
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let settings = load_settings(&path).await;
        assert_eq!(settings, AssistantSettings::default());
    }
}
