//! Configuration check command.

use std::path::Path;

use anyhow::Result;
use console::style;

use humboldt_infra::config::{
    ACCESS_KEY_ID_VAR, KNOWLEDGE_BASE_VARS, MODEL_ID_VAR, REGION_VAR, RuntimeConfig,
    SECRET_ACCESS_KEY_VAR, load_settings,
};
use humboldt_types::error::ConfigError;

/// Every required variable, in report order.
fn required_vars() -> Vec<&'static str> {
    let mut vars = vec![ACCESS_KEY_ID_VAR, SECRET_ACCESS_KEY_VAR, REGION_VAR, MODEL_ID_VAR];
    vars.extend(KNOWLEDGE_BASE_VARS.iter().map(|(_, var)| *var));
    vars
}

fn check_mark(ok: bool) -> String {
    if ok {
        format!("{}", style("✓").green())
    } else {
        format!("{}", style("✗").red())
    }
}

/// Validate the environment and settings file without calling the service.
///
/// Fails when any required variable is missing or invalid.
pub async fn check(settings_path: &Path, json: bool) -> Result<()> {
    let settings_exists = tokio::fs::try_exists(settings_path).await.unwrap_or(false);
    let settings = load_settings(settings_path).await;

    let (missing, invalid, model_reference) = match RuntimeConfig::from_env() {
        Ok(config) => (Vec::new(), None, Some(config.model_reference())),
        Err(ConfigError::Missing(keys)) => (keys, None, None),
        Err(err @ ConfigError::Invalid { .. }) => (Vec::new(), Some(err.to_string()), None),
    };
    let healthy = missing.is_empty() && invalid.is_none();

    if json {
        let report = serde_json::json!({
            "healthy": healthy,
            "missing": missing,
            "invalid": invalid,
            "model_reference": model_reference,
            "settings_file": settings_path.display().to_string(),
            "settings_file_exists": settings_exists,
            "settings": settings,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        println!("  {} Configuration check", style("🔍").bold());
        println!();
        for var in required_vars() {
            println!("  {} {var}", check_mark(!missing.iter().any(|m| m == var)));
        }
        if let Some(message) = &invalid {
            println!("  {} {message}", check_mark(false));
        }
        if let Some(model) = &model_reference {
            println!();
            println!("  {}  {}", style("Model:").bold(), style(model).dim());
        }
        println!();
        println!(
            "  {}  {} {}",
            style("Settings:").bold(),
            settings_path.display(),
            if settings_exists {
                style("(loaded)").dim()
            } else {
                style("(not found, using defaults)").dim()
            }
        );
        println!(
            "  {}  {}s, {} attempt(s), max {} tokens",
            style("Requests:").bold(),
            settings.request_timeout_secs,
            settings.retry.max_attempts,
            settings.generation.max_tokens
        );
        println!();
    }

    if let Some(message) = invalid {
        anyhow::bail!(message);
    }
    if !missing.is_empty() {
        return Err(ConfigError::Missing(missing).into());
    }
    Ok(())
}
