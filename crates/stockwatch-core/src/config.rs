use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it from a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank optional values are treated as unset so an empty line in `.env`
    // does not masquerade as a credential.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("STOCKWATCH_LOG_LEVEL", "info");
    let watch_path = PathBuf::from(or_default("STOCKWATCH_WATCH_PATH", "./config/watch.yaml"));
    let state_path = PathBuf::from(or_default("STOCKWATCH_STATE_PATH", "./last_stock.txt"));

    let request_timeout_secs = parse_u64("STOCKWATCH_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("STOCKWATCH_USER_AGENT", DEFAULT_USER_AGENT);
    let notify_timeout_secs = parse_u64("STOCKWATCH_NOTIFY_TIMEOUT_SECS", "5")?;

    let telegram_bot_token = optional("TELEGRAM_BOT_TOKEN");
    let telegram_chat_id = optional("TELEGRAM_CHAT_ID");
    let telegram_api_url = or_default("STOCKWATCH_TELEGRAM_API_URL", "https://api.telegram.org");

    Ok(AppConfig {
        log_level,
        watch_path,
        state_path,
        request_timeout_secs,
        user_agent,
        notify_timeout_secs,
        telegram_bot_token,
        telegram_chat_id,
        telegram_api_url,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
