use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_succeeds_with_empty_environment() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.watch_path, PathBuf::from("./config/watch.yaml"));
    assert_eq!(cfg.state_path, PathBuf::from("./last_stock.txt"));
    assert_eq!(cfg.request_timeout_secs, 10);
    assert_eq!(cfg.notify_timeout_secs, 5);
    assert!(cfg.user_agent.starts_with("Mozilla/5.0"));
    assert!(cfg.telegram_bot_token.is_none());
    assert!(cfg.telegram_chat_id.is_none());
    assert_eq!(cfg.telegram_api_url, "https://api.telegram.org");
}

#[test]
fn build_app_config_reads_telegram_credentials() {
    let mut map = HashMap::new();
    map.insert("TELEGRAM_BOT_TOKEN", "123:abc");
    map.insert("TELEGRAM_CHAT_ID", "-100200300");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.telegram_bot_token.as_deref(), Some("123:abc"));
    assert_eq!(cfg.telegram_chat_id.as_deref(), Some("-100200300"));
}

#[test]
fn build_app_config_treats_blank_token_as_unset() {
    let mut map = HashMap::new();
    map.insert("TELEGRAM_BOT_TOKEN", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.telegram_bot_token.is_none());
}

#[test]
fn build_app_config_overrides_paths() {
    let mut map = HashMap::new();
    map.insert("STOCKWATCH_WATCH_PATH", "/etc/stockwatch/watch.yaml");
    map.insert("STOCKWATCH_STATE_PATH", "/var/lib/stockwatch/last.txt");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.watch_path, PathBuf::from("/etc/stockwatch/watch.yaml"));
    assert_eq!(cfg.state_path, PathBuf::from("/var/lib/stockwatch/last.txt"));
}

#[test]
fn build_app_config_request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("STOCKWATCH_REQUEST_TIMEOUT_SECS", "30");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 30);
}

#[test]
fn build_app_config_request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("STOCKWATCH_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOCKWATCH_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(STOCKWATCH_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_notify_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("STOCKWATCH_NOTIFY_TIMEOUT_SECS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOCKWATCH_NOTIFY_TIMEOUT_SECS"),
        "expected InvalidEnvVar(STOCKWATCH_NOTIFY_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn debug_redacts_bot_token() {
    let mut map = HashMap::new();
    map.insert("TELEGRAM_BOT_TOKEN", "123:super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[redacted]"));
}
