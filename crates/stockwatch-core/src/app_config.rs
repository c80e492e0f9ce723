use std::path::PathBuf;

/// Runtime settings read from the process environment.
///
/// What to watch lives in the watch file (see [`crate::WatchConfig`]); this
/// struct only carries paths, timeouts, and notification credentials.
#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub watch_path: PathBuf,
    pub state_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub notify_timeout_secs: u64,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub telegram_api_url: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("watch_path", &self.watch_path)
            .field("state_path", &self.state_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("notify_timeout_secs", &self.notify_timeout_secs)
            .field(
                "telegram_bot_token",
                &self.telegram_bot_token.as_ref().map(|_| "[redacted]"),
            )
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("telegram_api_url", &self.telegram_api_url)
            .finish()
    }
}
