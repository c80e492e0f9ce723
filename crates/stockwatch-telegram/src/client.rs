//! HTTP client for the Telegram Bot API `sendMessage` method.

use std::borrow::Cow;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::TelegramError;
use crate::types::SendMessageResponse;

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Telegram rejects message texts longer than this many characters.
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Sends plain-text messages to one chat.
///
/// Use [`TelegramClient::new`] for production or
/// [`TelegramClient::with_base_url`] to point at a mock server in tests.
pub struct TelegramClient {
    client: Client,
    chat_id: String,
    /// `{base}/bot{token}/sendMessage`; holds the token.
    send_url: Url,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("chat_id", &self.chat_id)
            .field("send_url", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Creates a client pointed at the public Bot API.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(bot_token: &str, chat_id: &str, timeout_secs: u64) -> Result<Self, TelegramError> {
        Self::with_base_url(bot_token, chat_id, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom API base URL.
    ///
    /// # Errors
    ///
    /// - [`TelegramError::Http`] if the `reqwest::Client` cannot be constructed.
    /// - [`TelegramError::InvalidBaseUrl`] if `base_url` is not an absolute
    ///   hierarchical URL.
    pub fn with_base_url(
        bot_token: &str,
        chat_id: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, TelegramError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("stockwatch/0.1 (stock-alerts)")
            .build()?;

        let invalid = |reason: String| TelegramError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason,
        };

        let mut send_url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        send_url
            .path_segments_mut()
            .map_err(|()| invalid("URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(&format!("bot{bot_token}"))
            .push("sendMessage");

        Ok(Self {
            client,
            chat_id: chat_id.to_owned(),
            send_url,
        })
    }

    /// Sends `text` to the configured chat and returns the new message id.
    ///
    /// Texts over [`MAX_MESSAGE_CHARS`] are truncated with a trailing `…`.
    ///
    /// # Errors
    ///
    /// - [`TelegramError::Api`] if the API answers `"ok": false`.
    /// - [`TelegramError::UnexpectedStatus`] on a non-2xx status.
    /// - [`TelegramError::Http`] on network failure.
    /// - [`TelegramError::Deserialize`] if a 2xx body is not the expected shape.
    pub async fn send_message(&self, text: &str) -> Result<Option<i64>, TelegramError> {
        let text = truncate_message(text);
        let form = [("chat_id", self.chat_id.as_str()), ("text", text.as_ref())];

        let response = self
            .client
            .post(self.send_url.clone())
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let description = serde_json::from_str::<SendMessageResponse>(&body)
                .ok()
                .and_then(|r| r.description)
                .unwrap_or_else(|| "no description".to_string());
            return Err(TelegramError::UnexpectedStatus {
                status: status.as_u16(),
                description,
            });
        }

        let parsed: SendMessageResponse =
            serde_json::from_str(&body).map_err(|e| TelegramError::Deserialize {
                context: "sendMessage".to_string(),
                source: e,
            })?;

        if !parsed.ok {
            return Err(TelegramError::Api(
                parsed
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            ));
        }

        let message_id = parsed.result.map(|m| m.message_id);
        tracing::info!(chat_id = %self.chat_id, ?message_id, "telegram message sent");
        Ok(message_id)
    }
}

/// Cuts `text` to at most [`MAX_MESSAGE_CHARS`] characters.
fn truncate_message(text: &str) -> Cow<'_, str> {
    if text.chars().count() <= MAX_MESSAGE_CHARS {
        return Cow::Borrowed(text);
    }
    let mut cut: String = text.chars().take(MAX_MESSAGE_CHARS - 1).collect();
    cut.push('…');
    Cow::Owned(cut)
}
