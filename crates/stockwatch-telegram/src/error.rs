use thiserror::Error;

/// Errors returned by the Telegram Bot API client.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Network or TLS failure from the underlying HTTP client. The request
    /// URL is stripped because it embeds the bot token.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The Bot API answered `"ok": false`.
    #[error("Telegram API error: {0}")]
    Api(String),

    /// Non-2xx status; `description` is the API's explanation when it sent one.
    #[error("unexpected HTTP status {status} from Telegram: {description}")]
    UnexpectedStatus { status: u16, description: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid Telegram API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl From<reqwest::Error> for TelegramError {
    fn from(e: reqwest::Error) -> Self {
        TelegramError::Http(e.without_url())
    }
}
