//! Bot API response envelope for `sendMessage`.

use serde::Deserialize;

/// `{"ok": bool, "result"?: Message, "description"?: string}`.
#[derive(Debug, Deserialize)]
pub struct SendMessageResponse {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub result: Option<SentMessage>,
}

/// The subset of the sent `Message` object we log.
#[derive(Debug, Deserialize)]
pub struct SentMessage {
    pub message_id: i64,
}
