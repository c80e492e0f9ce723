use thiserror::Error;

/// Failure to locate a delimited payload inside a raw response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("marker not found")]
    MarkerNotFound,

    #[error("unterminated payload")]
    UnterminatedPayload,
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("JSON parse error for {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid fulfillment URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("state file error at {path}: {source}")]
    State {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ScraperError {
    /// `true` for failures of the fetch itself (network or HTTP status).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ScraperError::Http(_) | ScraperError::UnexpectedStatus { .. }
        )
    }

    /// `true` when the response arrived but held no usable stock document.
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            ScraperError::Extraction(_) | ScraperError::Parse { .. }
        )
    }
}
