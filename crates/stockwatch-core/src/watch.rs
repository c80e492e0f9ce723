//! Watch file: which models to look for, where, and how to read the response.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const DEFAULT_FULFILLMENT_URL: &str = "https://www.apple.com/sg/shop/fulfillment-messages";
const DEFAULT_PREFIX_MARKER: &str = "var fulfillmentMessages = ";
const DEFAULT_SUFFIX_MARKER: &str = ";</script>";

/// How the fulfillment endpoint's body carries its JSON document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// The body is the JSON document.
    #[default]
    Json,
    /// The document is assigned to a script variable inside an HTML page.
    Embedded,
}

impl std::fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseFormat::Json => write!(f, "json"),
            ResponseFormat::Embedded => write!(f, "embedded"),
        }
    }
}

/// Which kinds of availability produce summary lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedFields {
    #[serde(default = "default_true")]
    pub pickup: bool,
    #[serde(default = "default_true")]
    pub delivery: bool,
}

impl Default for RequestedFields {
    fn default() -> Self {
        Self {
            pickup: true,
            delivery: true,
        }
    }
}

/// Prefix/suffix pair delimiting an embedded JSON payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    pub prefix: String,
    pub suffix: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX_MARKER.to_string(),
            suffix: DEFAULT_SUFFIX_MARKER.to_string(),
        }
    }
}

/// A watched model: display name plus the part number the store uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_fulfillment_url")]
    pub fulfillment_url: String,
    /// Product page linked at the bottom of notifications.
    #[serde(default)]
    pub product_url: Option<String>,
    /// Display name → model id. Iterated in sorted key order.
    pub models: BTreeMap<String, String>,
    /// Store codes of interest. Empty means every store in the response.
    ///
    /// Only the first code is sent as the `store` query parameter; the rest
    /// are matched against whatever nearby stores the response lists for it.
    #[serde(default)]
    pub stores: Vec<String>,
    /// Postal code sent when no store is configured.
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub fields: RequestedFields,
    #[serde(default)]
    pub response_format: ResponseFormat,
    #[serde(default)]
    pub markers: Markers,
    #[serde(default)]
    pub notify_on_sellout: bool,
}

impl WatchConfig {
    /// Watched models in iteration order.
    #[must_use]
    pub fn model_specs(&self) -> Vec<ModelSpec> {
        self.models
            .iter()
            .map(|(name, id)| ModelSpec {
                name: name.clone(),
                id: id.clone(),
            })
            .collect()
    }
}

fn default_true() -> bool {
    true
}

fn default_fulfillment_url() -> String {
    DEFAULT_FULFILLMENT_URL.to_string()
}

/// Load and validate the watch configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_watch_config(path: &Path) -> Result<WatchConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::WatchFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_watch_config(&content)
}

/// Parse and validate watch configuration from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text is not valid YAML or fails validation.
pub fn parse_watch_config(content: &str) -> Result<WatchConfig, ConfigError> {
    let watch: WatchConfig = serde_yaml::from_str(content).map_err(ConfigError::WatchFileParse)?;
    validate_watch(&watch)?;
    Ok(watch)
}

fn validate_watch(watch: &WatchConfig) -> Result<(), ConfigError> {
    if watch.models.is_empty() {
        return Err(ConfigError::Validation(
            "at least one model must be configured".to_string(),
        ));
    }

    let mut seen_ids = HashSet::new();
    for (name, id) in &watch.models {
        if name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "model display name must be non-empty".to_string(),
            ));
        }
        if id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "model '{name}' has an empty model id"
            )));
        }
        if !seen_ids.insert(id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate model id: '{id}'"
            )));
        }
    }

    let mut seen_stores = HashSet::new();
    for store in &watch.stores {
        if store.trim().is_empty() {
            return Err(ConfigError::Validation(
                "store code must be non-empty".to_string(),
            ));
        }
        if !seen_stores.insert(store.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate store code: '{store}'"
            )));
        }
    }

    if !watch.fields.pickup && !watch.fields.delivery {
        return Err(ConfigError::Validation(
            "at least one of fields.pickup or fields.delivery must be enabled".to_string(),
        ));
    }

    if watch.markers.prefix.is_empty() || watch.markers.suffix.is_empty() {
        return Err(ConfigError::Validation(
            "markers.prefix and markers.suffix must be non-empty".to_string(),
        ));
    }

    reqwest::Url::parse(&watch.fulfillment_url).map_err(|e| {
        ConfigError::Validation(format!(
            "fulfillment_url '{}' is not a valid URL: {e}",
            watch.fulfillment_url
        ))
    })?;

    Ok(())
}

#[cfg(test)]
#[path = "watch_test.rs"]
mod tests;
