pub mod app_config;
pub mod config;
pub mod watch;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use watch::{
    load_watch_config, parse_watch_config, Markers, ModelSpec, RequestedFields, ResponseFormat,
    WatchConfig,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read watch file {path}: {source}")]
    WatchFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse watch file: {0}")]
    WatchFileParse(#[source] serde_yaml::Error),

    #[error("invalid watch config: {0}")]
    Validation(String),
}
