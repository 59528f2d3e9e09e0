use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadConfigError {
    #[error("Failed to read config file {0}")]
    ReadConfigFailed(Box<PathBuf>, #[source] std::io::Error),

    #[error("Failed to parse contents of {0} as json")]
    DeserializeConfigFailed(Box<PathBuf>, #[source] serde_json::Error),
}
