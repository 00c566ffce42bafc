//! Board error types.

use std::path::PathBuf;

use pinboard_api::ItemId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("{0} was already marked ready")]
    DuplicateReadiness(ItemId),

    #[error("{0} was never registered")]
    UnknownItem(ItemId),

    #[error("cannot register new items once loading has started")]
    RegistrationClosed,

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
