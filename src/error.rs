//! Crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the store's subscribers, the view layer, configuration
/// loading and command parsing.
///
/// Lookup misses (unknown state keys, unknown catalog identifiers) are not
/// errors; they resolve to `None` or a default value.
#[derive(Debug, Error)]
pub enum Error {
    /// A cart line points at a product the catalog does not contain.
    #[error("cart line references unknown product `{0}`")]
    UnknownProduct(String),

    #[error("failed to format frame: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("failed to commit frame: {0}")]
    Surface(#[source] std::io::Error),

    #[error("invalid YAML: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognized command `{0}`")]
    UnknownCommand(String),

    #[error("missing argument for `{command}`")]
    MissingArgument { command: &'static str },

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("`{value}` is not a valid argument for `{command}`")]
    InvalidArgument {
        command: &'static str,
        value: String,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
