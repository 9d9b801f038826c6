//! Unified error types and result handling.

use crate::book::transport::TransportError;
use thiserror::Error;

/// Top-level error type shared by the pagination core, the booklet state
/// machine, and the Discord-facing layers.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration, either from `config.toml` or from a
    /// [`PaginationConfig`](crate::pagination::PaginationConfig) whose limits
    /// leave no room for page content.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what was wrong.
        message: String,
    },

    /// `start()` was called on a booklet that is already running or has
    /// already finished. This is always a caller bug, never a no-op.
    #[error("Booklet has already been started")]
    AlreadyStarted,

    /// A booklet operation that requires a running event loop was invoked
    /// while the booklet was not running.
    #[error("Booklet is not running")]
    NotRunning,

    /// Failure reported by the message transport (send/edit/reaction calls).
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// I/O error, typically while reading `config.toml`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable was missing or malformed.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Error bubbled up from the Serenity/Poise framework.
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Error::FrameworkError(Box::new(value))
    }
}

impl Error {
    /// Shorthand for building a [`Error::Config`] from anything displayable.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
