//! Error types for extblock-core
//!
//! Centralized error handling using `thiserror` for ergonomic error definitions.

use crate::extension::ValidationError;
use thiserror::Error;

/// Message shown when the authority could not be reached at all
pub const NETWORK_FAILURE_MESSAGE: &str =
    "Request failed before the server answered. Check that the server is reachable.";

/// Main error type for extblock-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected locally before any request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The authority already holds this rule (HTTP 409)
    #[error("{message}")]
    Conflict {
        /// Message reported by the authority
        message: String,
    },

    /// The authority does not know the requested rule (HTTP 404)
    #[error("{message}")]
    NotFound {
        /// Message reported by the authority
        message: String,
    },

    /// Any other failure reported by the authority
    #[error("{message}")]
    Authority {
        /// HTTP status of the response
        status: u16,
        /// Message reported by the authority
        message: String,
    },

    /// The authority could not be reached or answered with garbage
    #[error("{}", NETWORK_FAILURE_MESSAGE)]
    Transport {
        /// Underlying transport failure, kept for logs
        detail: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to the missing config file
        path: String,
    },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    ConfigValue {
        /// Configuration key
        key: String,
        /// Error message
        message: String,
    },

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected by the classifier
    Validation,
    /// Duplicate rule
    Conflict,
    /// Unknown rule
    NotFound,
    /// Other authority-reported failure
    Authority,
    /// Network or decoding failure
    Transport,
    /// Local configuration problem
    Config,
}

impl Error {
    /// Create a transport error from any displayable cause
    pub fn transport(detail: impl std::fmt::Display) -> Self {
        Self::Transport {
            detail: detail.to_string(),
        }
    }

    /// Create the error matching an authority response status
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            409 => Self::Conflict { message },
            404 => Self::NotFound { message },
            _ => Self::Authority { status, message },
        }
    }

    /// Create a config value error
    pub fn config_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValue {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Authority { .. } => ErrorKind::Authority,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Config(_)
            | Self::ConfigNotFound { .. }
            | Self::ConfigValue { .. }
            | Self::Io(_)
            | Self::TomlParse(_) => ErrorKind::Config,
        }
    }
}
