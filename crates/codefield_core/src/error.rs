//! # Field Error Types
//!
//! All errors that can occur while configuring the token field and page
//! models. The per-frame step itself is infallible.

use thiserror::Error;

/// Errors that can occur in the codefield core.
#[derive(Error, Debug)]
pub enum FieldError {
    /// A configuration value is out of its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The TOML document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The token vocabulary has no labels to sample from.
    #[error("token vocabulary is empty")]
    EmptyVocabulary,

    /// The viewport has a non-finite or negative dimension.
    #[error("invalid viewport: {width}x{height}")]
    InvalidViewport {
        /// CSS width that was rejected.
        width: f64,
        /// CSS height that was rejected.
        height: f64,
    },
}

/// Result type for codefield operations.
pub type FieldResult<T> = Result<T, FieldError>;
