//! Error types for lexdiv-core.
//!
//! Sanitizing, tokenizing and scoring are total functions. Only loading
//! configuration and reading input can fail.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,

    /// The resolved report configuration requests no windows.
    #[error("at least one MATTR window must be configured")]
    NoWindows,

    /// A window asks for more decimal places than a score can carry.
    #[error("MATTR-{window} asks for {decimals} decimal places (at most {max})")]
    TooManyDecimals {
        /// Window size of the offending entry.
        window: usize,
        /// Requested decimal places.
        decimals: usize,
        /// Largest accepted value.
        max: usize,
    },
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by a [`TextSource`](crate::source::TextSource).
#[derive(Error, Debug)]
pub enum SourceError {
    /// Reading from a file failed.
    #[error("failed to read {path}")]
    File {
        /// The file that could not be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Reading from a stream failed.
    #[error("failed to read {label}")]
    Stream {
        /// Human-readable name of the stream (e.g. "stdin").
        label: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input exceeds the configured size limit.
    #[error("input too large: {label} is {size} bytes (limit: {limit} bytes)")]
    TooLarge {
        /// Human-readable name of the input.
        label: String,
        /// Observed size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// The collaborator could not provide any text (e.g. clipboard access failed).
    #[error("{label} unavailable: {reason}")]
    Unavailable {
        /// Human-readable name of the source.
        label: String,
        /// What went wrong.
        reason: String,
    },
}

/// Result type alias using [`SourceError`].
pub type SourceResult<T> = Result<T, SourceError>;
