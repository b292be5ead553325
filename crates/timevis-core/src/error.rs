//! Core error types for timevis-core.
//!
//! This module defines the error hierarchy using thiserror. The layout
//! engine itself is infallible once events are parsed; errors come from the
//! boundaries (event store, configuration, timestamp parsing, render
//! arguments).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timevis-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Event store errors
    #[error("Event store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Timestamp parsing errors
    #[error("Timestamp error: {0}")]
    Stamp(#[from] StampError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while reading a month file from the event store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The month file does not exist
    #[error("No event file at {path}")]
    Missing { path: PathBuf },

    /// The month file exists but could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The month file is not a valid event array
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Path of the month file the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Missing { path } | Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// The configuration directory could not be determined or created
    #[error("Configuration directory unavailable: {0}")]
    DataDir(#[source] std::io::Error),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A render was requested for zero days
    #[error("Day count must be at least 1, got {0}")]
    EmptyRange(u32),

    /// A render was requested for more days than a chart may hold
    #[error("Day count {days} exceeds the maximum of {max}")]
    RangeTooLong { days: u32, max: u32 },

    /// A directive started with something other than a known command
    #[error("Unknown directive command '{0}'")]
    UnknownCommand(String),

    /// A layout metric that must be a positive, finite number is not
    #[error("Layout value '{name}' must be positive, got {value}")]
    InvalidMetric { name: &'static str, value: f64 },

    /// A date string did not parse as `YYYY-MM-DD`
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A colour string did not parse as `#rrggbb`
    #[error("Invalid colour '{0}', expected #rrggbb")]
    InvalidColor(String),
}

/// Errors produced while parsing a `"YYYY MM DD HH mm"` event timestamp.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StampError {
    /// Wrong number of whitespace-separated fields
    #[error("expected 5 fields in '{input}', found {found}")]
    FieldCount { input: String, found: usize },

    /// A field is not an integer
    #[error("field '{field}' in '{input}' is not a number")]
    NotANumber { input: String, field: String },

    /// The fields do not describe a real date and time
    #[error("'{0}' is not a valid date and time")]
    OutOfRange(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
