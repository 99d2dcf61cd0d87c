//! Core error types for micromood-core.
//!
//! Every failure the library can surface is described here with thiserror.
//! Most of them are recovered locally by the journal (fail-soft) and only
//! reach the user as notices; see [`crate::journal`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for micromood-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Mood history storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rejected input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Sentiment analysis errors
    #[error("Sentiment error: {0}")]
    Sentiment(#[from] SentimentError),
}

/// Errors reading or writing the durable mood history.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The history file exists but could not be read
    #[error("Failed to read mood history at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The history file is not a valid list of mood entries
    #[error("Mood history at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The history could not be written back
    #[error("Failed to write mood history to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The history could not be encoded
    #[error("Failed to encode mood history: {0}")]
    Encode(#[source] serde_json::Error),

    /// No usable data directory
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
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

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Mood text was empty or whitespace only
    #[error("Mood text must not be empty")]
    EmptyMoodText,

    /// Stress rating outside 0..=10
    #[error("Stress level {0} is out of range (expected 0-10)")]
    StressOutOfRange(i64),

    /// Companion name not in the roster
    #[error("Unknown companion '{0}' (expected buddy, sage, sunny or zen)")]
    UnknownCompanion(String),
}

/// Sentiment analyzer failures. Always recovered with a neutral reading.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SentimentError {
    /// Input longer than the analyzer accepts
    #[error("Text too long for analysis: {len} characters (limit {limit})")]
    TextTooLong { len: usize, limit: usize },

    /// Analyzer-specific failure
    #[error("Sentiment analysis failed: {0}")]
    Failed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
