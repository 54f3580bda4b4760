//! Core error types for itinerary-core.
//!
//! Each concern gets its own thiserror enum; [`CoreError`] wraps them all
//! so callers that do not care about the source can use `?` freely.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for itinerary-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed wall-clock time
    #[error("Time error: {0}")]
    Time(#[from] TimeError),

    /// Rejected user input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Schedule computation rejected its input
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// State update could not be applied
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Persistence failures
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while parsing `HH:MM` strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// The input does not look like `H:MM` / `HH:MM`
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),

    /// Hours or minutes outside the wall-clock range
    #[error("Time out of range: {hours:02}:{minutes:02}")]
    OutOfRange { hours: u32, minutes: u32 },
}

/// Validation errors for user-supplied values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Duration must be a positive number of minutes
    #[error("Invalid duration '{0}': expected a positive number of minutes")]
    InvalidDuration(String),

    /// Date range where the end precedes the start
    #[error("Invalid date range: end ({end}) is before start ({start})")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors from the schedule calculator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The day snapshot violates the calculator's input contract
    #[error("Invalid schedule input for place '{place_id}': {message}")]
    InvalidInput { place_id: String, message: String },
}

/// Errors from applying an action to the application state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Referenced entity does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// No trip or day is selected
    #[error("No current {0} selected")]
    NoSelection(&'static str),

    /// Reorder list is not a permutation of the day's places
    #[error("Invalid reorder: {0}")]
    InvalidReorder(String),

    /// Index outside the place list
    #[error("Index {index} out of bounds for day with {len} places")]
    OutOfBounds { index: usize, len: usize },

    /// An entity with this id already exists
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// Rejected field value
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Persistence-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the key-value store
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(#[from] rusqlite::Error),

    /// Stored document could not be (de)serialized
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(#[from] std::io::Error),
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
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
