//! Error types for hubrecents.
//!
//! This module defines the centralized error type [`RecentsError`] and a type alias
//! [`Result`] used throughout the crate. All errors derive `Error` through `thiserror`.

use thiserror::Error;

/// The main error type for hubrecents operations.
///
/// Storage failures, configuration problems and sync failures all surface through
/// this enum. Note that the recent-repositories cache itself never returns read
/// errors to its callers: a store that cannot be read degrades to an empty list.
///
/// # Examples
///
/// ```
/// use hubrecents::RecentsError;
///
/// fn validate_config() -> Result<(), RecentsError> {
///     Err(RecentsError::Config("max_recent must be positive".to_string()))
/// }
///
/// assert!(validate_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum RecentsError {
    /// Reading from or writing to the key-value store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid.
    ///
    /// Missing configuration is not an error; defaults apply instead.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A repository identifier could not be parsed as `owner/name`.
    #[error("Invalid repository identifier: {0}")]
    InvalidRepository(String),

    /// A sync campaign could not enumerate the owners to synchronize.
    #[error("Sync error: {0}")]
    Sync(String),
}

/// A specialized `Result` type for hubrecents operations.
pub type Result<T> = std::result::Result<T, RecentsError>;
