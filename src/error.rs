//! Error types for the query cache
//!
//! Store and read-through operations never fail on their own; producer errors
//! are returned to the caller unchanged. These variants cover configuration
//! and parameter conversion only.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the query cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Configuration value that cannot be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Query parameter without a stable scalar rendering
    #[error("Unsupported query parameter: {0}")]
    UnsupportedParam(String),
}

// == Result Type Alias ==
/// Convenience Result type for the query cache.
pub type Result<T> = std::result::Result<T, CacheError>;
