//! Shared Error Types
//!
//! This module defines error types that are shared between the HTTP layer and
//! the wire types in `shared::social`. These errors represent failures that do
//! not depend on the server runtime.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `UnknownVariant` - A stored or submitted string does not name a known enum value
//!
//! # Usage
//!
//! ```rust
//! use socialgram::shared::error::SharedError;
//!
//! let error = SharedError::unknown_variant("notification kind", "poke");
//! assert!(error.to_string().contains("poke"));
//! ```
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// A string did not match any variant of a closed set
    #[error("Unknown {kind} value: '{value}'")]
    UnknownVariant {
        /// What was being parsed (e.g. "gender")
        kind: &'static str,
        /// The rejected input
        value: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new unknown-variant error
    pub fn unknown_variant(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
