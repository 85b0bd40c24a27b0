//! Shared Module
//!
//! This module contains the wire types exchanged over the REST API and the
//! real-time stream. They carry no server runtime dependencies and can be
//! reused by any Rust client of the API.
//!
//! # Overview
//!
//! - **`social`** - users, posts, comments and notifications as they appear on the wire
//! - **`event`** - events pushed to a user's live connection
//! - **`error`** - errors raised while parsing or serializing those types

/// Social wire types
pub mod social;

/// Real-time event system
pub mod event;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use event::{EventType, RealtimeEvent};
pub use error::SharedError;
