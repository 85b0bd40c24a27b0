//! Notifications Module
//!
//! Stored notifications about likes, comments, follows and mentions, and the
//! endpoints a user manages their own notifications with.
//!
//! ```text
//! notifications/
//! ├── mod.rs       - Module exports
//! ├── db.rs        - Storage queries
//! ├── service.rs   - Creation rules (self, dedup, retention, push)
//! └── handlers.rs  - HTTP handlers
//! ```

pub mod db;
pub mod handlers;
pub mod service;

pub use db::NewNotification;
pub use service::{create_notification, dispatch};
