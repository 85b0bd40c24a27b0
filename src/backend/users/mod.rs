//! Users Module
//!
//! Profiles and the follow graph.
//!
//! ```text
//! users/
//! ├── mod.rs       - Module exports
//! ├── db.rs        - User and follow-edge queries
//! └── handlers.rs  - HTTP handlers
//! ```

pub mod db;
pub mod handlers;

pub use db::{create_user, UserRecord};
