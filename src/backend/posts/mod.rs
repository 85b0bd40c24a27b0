//! Posts Module
//!
//! Posts with their likes, comments and bookmarks.
//!
//! ```text
//! posts/
//! ├── mod.rs       - Module exports
//! ├── db.rs        - Post, like, comment and bookmark queries
//! ├── mentions.rs  - @mention extraction from comment text
//! └── handlers.rs  - HTTP handlers
//! ```

pub mod db;
pub mod handlers;
pub mod mentions;

pub use db::PostRecord;
pub use mentions::extract_mentions;
