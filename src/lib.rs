//! Socialgram - Main Library
//!
//! Backend of a small photo-sharing social network: posts, comments, likes,
//! follows, bookmarks and notifications behind a JSON REST API, with a
//! per-user Server-Sent Events stream that pushes new notifications while
//! the user is online.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types shared with clients
//!   - Users, posts, comments, notifications and their request/response
//!     bodies
//!   - Realtime event envelope
//!   - Error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server and route table
//!   - SQLite persistence with embedded migrations
//!   - Session token verification
//!   - Notification rules and realtime delivery
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the server binary.
//!   Without it only the `shared` wire types are built, for clients that
//!   want to speak the API.
//!
//! # Usage
//!
//! ```rust,no_run
//! use socialgram::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::from_env()?).await?;
//! // Use app with axum::serve
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
