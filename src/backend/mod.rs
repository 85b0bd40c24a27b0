//! Backend Module
//!
//! All server-side code: the Axum HTTP server, the SQLite store, session
//! verification and the realtime notification stream. Compiled only with the
//! `ssr` feature.
//!
//! # Architecture
//!
//! - **`server`** - Initialization, application state, configuration
//! - **`routes`** - Router assembly and the API endpoint table
//! - **`users`** - Profiles and the follow graph
//! - **`posts`** - Posts, likes, comments, bookmarks and @mentions
//! - **`notifications`** - Notification storage rules and endpoints
//! - **`realtime`** - Per-user event channels and the SSE stream
//! - **`auth`** - Session token verification
//! - **`middleware`** - Request authentication
//! - **`error`** - Backend error type and its HTTP conversion
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── users/          - User handlers and queries
//! ├── posts/          - Post handlers and queries
//! ├── notifications/  - Notification handlers, queries and rules
//! ├── realtime/       - Event channels and SSE
//! ├── auth/           - Session tokens
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! Handlers stay thin: validate, run one or two store operations, answer
//! with JSON. The only cross-component message beyond request/response is
//! "push this event to user X", which goes through the
//! [`realtime::NotificationHub`].

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Users and follows
pub mod users;

/// Posts and their engagement
pub mod posts;

/// Notifications
pub mod notifications;

/// Real-time update system
pub mod realtime;

/// Backend error types
pub mod error;

/// Session tokens
pub mod auth;

/// Middleware for request processing
pub mod middleware;

pub use error::{ApiResult, BackendError};
pub use realtime::NotificationHub;
pub use server::{create_app, AppState, ServerConfig};
