//! Real-time Update Module
//!
//! Pushes notification events to users while they are online.
//!
//! - **`broadcast`** - [`NotificationHub`], the registry of per-user channels
//! - **`subscription`** - Server-Sent Events stream over a user's channel
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── broadcast.rs    - Per-user channel registry
//! └── subscription.rs - SSE notification stream handler
//! ```
//!
//! SSE is one-way, which is all notifications need: clients act on them
//! through the regular REST endpoints. Nothing is queued for offline users;
//! they see stored notifications on their next listing.

/// Per-user event channels
pub mod broadcast;

/// Server-Sent Events subscription handler
pub mod subscription;

pub use broadcast::NotificationHub;
pub use subscription::handle_notification_stream;
