//! Route Configuration Module
//!
//! - **`router`** - Main router creation: API, static frontend, CORS, tracing
//! - **`api_routes`** - The `/api/v1` endpoints behind the auth middleware
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint table
//! ```

/// Main router creation
pub mod router;

/// API endpoint table
pub mod api_routes;

pub use api_routes::{configure_api_routes, API_PREFIX};
pub use router::create_router;
