//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Session token verification for the API routes

pub mod auth;

pub use auth::{auth_middleware, token_from_headers, AuthUser, AuthenticatedUser, TOKEN_COOKIE};
