//! Authentication Module
//!
//! Account registration and login live in a separate service. This server only
//! verifies the session tokens that service issues, using the shared
//! `SECRET_KEY`.
//!
//! A token is accepted from the `token` cookie or from an
//! `Authorization: Bearer <token>` header; see
//! [`crate::backend::middleware::auth`] for how requests are gated.

/// JWT token generation and validation
pub mod sessions;

pub use sessions::{create_token, user_id_from_token, verify_token, Claims, SessionError, DEFAULT_TOKEN_TTL};
