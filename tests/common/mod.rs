//! Common test utilities and helpers
//!
//! - An in-memory application with request helpers
//! - Custom assertion macros

#![allow(dead_code)]

pub mod app;
pub mod assertions;

pub use app::{TestApp, TestResponse, TestUser, TEST_SECRET};
