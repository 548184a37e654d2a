//! Middleware for the microlending API
//!
//! This module provides middleware for request tracing, security headers,
//! and session authentication.

pub mod auth;
mod security;
mod tracing;

pub use auth::{AdminUser, AuthenticatedUser};
pub use security::security_headers;
pub use self::tracing::request_tracing;
