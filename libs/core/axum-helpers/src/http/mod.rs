//! HTTP middleware module.
//!
//! Provides CORS configuration and security headers.

pub mod cors;
pub mod security;

pub use cors::create_permissive_cors_layer;
pub use security::security_headers;
