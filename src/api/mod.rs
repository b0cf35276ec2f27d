//! HTTP layer for the editor preview proxy and operational endpoints.
//!
//! # Modules
//!
//! - [`dto`] - Response serialization types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Token verification, rate limiting and tracing
//! - [`routes`] - Route configuration
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
