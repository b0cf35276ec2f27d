//! HTTP middleware for request processing and protection.
//!
//! Provides preview token verification, rate limiting, and observability.

pub mod jwt_proxy;
pub mod rate_limit;
pub mod tracing;
