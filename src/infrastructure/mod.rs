//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for content access and caching.
//!
//! # Modules
//!
//! - [`cache`] - Structure config caches (in-process and Redis)
//! - [`content`] - Content API client and catalog adapters

pub mod cache;
pub mod content;
