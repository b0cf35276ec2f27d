//! Domain layer containing entities, request context and collaborator contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Pages, templates, routes, structures and preview payloads
//! - [`repositories`] - Content catalog and content API trait definitions
//! - [`controller`] - The late-bound controller capability
//! - [`render_context`] - Request-scoped rendering state
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure
//! - Traits define contracts implemented by the infrastructure layer
//! - Orchestration lives in services (see [`crate::application::services`])

pub mod controller;
pub mod entities;
pub mod render_context;
pub mod repositories;

pub use controller::{Controller, ControllerRequest};
pub use render_context::RenderContext;
