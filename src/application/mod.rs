//! Application layer services.
//!
//! Services consume the collaborator traits of the domain layer and are
//! shared by the HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::controller_registry::ControllerRegistry`] - Late-bound controller lookup
//! - [`services::route_table::RouteTableBuilder`] - Dynamic route table from catalog pages
//! - [`services::structure_service::StructureService`] - Memoized structure configs
//! - [`services::preview_service::PreviewService`] - Editor preview resolution
//! - [`services::preview_token::PreviewTokenService`] - Preview token signing

pub mod services;
