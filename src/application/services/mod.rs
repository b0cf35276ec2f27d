//! Services coordinating the domain and its collaborators.

pub mod controller_registry;
pub mod preview_service;
pub mod preview_token;
pub mod route_table;
pub mod structure_service;

pub use controller_registry::{ControllerRegistry, ResolvedController};
pub use preview_service::{PreviewResolution, PreviewService};
pub use preview_token::PreviewTokenService;
pub use route_table::{RouteBindings, RouteTable, RouteTableBuilder, SkippedPage};
pub use structure_service::StructureService;
