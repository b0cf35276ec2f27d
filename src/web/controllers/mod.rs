//! Controllers shipped with the router.
//!
//! Applications register their own controllers on the registry returned by
//! [`default_registry`] before the route table is built.

mod page_controller;

pub use page_controller::PageController;

use crate::application::services::ControllerRegistry;
use crate::application::services::controller_registry::PAGE_CONTROLLER;

/// Registry resolving names in `namespace`, with the built-in
/// [`PageController`] registered as the fallback for pages without a
/// controller.
pub fn default_registry(namespace: &str) -> ControllerRegistry {
    let mut registry = ControllerRegistry::new(namespace);
    registry.register_qualified(PAGE_CONTROLLER, || PageController);
    registry
}
