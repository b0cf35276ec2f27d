//! HTTP request handlers for the editor and operational endpoints.

pub mod health;
pub mod preview;

pub use health::health_handler;
pub use preview::preview_handler;
