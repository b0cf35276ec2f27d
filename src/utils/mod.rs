//! Utility functions shared by the route table and the web layer.
//!
//! - [`route_path`] - Route path composition, validation and absolute urls

pub mod route_path;
