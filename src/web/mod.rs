//! Public site layer.
//!
//! Mounts the dynamic page routes built from the content catalog next to
//! robots, sitemap and redirect routes. Views use Askama templates for
//! server-side rendering.
//!
//! # Modules
//!
//! - [`controllers`] - Built-in controllers and the default registry
//! - [`handlers`] - Page route, redirect, robots and sitemap handlers
//! - [`routes`] - Site route mounting
//! - [`views`] - Askama views

pub mod controllers;
pub mod handlers;
pub mod routes;
pub mod views;
