//! Handlers for site routes: dynamic page routes and the fixed peripheral
//! routes built from catalog and configuration.

mod page_route;
mod redirect;
mod robots;
mod sitemap;

pub use page_route::{PageRouteTarget, page_route_handler};
pub use redirect::{RedirectTarget, redirect_handler};
pub use robots::{robots_handler, robots_txt};
pub use sitemap::{sitemap_handler, sitemap_stylesheet_handler};
