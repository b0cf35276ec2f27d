use std::sync::Arc;

use crate::application::services::{
    ControllerRegistry, PreviewService, PreviewTokenService, RouteTable, StructureService,
};
use crate::domain::repositories::ContentCatalog;

/// Site-wide values the peripheral routes need.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub base_url: String,
    pub production: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn ContentCatalog>,
    pub registry: Arc<ControllerRegistry>,
    pub structure_service: Arc<StructureService>,
    pub preview_service: Arc<PreviewService>,
    pub preview_tokens: Arc<PreviewTokenService>,
    pub route_table: Arc<RouteTable>,
    pub site: SiteSettings,
}
