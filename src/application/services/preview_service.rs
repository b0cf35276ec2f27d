//! Resolution of editor preview payloads.

use std::fmt;
use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::application::services::controller_registry::ControllerRegistry;
use crate::application::services::structure_service::StructureService;
use crate::domain::controller::Controller;
use crate::domain::entities::{Page, PreviewPayload, Relation};
use crate::domain::render_context::RenderContext;
use crate::domain::repositories::ContentCatalog;
use crate::error::AppError;

/// Action invoked on a page's controller during a page preview.
pub const PAGE_PREVIEW_ACTION: &str = "index";

/// What a preview request resolved to.
pub enum PreviewResolution {
    /// Render the page's default view; no controller is invoked.
    DefaultPage(Arc<Page>),
    /// Invoke `action` on a resolved controller with positional arguments.
    Dispatch {
        symbol: String,
        controller: Arc<dyn Controller>,
        action: String,
        args: Vec<Option<String>>,
    },
}

impl fmt::Debug for PreviewResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultPage(page) => f.debug_tuple("DefaultPage").field(&page.id).finish(),
            Self::Dispatch {
                symbol,
                action,
                args,
                ..
            } => f
                .debug_struct("Dispatch")
                .field("symbol", symbol)
                .field("action", action)
                .field("args", args)
                .finish(),
        }
    }
}

/// Interprets authenticated preview payloads.
pub struct PreviewService {
    catalog: Arc<dyn ContentCatalog>,
    structures: Arc<StructureService>,
    registry: Arc<ControllerRegistry>,
}

impl PreviewService {
    pub fn new(
        catalog: Arc<dyn ContentCatalog>,
        structures: Arc<StructureService>,
        registry: Arc<ControllerRegistry>,
    ) -> Self {
        Self {
            catalog,
            structures,
            registry,
        }
    }

    /// Resolves `payload` to a default page render or a controller dispatch.
    ///
    /// `context` receives mode and edit tools before anything else happens,
    /// so callers observe them even when resolution fails. Page previews
    /// also set the current page.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] for missing ids, pages, revisions or structures
    /// - [`AppError::Configuration`] for unusable controller configuration
    /// - [`AppError::UnsupportedRelation`] for relations other than page and entry
    /// - [`AppError::Upstream`] if the content API fails
    pub async fn resolve(
        &self,
        payload: &PreviewPayload,
        context: &mut RenderContext,
    ) -> Result<PreviewResolution, AppError> {
        *context = RenderContext::from_payload(payload);

        match payload.relation() {
            Relation::Page => self.resolve_page(payload, context).await,
            Relation::Entry => self.resolve_entry(payload).await,
            Relation::Other(relation) => Err(AppError::unsupported_relation(
                format!("Unsupported preview relation '{relation}'"),
                json!({ "relation": relation }),
            )),
        }
    }

    async fn resolve_page(
        &self,
        payload: &PreviewPayload,
        context: &mut RenderContext,
    ) -> Result<PreviewResolution, AppError> {
        let page_id = payload
            .page_id
            .ok_or_else(|| AppError::not_found("Preview payload has no page_id", json!({})))?;

        let mut page = self
            .catalog
            .find_page(page_id)
            .await?
            .ok_or_else(|| AppError::not_found("Page not found", json!({ "page_id": page_id })))?;

        if let Some(revision_id) = payload.pinned_revision() {
            let revision = self
                .catalog
                .find_revision(page_id, revision_id)
                .await?
                .ok_or_else(|| {
                    AppError::not_found(
                        "Revision not found",
                        json!({ "page_id": page_id, "revision_id": revision_id }),
                    )
                })?;
            page.load_revision(revision);
        }

        let page = Arc::new(page);
        context.page = Some(page.clone());

        if page.controller().is_none() {
            debug!(page_id, "Previewing page with default view");
            return Ok(PreviewResolution::DefaultPage(page));
        }

        let resolved = self.registry.resolve(&page)?;
        debug!(page_id, controller = %resolved.symbol, "Previewing page through controller");

        Ok(PreviewResolution::Dispatch {
            symbol: resolved.symbol,
            controller: resolved.controller,
            action: PAGE_PREVIEW_ACTION.to_string(),
            args: Vec::new(),
        })
    }

    async fn resolve_entry(&self, payload: &PreviewPayload) -> Result<PreviewResolution, AppError> {
        let structure_id = payload.structure_id.ok_or_else(|| {
            AppError::not_found("Preview payload has no structure_id", json!({}))
        })?;

        let config = self.structures.get_structure_config(structure_id).await?;

        let target = config.preview_controller_action().ok_or_else(|| {
            AppError::configuration(
                "Structure has no valid previewController",
                json!({
                    "structure_id": structure_id,
                    "preview_controller": config.preview_controller,
                }),
            )
        })?;

        let symbol = self.registry.qualify(&target.controller).ok_or_else(|| {
            AppError::configuration(
                "Structure preview controller is empty",
                json!({ "structure_id": structure_id }),
            )
        })?;

        let controller = self.registry.instantiate(&symbol)?;
        debug!(structure_id, controller = %symbol, action = %target.action, "Previewing entry");

        Ok(PreviewResolution::Dispatch {
            symbol,
            controller,
            action: target.action,
            args: vec![
                Some(structure_id.to_string()),
                payload.entry_id.map(|id| id.to_string()),
                payload.revision_id.map(|id| id.to_string()),
            ],
        })
    }
}
