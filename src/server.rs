//! HTTP server initialization and runtime setup.
//!
//! Handles content source selection, cache setup, route table building and
//! the Axum server lifecycle.

use crate::application::services::{
    ControllerRegistry, PreviewService, PreviewTokenService, RouteTable, RouteTableBuilder,
    StructureService,
};
use crate::config::Config;
use crate::domain::entities::Redirect;
use crate::domain::repositories::{ContentApi, ContentCatalog};
use crate::infrastructure::cache::{MemoryCache, RedisCache, StructureCache};
use crate::infrastructure::content::{ApiContentCatalog, HttpContentApi, InMemoryCatalog};
use crate::routes::app_router;
use crate::state::{AppState, SiteSettings};
use crate::web::controllers::default_registry;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Catalog and raw API the services read content from.
#[derive(Clone)]
pub struct ContentSources {
    pub catalog: Arc<dyn ContentCatalog>,
    pub api: Arc<dyn ContentApi>,
}

/// Selects the content sources.
///
/// A snapshot replaces the remote catalog. Structures are still fetched
/// from the API when one is configured, and from the snapshot otherwise.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or the API client
/// cannot be built.
pub fn content_sources(config: &Config) -> Result<ContentSources> {
    let http_api = match &config.content_api_url {
        Some(url) => {
            let api = HttpContentApi::new(
                url,
                config.content_api_token.clone(),
                Duration::from_secs(config.content_api_timeout),
            )
            .context("Failed to create content API client")?;
            Some(Arc::new(api) as Arc<dyn ContentApi>)
        }
        None => None,
    };

    if let Some(path) = &config.content_snapshot {
        let snapshot = Arc::new(InMemoryCatalog::from_snapshot_file(path)?);
        tracing::info!("Content catalog loaded from snapshot {}", path.display());

        let api = http_api.unwrap_or_else(|| snapshot.clone() as Arc<dyn ContentApi>);
        return Ok(ContentSources {
            catalog: snapshot,
            api,
        });
    }

    let api = http_api.context("CONTENT_API_URL must be set without CONTENT_SNAPSHOT")?;
    Ok(ContentSources {
        catalog: Arc::new(ApiContentCatalog::new(api.clone())),
        api,
    })
}

/// Connects the structure cache, falling back to the in-process map when
/// Redis is not configured or unreachable.
pub async fn structure_cache(config: &Config) -> Arc<dyn StructureCache> {
    if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Structure cache enabled (Redis)");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using in-memory cache.", e);
            }
        }
    } else {
        tracing::info!("Structure cache in memory");
    }

    Arc::new(MemoryCache::new())
}

/// Builds the route table from every page in the catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read, or if a page's routes
/// fail outside production.
pub async fn build_route_table(
    catalog: &dyn ContentCatalog,
    registry: Arc<ControllerRegistry>,
    strict: bool,
) -> Result<RouteTable> {
    let pages = catalog
        .all_pages()
        .await
        .context("Failed to load pages from content catalog")?;

    let table = RouteTableBuilder::new(registry, strict)
        .build(&pages)
        .context("Failed to build route table")?;

    Ok(table)
}

/// Wires services and builds the route table.
///
/// Returns the state and the catalog redirects to mount.
///
/// # Errors
///
/// See [`content_sources`] and [`build_route_table`].
pub async fn build_state(
    config: &Config,
    registry: ControllerRegistry,
) -> Result<(AppState, Vec<Redirect>)> {
    let sources = content_sources(config)?;
    let cache = structure_cache(config).await;
    let registry = Arc::new(registry);

    let route_table =
        build_route_table(sources.catalog.as_ref(), registry.clone(), config.strict_routes())
            .await?;

    let redirects = sources
        .catalog
        .all_redirects()
        .await
        .context("Failed to load redirects from content catalog")?;

    let structure_service = Arc::new(StructureService::new(sources.api.clone(), cache));
    let preview_service = Arc::new(PreviewService::new(
        sources.catalog.clone(),
        structure_service.clone(),
        registry.clone(),
    ));

    let state = AppState {
        catalog: sources.catalog,
        registry,
        structure_service,
        preview_service,
        preview_tokens: Arc::new(PreviewTokenService::new(
            config.preview_signing_secret.clone(),
        )),
        route_table: Arc::new(route_table),
        site: SiteSettings {
            base_url: config.base_url.clone(),
            production: config.environment.is_production(),
        },
    };

    Ok((state, redirects))
}

/// Runs the HTTP server with the built-in controllers only.
///
/// # Errors
///
/// See [`run_with_registry`].
pub async fn run(config: Config) -> Result<()> {
    let registry = default_registry(&config.controller_namespace);
    run_with_registry(config, registry).await
}

/// Runs the HTTP server with application controllers registered on
/// `registry`.
///
/// Initializes:
/// - Content catalog and API client
/// - Structure cache (Redis or in-memory)
/// - Route table, before the listener is bound
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Content sources cannot be set up
/// - Building the route table fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run_with_registry(config: Config, registry: ControllerRegistry) -> Result<()> {
    let (state, redirects) = build_state(&config, registry).await?;

    tracing::info!(
        "Route table ready: {} routes, {} pages skipped, {} redirects",
        state.route_table.len(),
        state.route_table.skipped.len(),
        redirects.len()
    );

    let router = app_router(state, &redirects, config.behind_proxy);
    let app = NormalizePathLayer::trim_trailing_slash().layer(router);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
