use axum::{
    extract::{Path, Query, State},
    http::Method,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::controller::MapDisplayController;
use crate::error::Result;
use crate::page::MapPage;
use crate::registry::{MapContext, MapRegistry};

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<MapRegistry>,
    pub controller: Arc<MapDisplayController>,
}

impl AppState {
    pub fn new(registry: MapRegistry, config: &Config) -> Self {
        Self {
            registry: Arc::new(registry),
            controller: Arc::new(MapDisplayController::new(config.map.clone())),
        }
    }
}

fn context_for(name: String, mut params: HashMap<String, String>) -> MapContext {
    let id = params.remove("id");
    MapContext { name, id, params }
}

/// Maintenance ping
async fn ping() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "map-widget",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn list_maps(State(state): State<AppState>) -> impl IntoResponse {
    let names: Vec<String> = state.registry.names().into_iter().map(String::from).collect();
    Json(names)
}

/// Full page hosting the named map
async fn map_page(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>> {
    let ctx = context_for(name, params);
    let view = state.registry.build(&ctx)?;
    let rendered = state.controller.render(&view)?;

    let title = match &ctx.id {
        Some(id) => format!("{} {}", ctx.name, id),
        None => ctx.name.clone(),
    };
    let page = MapPage::new(title, state.controller.settings().library_url.clone()).with_map(rendered);
    Ok(Html(page.render()?))
}

/// The map fragment alone, for embedding into an existing page
async fn map_fragment(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>> {
    let ctx = context_for(name, params);
    let view = state.registry.build(&ctx)?;
    Ok(Html(state.controller.render(&view)?.html))
}

/// Create the HTTP router with all routes
pub fn create_server(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/_ping", get(ping))
        .route("/maps", get(list_maps))
        .route("/maps/:name", get(map_page))
        .route("/fragments/:name", get(map_fragment))
        // Serve the map library and its assets
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
}

/// Start the HTTP server on the configured address
pub async fn start_server(state: AppState, config: &Config) -> anyhow::Result<()> {
    let app = create_server(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Map server listening on http://{}", addr);
    info!("Ping:      http://{}/_ping", addr);
    info!("Maps:      http://{}/maps", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
