// Axum server for the lifecycle dashboard
//
// Serves the dashboard page, the diagram as SVG and a small JSON API over
// the loaded lifecycle document. View state arrives in the query string on
// every request; the server only keeps the immutable dataset and a cache of
// rendered diagrams.

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};

use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use moka::future::Cache;

use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::data::{Exemplar, LifecycleData};
use crate::layout::{compute_layout, LayoutConfig};
use crate::render::RenderConfig;
use crate::view::{ViewQuery, ViewState};
use crate::web::handlers::pages::dashboard_page;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<LifecycleData>,
    pub config: Arc<AppConfig>,
    pub layout_config: Arc<LayoutConfig>,
    pub render_config: Arc<RenderConfig>,
    /// Rendered SVG keyed by canonical view query
    pub svg_cache: Cache<String, Arc<String>>,
}

impl AppState {
    /// Load the lifecycle document named by `config` and build shared state.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading lifecycle data from {}...", config.data_path.display());
        let (data, source) = LifecycleData::load_or_default(&config.data_path)?;
        tracing::info!("Lifecycle data source: {:?}", source);

        let issues = data.validate();
        for issue in &issues {
            tracing::warn!("Lifecycle data: {}", issue);
        }
        if !issues.is_empty() {
            tracing::warn!("{} dangling or duplicate references in lifecycle data", issues.len());
        }

        Ok(Self::from_data(data, config))
    }

    /// Build state around an already loaded dataset
    pub fn from_data(data: LifecycleData, config: AppConfig) -> Self {
        tracing::info!("Initializing Moka SVG cache...");
        let svg_cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(Duration::from_secs(300)) // 5 min TTL
            .build();

        Self {
            data: Arc::new(data),
            config: Arc::new(config),
            layout_config: Arc::new(LayoutConfig::default()),
            render_config: Arc::new(RenderConfig::default()),
            svg_cache,
        }
    }

    /// Decode the request query into a normalized view state
    pub fn view_from_query(&self, raw: Option<&str>) -> ViewState {
        let query = ViewQuery::parse(raw.unwrap_or_default());
        ViewState::from_query(&query, &self.data)
    }

    /// Render (or fetch from cache) the SVG diagram for a view
    pub async fn diagram_svg(&self, view: &ViewState) -> Arc<String> {
        let cache_key = view.to_query_string();

        if let Some(cached) = self.svg_cache.get(&cache_key).await {
            tracing::debug!("SVG cache hit: {}", cache_key);
            return cached;
        }

        let chart = crate::render_view(&self.data, view, &self.layout_config, &self.render_config);
        let svg = Arc::new(chart.to_svg());
        self.svg_cache.insert(cache_key, svg.clone()).await;
        svg
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Dashboard (HTML, htmx partial on HX-Request)
        .route("/", get(dashboard_page))
        .route("/diagram.svg", get(get_diagram))

        // Health check
        .route("/health", get(health_check))

        // Lifecycle endpoints (JSON API)
        .route("/api/lifecycle", get(get_lifecycle))
        .route("/api/stages", get(get_stages))
        .route("/api/stages/:name", get(get_stage))
        .route("/api/layout", get(get_layout))
        .route("/api/statistics", get(get_statistics))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn get_diagram(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    let view = state.view_from_query(raw.as_deref());
    let svg = state.diagram_svg(&view).await;

    (
        [(header::CONTENT_TYPE, "image/svg+xml; charset=utf-8")],
        svg.as_str().to_owned(),
    )
        .into_response()
}

async fn get_lifecycle(State(state): State<AppState>) -> Json<LifecycleData> {
    Json(state.data.as_ref().clone())
}

async fn get_stages(State(state): State<AppState>) -> Json<serde_json::Value> {
    let stages = state.data.stage_summaries();
    Json(serde_json::json!({
        "rows": stages.len(),
        "data": stages
    }))
}

async fn get_stage(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let data = &state.data;
    let summary = data
        .stage_summaries()
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| AppError::NotFound(format!("Stage not found: {}", name)))?;

    let categories: Vec<serde_json::Value> = summary
        .categories
        .iter()
        .map(|category| {
            let tools: Vec<&Exemplar> = data.exemplars_in_category(&name, category).collect();
            serde_json::json!({
                "category": category,
                "tools": tools
            })
        })
        .collect();

    let outgoing: Vec<_> = data.connections.iter().filter(|c| c.from == name).collect();
    let incoming: Vec<_> = data.connections.iter().filter(|c| c.to == name).collect();

    Ok(Json(serde_json::json!({
        "stage": summary,
        "categories": categories,
        "outgoing": outgoing,
        "incoming": incoming
    })))
}

async fn get_layout(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<serde_json::Value>, AppError> {
    let view = state.view_from_query(raw.as_deref());
    let layout = compute_layout(&state.data, &state.layout_config, view.category_filter());

    let body = serde_json::json!({
        "view": view,
        "query": view.to_query_string(),
        "layout": layout
    });
    Ok(Json(body))
}

async fn get_statistics(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "title": state.config.title,
        "version": state.config.version,
        "statistics": state.data.statistics()
    }))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Template(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Template(msg) => {
                tracing::error!("Template rendering failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
