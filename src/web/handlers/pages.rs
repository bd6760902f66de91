// Page handlers for HTML rendering with Askama

use axum::{
    extract::{RawQuery, State},
    response::{Html, IntoResponse, Response},
};
use askama::Template;
use axum_htmx::HxRequest;

use crate::api_server::{AppError, AppState};
use crate::view::ViewState;
use crate::web::view_models::{self, DetailPanel, Sidebar};

// ============================================================================
// Dashboard
// ============================================================================

/// Controls, diagram and detail panel; swapped as a unit by htmx
#[derive(Template)]
#[template(path = "partials/workspace.html")]
pub struct WorkspacePartial {
    pub query: String,
    pub mode_label: String,
    pub sidebar: Sidebar,
    pub svg: String,
    pub panel: DetailPanel,
}

#[derive(Template)]
#[template(path = "pages/dashboard.html")]
pub struct DashboardPage {
    pub title: String,
    pub description: String,
    pub version: String,
    pub intro_html: String,
    pub help_html: String,
    pub footer_html: String,
    pub workspace: WorkspacePartial,
}

async fn build_workspace(state: &AppState, view: &ViewState) -> WorkspacePartial {
    let svg = state.diagram_svg(view).await;

    WorkspacePartial {
        query: view.to_query_string(),
        mode_label: view.mode.label().to_string(),
        sidebar: Sidebar::build(&state.data, view),
        svg: svg.as_str().to_owned(),
        panel: DetailPanel::build(&state.data, view),
    }
}

/// Full page on first load, workspace partial for htmx requests
pub async fn dashboard_page(
    State(state): State<AppState>,
    HxRequest(is_htmx): HxRequest,
    RawQuery(raw): RawQuery,
) -> Result<Response, AppError> {
    let view = state.view_from_query(raw.as_deref());
    tracing::debug!("Dashboard view: {}", view.to_query_string());

    let workspace = build_workspace(&state, &view).await;

    let rendered = if is_htmx {
        workspace.render()
    } else {
        let page = DashboardPage {
            title: state.config.title.clone(),
            description: state.config.description.clone(),
            version: state.config.version.clone(),
            intro_html: view_models::intro_html(),
            help_html: view_models::help_html(),
            footer_html: view_models::footer_html(),
            workspace,
        };
        page.render()
    };
    let html = rendered.map_err(|e| AppError::Template(e.to_string()))?;

    Ok(Html(html).into_response())
}
