//! Research Data Lifecycle Dashboard
//!
//! Renders the MaLDReTH research data lifecycle (stages, connections, tool
//! exemplars) as a circular diagram with three concentric rings, served as a
//! local web dashboard.
//!
//! Pipeline, one full synchronous pass per UI event:
//! - `data/`: JSON document loading with a built-in fallback dataset
//! - `layout/`: polar coordinates for rings, separators and connectors
//! - `render/`: chart shapes filtered by the view, SVG output
//! - `view`: explicit view state and its transitions
//! - `api_server` / `web/`: axum server, JSON API and askama pages

pub mod config;
pub mod data;
pub mod layout;
pub mod render;
pub mod utils;
pub mod view;

#[cfg(feature = "server")]
pub mod api_server;
#[cfg(feature = "server")]
pub mod web;

// Re-export commonly used types
pub use config::AppConfig;
pub use data::{Connection, ConnectionType, DataError, Exemplar, LifecycleData, Stage};
pub use layout::{compute_layout, LayoutConfig, LifecycleLayout, Ring};
pub use render::{render_chart, Chart, RenderConfig, Shape};
pub use view::{Preset, ViewEvent, ViewMode, ViewQuery, ViewState};

#[cfg(feature = "server")]
pub use api_server::{create_router, AppState};

/// Lay out and render the dataset for one view state.
pub fn render_view(
    data: &LifecycleData,
    view: &ViewState,
    layout_config: &LayoutConfig,
    render_config: &RenderConfig,
) -> Chart {
    let layout = compute_layout(data, layout_config, view.category_filter());
    render_chart(&layout, view, render_config)
}
