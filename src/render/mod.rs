//! Renderer
//!
//! Turns a computed layout into a `Chart`: an ordered list of drawable
//! shapes (ring sectors, separators, connectors, labels) filtered by the
//! current view. `svg` serialises a chart for the browser.
//!
//! Draw order: core disc, stage ring, category ring, exemplar ring,
//! separators, connectors, labels, core title.

pub mod svg;

use serde::Serialize;

use crate::data::ConnectionType;
use crate::layout::{ArcSpan, CubicBezier, LifecycleLayout, Point, Ring, StageLayout};
use crate::utils::{lighten_hex, truncate_label};
use crate::view::ViewState;

#[derive(Debug, Clone, Serialize)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub stage_opacity: f64,
    /// Opacity of stages outside the focused one
    pub dimmed_opacity: f64,
    pub category_opacity: f64,
    pub exemplar_opacity: f64,
    pub category_lighten: f64,
    pub exemplar_lighten: f64,
    pub core_fill: String,
    pub core_stroke: String,
    pub separator_color: String,
    pub connector_color: String,
    pub connector_width: f64,
    pub label_color: String,
    pub stage_font_size: f64,
    pub category_font_size: f64,
    pub exemplar_font_size: f64,
    pub title_font_size: f64,
    pub category_label_chars: usize,
    pub exemplar_label_chars: usize,
    /// Arcs narrower than this (radians) get no label, only a tooltip
    pub min_label_span: f64,
    pub title_lines: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            stage_opacity: 0.8,
            dimmed_opacity: 0.3,
            category_opacity: 0.75,
            exemplar_opacity: 0.7,
            category_lighten: 0.2,
            exemplar_lighten: 0.4,
            core_fill: "#f0f0f0".to_string(),
            core_stroke: "#cccccc".to_string(),
            separator_color: "#ffffff".to_string(),
            connector_color: "#555555".to_string(),
            connector_width: 1.5,
            label_color: "#333333".to_string(),
            stage_font_size: 12.0,
            category_font_size: 8.0,
            exemplar_font_size: 6.5,
            title_font_size: 14.0,
            category_label_chars: 16,
            exemplar_label_chars: 12,
            min_label_span: 0.06,
            title_lines: vec![
                "Research".to_string(),
                "Data".to_string(),
                "Lifecycle".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Disc {
        radius: f64,
        fill: String,
        stroke: String,
    },
    Sector {
        ring: Ring,
        stage: String,
        category: Option<String>,
        name: String,
        arc: ArcSpan,
        fill: String,
        opacity: f64,
        tooltip: String,
    },
    Separator {
        angle: f64,
        inner_radius: f64,
        outer_radius: f64,
        color: String,
    },
    Connector {
        from: String,
        to: String,
        kind: ConnectionType,
        dashed: bool,
        curve: CubicBezier,
        arrowhead: [Point; 3],
        color: String,
        width: f64,
    },
    Label {
        ring: Ring,
        text: String,
        position: Point,
        rotation: f64,
        font_size: f64,
        color: String,
    },
    Title {
        lines: Vec<String>,
        font_size: f64,
        color: String,
    },
}

impl Shape {
    /// Ring a shape belongs to; `None` for shapes outside the rings
    pub fn ring(&self) -> Option<Ring> {
        match self {
            Shape::Sector { ring, .. } | Shape::Label { ring, .. } => Some(*ring),
            _ => None,
        }
    }
}

/// Drawable output of one render
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub shapes: Vec<Shape>,
}

impl Chart {
    pub fn shapes_in_ring(&self, ring: Ring) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(move |s| s.ring() == Some(ring))
    }

    /// `(ring, stage, category, name)` of every sector
    pub fn sectors(&self) -> impl Iterator<Item = (Ring, &str, Option<&str>, &str)> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Sector {
                ring,
                stage,
                category,
                name,
                ..
            } => Some((*ring, stage.as_str(), category.as_deref(), name.as_str())),
            _ => None,
        })
    }

    /// `(from, to, dashed)` of every connector
    pub fn connectors(&self) -> impl Iterator<Item = (&str, &str, bool)> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Connector { from, to, dashed, .. } => Some((from.as_str(), to.as_str(), *dashed)),
            _ => None,
        })
    }
}

/// Render a layout under the given view state.
pub fn render_chart(
    layout: &LifecycleLayout,
    view: &ViewState,
    config: &RenderConfig,
) -> Chart {
    let mut shapes = Vec::new();
    let mut labels = Vec::new();
    let focused = view.focused_stage();

    shapes.push(Shape::Disc {
        radius: layout.core_radius,
        fill: config.core_fill.clone(),
        stroke: config.core_stroke.clone(),
    });

    if view.rings.stages {
        for stage in &layout.stages {
            let opacity = match focused {
                Some(name) if name != stage.name => config.dimmed_opacity,
                _ => config.stage_opacity,
            };
            shapes.push(Shape::Sector {
                ring: Ring::Stages,
                stage: stage.name.clone(),
                category: None,
                name: stage.name.clone(),
                arc: stage.arc,
                fill: stage.color.clone(),
                opacity,
                tooltip: format!("{}\n{}", stage.name, stage.description),
            });
            labels.push(Shape::Label {
                ring: Ring::Stages,
                text: stage.name.clone(),
                position: stage.label.position,
                rotation: stage.label.rotation,
                font_size: config.stage_font_size,
                color: config.label_color.clone(),
            });
        }
    }

    // Stages whose inner rings are drawn
    let expanded: Vec<&StageLayout> = layout
        .stages
        .iter()
        .filter(|s| focused.map_or(true, |name| name == s.name))
        .collect();

    if view.rings.categories {
        for stage in &expanded {
            let fill = lighten_hex(&stage.color, config.category_lighten);
            for category in &stage.categories {
                shapes.push(Shape::Sector {
                    ring: Ring::Categories,
                    stage: stage.name.clone(),
                    category: Some(category.name.clone()),
                    name: category.name.clone(),
                    arc: category.arc,
                    fill: fill.clone(),
                    opacity: config.category_opacity,
                    tooltip: format!(
                        "{}\n{} · {} tools",
                        category.name,
                        stage.name,
                        category.exemplars.len()
                    ),
                });
                if category.arc.span() >= config.min_label_span {
                    labels.push(Shape::Label {
                        ring: Ring::Categories,
                        text: truncate_label(&category.name, config.category_label_chars),
                        position: category.label.position,
                        rotation: category.label.rotation,
                        font_size: config.category_font_size,
                        color: config.label_color.clone(),
                    });
                }
            }
        }
    }

    if view.rings.exemplars {
        for stage in &expanded {
            let fill = lighten_hex(&stage.color, config.exemplar_lighten);
            for tool in stage.categories.iter().flat_map(|c| c.exemplars.iter()) {
                shapes.push(Shape::Sector {
                    ring: Ring::Exemplars,
                    stage: stage.name.clone(),
                    category: Some(tool.category.clone()),
                    name: tool.name.clone(),
                    arc: tool.arc,
                    fill: fill.clone(),
                    opacity: config.exemplar_opacity,
                    tooltip: format!("{}\n{}\n{}", tool.name, tool.category, tool.description),
                });
                if tool.arc.span() >= config.min_label_span {
                    labels.push(Shape::Label {
                        ring: Ring::Exemplars,
                        text: truncate_label(&tool.name, config.exemplar_label_chars),
                        position: tool.arc.centroid(),
                        rotation: crate::layout::geometry::upright_rotation(tool.arc.mid_angle()),
                        font_size: config.exemplar_font_size,
                        color: config.label_color.clone(),
                    });
                }
            }
        }
    }

    if let Some(outer) = outermost_visible_radius(layout, view) {
        for sep in &layout.separators {
            shapes.push(Shape::Separator {
                angle: sep.angle,
                inner_radius: sep.inner_radius,
                outer_radius: outer,
                color: config.separator_color.clone(),
            });
        }
    }

    for conn in &layout.connectors {
        if !view.shows_connection(conn.kind) {
            continue;
        }
        shapes.push(Shape::Connector {
            from: conn.from.clone(),
            to: conn.to.clone(),
            kind: conn.kind,
            dashed: conn.is_dashed(),
            curve: conn.curve,
            arrowhead: conn.arrowhead,
            color: config.connector_color.clone(),
            width: config.connector_width,
        });
    }

    shapes.extend(labels);
    shapes.push(Shape::Title {
        lines: config.title_lines.clone(),
        font_size: config.title_font_size,
        color: config.label_color.clone(),
    });

    Chart {
        width: config.width,
        height: config.height,
        title: config.title_lines.join(" "),
        shapes,
    }
}

fn outermost_visible_radius(layout: &LifecycleLayout, view: &ViewState) -> Option<f64> {
    let first = layout.stages.first()?;
    let mut outer = None;
    if view.rings.stages {
        outer = Some(first.arc.outer_radius);
    }
    if view.rings.categories {
        if let Some(c) = layout.categories().next() {
            outer = Some(c.arc.outer_radius);
        }
    }
    if view.rings.exemplars {
        if let Some(e) = layout.exemplars().next() {
            outer = Some(e.arc.outer_radius);
        }
    }
    outer
}
