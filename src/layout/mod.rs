//! Layout Engine
//!
//! Assigns polar coordinates to the lifecycle diagram:
//! - Stage ring: every stage gets an equal share of the circle after the
//!   inter-stage gaps are removed, starting at twelve o'clock.
//! - Category ring: a stage's categories split the stage's span equally.
//! - Exemplar ring: a category's tools split the category's span equally.
//! - Radial separators sit in the middle of each inter-stage gap.
//! - Connectors: see `connectors`.

pub mod connectors;
pub mod geometry;

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::data::LifecycleData;
pub use connectors::ConnectorLayout;
pub use geometry::{ArcSpan, CubicBezier, Point};
use geometry::{divide_span, upright_rotation};

/// One of the three concentric bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ring {
    Stages,
    Categories,
    Exemplars,
}

impl Ring {
    pub const ALL: [Ring; 3] = [Ring::Stages, Ring::Categories, Ring::Exemplars];

    pub fn as_str(&self) -> &'static str {
        match self {
            Ring::Stages => "stages",
            Ring::Categories => "categories",
            Ring::Exemplars => "exemplars",
        }
    }
}

/// Radial extent of a ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RingBand {
    pub inner: f64,
    pub outer: f64,
}

impl RingBand {
    pub const fn new(inner: f64, outer: f64) -> Self {
        Self { inner, outer }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutConfig {
    /// Radius of the central disc
    pub core_radius: f64,
    pub stage_ring: RingBand,
    pub category_ring: RingBand,
    pub exemplar_ring: RingBand,
    /// Gap between neighbouring stages (radians)
    pub stage_gap: f64,
    /// Gap between sibling categories / exemplars (radians)
    pub sibling_gap: f64,
    /// Angle of the first stage's leading edge
    pub start_angle: f64,
    /// Outward reach of normal connectors beyond the stage ring
    pub connector_bulge: f64,
    /// Pull of alternative connectors toward the centre (0..=1)
    pub return_curvature: f64,
    pub arrow_size: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            core_radius: 0.2,
            stage_ring: RingBand::new(0.2, 0.42),
            category_ring: RingBand::new(0.5, 0.64),
            exemplar_ring: RingBand::new(0.66, 0.85),
            stage_gap: 0.01,
            sibling_gap: 0.004,
            start_angle: -PI / 2.0,
            connector_bulge: 0.06,
            return_curvature: 0.6,
            arrow_size: 0.025,
        }
    }
}

impl LayoutConfig {
    pub fn band(&self, ring: Ring) -> RingBand {
        match ring {
            Ring::Stages => self.stage_ring,
            Ring::Categories => self.category_ring,
            Ring::Exemplars => self.exemplar_ring,
        }
    }
}

/// Text anchor for an arc label
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub position: Point,
    /// Degrees, clockwise
    pub rotation: f64,
}

impl LabelPlacement {
    fn for_arc(arc: &ArcSpan) -> Self {
        Self {
            position: arc.centroid(),
            rotation: upright_rotation(arc.mid_angle()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExemplarLayout {
    pub stage: String,
    pub category: String,
    pub name: String,
    pub description: String,
    pub arc: ArcSpan,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryLayout {
    pub stage: String,
    pub name: String,
    pub arc: ArcSpan,
    pub label: LabelPlacement,
    pub exemplars: Vec<ExemplarLayout>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageLayout {
    pub index: usize,
    pub name: String,
    pub description: String,
    pub color: String,
    pub arc: ArcSpan,
    pub label: LabelPlacement,
    pub categories: Vec<CategoryLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Separator {
    pub angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

/// Complete placement of one diagram
#[derive(Debug, Clone, Serialize)]
pub struct LifecycleLayout {
    pub core_radius: f64,
    pub stage_span: f64,
    pub stages: Vec<StageLayout>,
    pub separators: Vec<Separator>,
    pub connectors: Vec<ConnectorLayout>,
}

impl LifecycleLayout {
    pub fn stage(&self, name: &str) -> Option<&StageLayout> {
        self.stages.iter().find(|s| s.name == name)
    }

    pub fn categories(&self) -> impl Iterator<Item = &CategoryLayout> {
        self.stages.iter().flat_map(|s| s.categories.iter())
    }

    pub fn exemplars(&self) -> impl Iterator<Item = &ExemplarLayout> {
        self.categories().flat_map(|c| c.exemplars.iter())
    }

    /// Sum of the angular spans of all stage segments
    pub fn total_stage_span(&self) -> f64 {
        self.stages.iter().map(|s| s.arc.span()).sum()
    }
}

/// Compute the diagram layout.
///
/// `category_filter`: when non-empty, only these categories (and their
/// tools) are placed; the remaining ones share the stage span.
pub fn compute_layout(
    data: &LifecycleData,
    config: &LayoutConfig,
    category_filter: Option<&[String]>,
) -> LifecycleLayout {
    let n = data.stages.len();
    if n == 0 {
        return LifecycleLayout {
            core_radius: config.core_radius,
            stage_span: 0.0,
            stages: Vec::new(),
            separators: Vec::new(),
            connectors: Vec::new(),
        };
    }

    let gap = config.stage_gap.clamp(0.0, TAU / n as f64);
    let stage_span = (TAU - n as f64 * gap) / n as f64;
    let filter = category_filter.filter(|f| !f.is_empty());

    let stages: Vec<StageLayout> = data
        .stages
        .iter()
        .enumerate()
        .map(|(index, stage)| {
            let start = config.start_angle + index as f64 * (stage_span + gap);
            let arc = ArcSpan {
                start_angle: start,
                end_angle: start + stage_span,
                inner_radius: config.stage_ring.inner,
                outer_radius: config.stage_ring.outer,
            };

            let categories: Vec<String> = data
                .categories_for_stage(&stage.name)
                .into_iter()
                .filter(|c| filter.map_or(true, |f| f.contains(c)))
                .collect();

            StageLayout {
                index,
                name: stage.name.clone(),
                description: stage.description.clone(),
                color: stage.color.clone(),
                label: LabelPlacement::for_arc(&arc),
                categories: layout_categories(data, &stage.name, &categories, &arc, config),
                arc,
            }
        })
        .collect();

    let separators = stages
        .iter()
        .map(|s| Separator {
            angle: s.arc.start_angle - gap / 2.0,
            inner_radius: config.core_radius,
            outer_radius: config.exemplar_ring.outer,
        })
        .collect();

    let connectors = connectors::route_connectors(&data.connections, &stages, config);

    LifecycleLayout {
        core_radius: config.core_radius,
        stage_span,
        stages,
        separators,
        connectors,
    }
}

fn layout_categories(
    data: &LifecycleData,
    stage: &str,
    categories: &[String],
    stage_arc: &ArcSpan,
    config: &LayoutConfig,
) -> Vec<CategoryLayout> {
    let spans = divide_span(
        stage_arc.start_angle,
        stage_arc.span(),
        categories.len(),
        config.sibling_gap,
    );

    categories
        .iter()
        .zip(spans)
        .map(|(category, (start, end))| {
            let arc = ArcSpan {
                start_angle: start,
                end_angle: end,
                inner_radius: config.category_ring.inner,
                outer_radius: config.category_ring.outer,
            };

            let tools: Vec<_> = data.exemplars_in_category(stage, category).collect();
            let tool_spans = divide_span(start, end - start, tools.len(), config.sibling_gap);

            let exemplars = tools
                .into_iter()
                .zip(tool_spans)
                .map(|(tool, (s, e))| ExemplarLayout {
                    stage: stage.to_string(),
                    category: category.clone(),
                    name: tool.name.clone(),
                    description: tool.description.clone(),
                    arc: ArcSpan {
                        start_angle: s,
                        end_angle: e,
                        inner_radius: config.exemplar_ring.inner,
                        outer_radius: config.exemplar_ring.outer,
                    },
                })
                .collect();

            CategoryLayout {
                stage: stage.to_string(),
                name: category.clone(),
                label: LabelPlacement::for_arc(&arc),
                arc,
                exemplars,
            }
        })
        .collect()
}
