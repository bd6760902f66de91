// View models for the dashboard templates
//
// Everything the page shows is derived here from the dataset and the current
// view state, so templates only loop and print.

use pulldown_cmark::{html, Options, Parser};
use rustc_hash::FxHashMap;

use crate::data::{ConnectionType, Exemplar, LifecycleData, LifecycleStatistics};
use crate::layout::Ring;
use crate::view::{Preset, ViewMode, ViewState};

const INTRO_MARKDOWN: &str = "\
This visualization shows the MaLDReTH Research Data Lifecycle with a three-level structure:

- **Inner Ring**: Lifecycle Stages
- **Middle Ring**: Tool Categories/Substages
- **Outer Ring**: Tool Exemplars

Use the controls to explore the lifecycle and learn about the various tools available at each stage.
";

const HELP_MARKDOWN: &str = "\
### Three-Level Structure

This visualization uses a concentric circle layout with three levels, separated by white space for clarity:

1. **Inner Ring (Center)**: Research Data Lifecycle Stages
    - These are the main phases of the research data lifecycle
    - Color-coded for easy identification
2. **Middle Ring**: Tool Categories/Substages
    - These are categories of tools used in each stage
    - Colored to match their parent stage
3. **Outer Ring**: Tool Exemplars
    - Specific tools that belong to each category
    - Colored to match their parent category and stage

### Interactivity

- **Hover** over any segment to see details
- **Click** a stage to focus on it
- Use the **Focus on Stage** mode to zoom in on a specific stage
- Use the **Compare Tools** mode to compare tools across different categories
- Use the buttons above the diagram to quickly change what's displayed

### Connections

- **Solid lines** show the normal flow between stages
- **Dashed lines** show alternative connections or feedback loops
";

const FOOTER_MARKDOWN: &str = "\
*This visualization is based on the MaLDReTH Research Data Lifecycle model. \
Data sourced from the RDA-OfR Mapping the Landscape of Digital Research Tools Working Group.*
";

/// Render trusted markdown to HTML
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, parser);
    out
}

pub fn intro_html() -> String {
    markdown_to_html(INTRO_MARKDOWN)
}

pub fn help_html() -> String {
    markdown_to_html(HELP_MARKDOWN)
}

pub fn footer_html() -> String {
    markdown_to_html(FOOTER_MARKDOWN)
}

// ============================================================================
// Sidebar controls
// ============================================================================

#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct Toggle {
    pub name: String,
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone)]
pub struct PresetButton {
    pub slug: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone)]
pub struct Sidebar {
    pub modes: Vec<SelectOption>,
    pub show_stage_select: bool,
    pub stages: Vec<SelectOption>,
    pub show_category_select: bool,
    pub categories: Vec<SelectOption>,
    pub rings: Vec<Toggle>,
    pub show_connections: bool,
    pub connection_types: Vec<Toggle>,
    pub presets: Vec<PresetButton>,
}

impl Sidebar {
    pub fn build(data: &LifecycleData, view: &ViewState) -> Self {
        let modes = ViewMode::ALL
            .iter()
            .map(|m| SelectOption {
                value: m.slug().to_string(),
                label: m.label().to_string(),
                selected: *m == view.mode,
            })
            .collect();

        let stages = data
            .stages
            .iter()
            .map(|s| SelectOption {
                value: s.name.clone(),
                label: s.name.clone(),
                selected: view.selected_stage.as_deref() == Some(s.name.as_str()),
            })
            .collect();

        let categories = data
            .all_categories()
            .into_iter()
            .map(|c| SelectOption {
                selected: view.selected_categories.contains(&c),
                label: c.clone(),
                value: c,
            })
            .collect();

        let rings = Ring::ALL
            .iter()
            .map(|ring| Toggle {
                name: format!("show_{}", ring.as_str()),
                label: match ring {
                    Ring::Stages => "Show Stages",
                    Ring::Categories => "Show Substages",
                    Ring::Exemplars => "Show Tools",
                }
                .to_string(),
                checked: view.rings.is_visible(*ring),
            })
            .collect();

        let connection_types = ConnectionType::ALL
            .iter()
            .map(|kind| Toggle {
                name: kind.as_str().to_string(),
                label: match kind {
                    ConnectionType::Normal => "Normal",
                    ConnectionType::Alternative => "Alternative",
                }
                .to_string(),
                checked: view.connection_types.contains(kind),
            })
            .collect();

        let presets = Preset::ALL
            .iter()
            .map(|p| PresetButton {
                slug: p.slug(),
                label: p.label(),
            })
            .collect();

        Self {
            modes,
            show_stage_select: view.mode == ViewMode::FocusOnStage,
            stages,
            show_category_select: view.mode == ViewMode::CompareTools,
            categories,
            rings,
            show_connections: view.show_connections,
            connection_types,
            presets,
        }
    }
}

// ============================================================================
// Detail panels
// ============================================================================

#[derive(Debug, Clone)]
pub struct ToolRow {
    pub name: String,
    pub stage: String,
    pub description: String,
}

impl ToolRow {
    fn from_exemplar(exemplar: &Exemplar) -> Self {
        Self {
            name: exemplar.name.clone(),
            stage: exemplar.stage.clone(),
            description: exemplar.description.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToolTable {
    pub category: String,
    pub tools: Vec<ToolRow>,
}

#[derive(Debug, Clone)]
pub struct CountRow {
    pub label: String,
    pub count: usize,
    /// Bar width relative to the largest count, 0..=100
    pub percent: usize,
}

fn count_rows(mut counts: Vec<(String, usize)>) -> Vec<CountRow> {
    // Largest first, ties by name
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    let max = counts.first().map(|(_, c)| *c).unwrap_or(0).max(1);
    counts
        .into_iter()
        .map(|(label, count)| CountRow {
            label,
            count,
            percent: count * 100 / max,
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct StageDetails {
    pub name: String,
    pub description: String,
    pub color: String,
    pub categories: Vec<ToolTable>,
}

impl StageDetails {
    pub fn build(data: &LifecycleData, stage_name: &str) -> Option<Self> {
        let stage = data.stage(stage_name)?;

        // Categories in first-seen order, as listed in the dataset
        let mut categories: Vec<ToolTable> = Vec::new();
        for exemplar in data.exemplars_for_stage(stage_name) {
            match categories.iter_mut().find(|t| t.category == exemplar.category) {
                Some(table) => table.tools.push(ToolRow::from_exemplar(exemplar)),
                None => categories.push(ToolTable {
                    category: exemplar.category.clone(),
                    tools: vec![ToolRow::from_exemplar(exemplar)],
                }),
            }
        }

        Some(Self {
            name: stage.name.clone(),
            description: stage.description.clone(),
            color: stage.color.clone(),
            categories,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CompareDetails {
    pub tables: Vec<ToolTable>,
    pub total_tools: usize,
    pub stages_covered: usize,
    pub per_category: Vec<CountRow>,
    pub per_stage: Vec<CountRow>,
}

impl CompareDetails {
    pub fn build(data: &LifecycleData, categories: &[String]) -> Self {
        let selected: Vec<&Exemplar> = data
            .exemplars
            .iter()
            .filter(|e| categories.contains(&e.category))
            .collect();

        let tables = categories
            .iter()
            .filter_map(|category| {
                let mut tools: Vec<ToolRow> = selected
                    .iter()
                    .filter(|e| &e.category == category)
                    .map(|e| ToolRow::from_exemplar(e))
                    .collect();
                if tools.is_empty() {
                    return None;
                }
                // Stable sort keeps dataset order within a stage
                tools.sort_by(|a, b| a.stage.cmp(&b.stage));
                Some(ToolTable {
                    category: category.clone(),
                    tools,
                })
            })
            .collect();

        let mut by_category: FxHashMap<&str, usize> = FxHashMap::default();
        let mut by_stage: FxHashMap<&str, usize> = FxHashMap::default();
        for exemplar in &selected {
            *by_category.entry(exemplar.category.as_str()).or_default() += 1;
            *by_stage.entry(exemplar.stage.as_str()).or_default() += 1;
        }

        let owned = |m: FxHashMap<&str, usize>| -> Vec<(String, usize)> {
            m.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
        };

        Self {
            tables,
            total_tools: selected.len(),
            stages_covered: by_stage.len(),
            per_category: count_rows(owned(by_category)),
            per_stage: count_rows(owned(by_stage)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StageRow {
    pub name: String,
    pub description: String,
    pub color: String,
    pub categories_count: usize,
    pub tools_count: usize,
    /// Query string that focuses this stage
    pub focus_query: String,
}

#[derive(Debug, Clone)]
pub struct OverviewDetails {
    pub stages: Vec<StageRow>,
    pub statistics: LifecycleStatistics,
}

impl OverviewDetails {
    pub fn build(data: &LifecycleData, view: &ViewState) -> Self {
        let stages = data
            .stage_summaries()
            .into_iter()
            .map(|s| {
                let mut focus = view.clone();
                focus.mode = ViewMode::FocusOnStage;
                focus.selected_stage = Some(s.name.clone());
                StageRow {
                    focus_query: focus.to_query_string(),
                    name: s.name,
                    description: s.description,
                    color: s.color,
                    categories_count: s.categories_count,
                    tools_count: s.tools_count,
                }
            })
            .collect();

        Self {
            stages,
            statistics: data.statistics(),
        }
    }
}

/// Mode-dependent section below the diagram
#[derive(Debug, Clone)]
pub enum DetailPanel {
    Stage(StageDetails),
    Compare(CompareDetails),
    Overview(OverviewDetails),
}

impl DetailPanel {
    pub fn build(data: &LifecycleData, view: &ViewState) -> Self {
        match view.mode {
            ViewMode::FocusOnStage => view
                .focused_stage()
                .and_then(|stage| StageDetails::build(data, stage))
                .map(DetailPanel::Stage)
                .unwrap_or_else(|| DetailPanel::Overview(OverviewDetails::build(data, view))),
            ViewMode::CompareTools if !view.selected_categories.is_empty() => {
                DetailPanel::Compare(CompareDetails::build(data, &view.selected_categories))
            }
            _ => DetailPanel::Overview(OverviewDetails::build(data, view)),
        }
    }
}
