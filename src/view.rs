//! View Controller
//!
//! UI selection state for one render. The state is never held by the server:
//! it travels in the request query string, is rebuilt per request, and is
//! passed explicitly into layout and rendering. Transitions are pure.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::data::{ConnectionType, LifecycleData};
use crate::layout::Ring;

/// Number of categories preselected when entering Compare Tools
const DEFAULT_COMPARE_CATEGORIES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    CompleteLifecycle,
    FocusOnStage,
    CompareTools,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [
        ViewMode::CompleteLifecycle,
        ViewMode::FocusOnStage,
        ViewMode::CompareTools,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::CompleteLifecycle => "Complete Lifecycle",
            ViewMode::FocusOnStage => "Focus on Stage",
            ViewMode::CompareTools => "Compare Tools",
        }
    }

    /// Query string value
    pub fn slug(&self) -> &'static str {
        match self {
            ViewMode::CompleteLifecycle => "complete_lifecycle",
            ViewMode::FocusOnStage => "focus_on_stage",
            ViewMode::CompareTools => "compare_tools",
        }
    }

    /// Accepts either the slug or the display label
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.slug() == value || m.label().eq_ignore_ascii_case(value))
    }
}

/// Quick-control buttons above the diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    ShowAllLevels,
    StagesAndSubstages,
    StagesOnly,
}

impl Preset {
    pub const ALL: [Preset; 3] = [
        Preset::ShowAllLevels,
        Preset::StagesAndSubstages,
        Preset::StagesOnly,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Preset::ShowAllLevels => "Show All Levels",
            Preset::StagesAndSubstages => "Show Stages & Substages",
            Preset::StagesOnly => "Show Stages Only",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Preset::ShowAllLevels => "show_all_levels",
            Preset::StagesAndSubstages => "stages_and_substages",
            Preset::StagesOnly => "stages_only",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.slug() == value.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingVisibility {
    pub stages: bool,
    pub categories: bool,
    pub exemplars: bool,
}

impl Default for RingVisibility {
    fn default() -> Self {
        Self {
            stages: true,
            categories: true,
            exemplars: false,
        }
    }
}

impl RingVisibility {
    pub fn is_visible(&self, ring: Ring) -> bool {
        match ring {
            Ring::Stages => self.stages,
            Ring::Categories => self.categories,
            Ring::Exemplars => self.exemplars,
        }
    }

    pub fn set(&mut self, ring: Ring, visible: bool) {
        match ring {
            Ring::Stages => self.stages = visible,
            Ring::Categories => self.categories = visible,
            Ring::Exemplars => self.exemplars = visible,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub mode: ViewMode,
    pub selected_stage: Option<String>,
    pub selected_categories: Vec<String>,
    pub rings: RingVisibility,
    pub show_connections: bool,
    pub connection_types: Vec<ConnectionType>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: ViewMode::default(),
            selected_stage: None,
            selected_categories: Vec::new(),
            rings: RingVisibility::default(),
            show_connections: true,
            connection_types: ConnectionType::ALL.to_vec(),
        }
    }
}

/// UI events that change the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    SetMode(ViewMode),
    /// Stage picked in the selector or clicked on the diagram; switches to focus mode
    SelectStage(String),
    SetCategories(Vec<String>),
    SetRing(Ring, bool),
    SetConnections(bool),
    SetConnectionTypes(Vec<ConnectionType>),
    Preset(Preset),
    Reset,
}

impl ViewState {
    /// Apply one event and return the resulting state.
    pub fn apply(mut self, event: ViewEvent, data: &LifecycleData) -> Self {
        match event {
            ViewEvent::SetMode(mode) => {
                let entering_compare =
                    mode == ViewMode::CompareTools && self.mode != ViewMode::CompareTools;
                self.mode = mode;
                if entering_compare && self.selected_categories.is_empty() {
                    self.selected_categories = default_compare_categories(data);
                }
            }
            ViewEvent::SelectStage(stage) => {
                if data.has_stage(&stage) {
                    self.mode = ViewMode::FocusOnStage;
                    self.selected_stage = Some(stage);
                } else {
                    tracing::debug!("Ignoring selection of unknown stage '{}'", stage);
                }
            }
            ViewEvent::SetCategories(categories) => {
                let known = data.all_categories();
                self.selected_categories = categories
                    .into_iter()
                    .filter(|c| known.contains(c))
                    .collect();
            }
            ViewEvent::SetRing(ring, visible) => self.rings.set(ring, visible),
            ViewEvent::SetConnections(show) => self.show_connections = show,
            ViewEvent::SetConnectionTypes(mut types) => {
                types.sort_by_key(|t| *t as u8);
                types.dedup();
                self.connection_types = types;
            }
            ViewEvent::Preset(preset) => {
                self.show_connections = true;
                self.rings.stages = true;
                match preset {
                    Preset::ShowAllLevels => {
                        self.rings.categories = true;
                        self.rings.exemplars = true;
                    }
                    Preset::StagesAndSubstages => {
                        self.rings.categories = true;
                        self.rings.exemplars = false;
                    }
                    Preset::StagesOnly => {
                        self.rings.categories = false;
                        self.rings.exemplars = false;
                    }
                }
            }
            ViewEvent::Reset => return ViewState::default(),
        }
        self.normalized(data)
    }

    /// Fill in selections the current mode needs and drop the ones it doesn't.
    ///
    /// Focus without a stage picks the first stage. An empty Compare
    /// selection stays empty and leaves the diagram unfiltered.
    pub fn normalized(mut self, data: &LifecycleData) -> Self {
        match self.mode {
            ViewMode::CompleteLifecycle => {
                self.selected_stage = None;
                self.selected_categories.clear();
            }
            ViewMode::FocusOnStage => {
                let valid = self
                    .selected_stage
                    .as_deref()
                    .is_some_and(|s| data.has_stage(s));
                if !valid {
                    self.selected_stage = data.stages.first().map(|s| s.name.clone());
                }
                self.selected_categories.clear();
            }
            ViewMode::CompareTools => {
                self.selected_stage = None;
            }
        }
        self
    }

    /// Stage whose categories and tools are the only ones drawn
    pub fn focused_stage(&self) -> Option<&str> {
        match self.mode {
            ViewMode::FocusOnStage => self.selected_stage.as_deref(),
            _ => None,
        }
    }

    /// Categories the layout is restricted to
    pub fn category_filter(&self) -> Option<&[String]> {
        match self.mode {
            ViewMode::CompareTools if !self.selected_categories.is_empty() => {
                Some(&self.selected_categories)
            }
            _ => None,
        }
    }

    pub fn shows_connection(&self, kind: ConnectionType) -> bool {
        self.show_connections && self.connection_types.contains(&kind)
    }

    /// Build the state described by a request query, then apply its
    /// `preset`, `reset` and `focus` actions.
    pub fn from_query(query: &ViewQuery, data: &LifecycleData) -> Self {
        let mut state = ViewState::default();

        if let Some(mode) = query.last("mode").and_then(ViewMode::parse) {
            state.mode = mode;
        }
        state.selected_stage = query
            .last("stage")
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        state.selected_categories = query
            .all("category")
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        // No `category` key at all means the request is entering Compare Tools;
        // an explicit empty `category=` keeps the selection cleared.
        if state.mode == ViewMode::CompareTools && !query.contains("category") {
            state.selected_categories = default_compare_categories(data);
        }

        for ring in Ring::ALL {
            if let Some(visible) = query.flag(&format!("show_{}", ring.as_str())) {
                state.rings.set(ring, visible);
            }
        }
        if let Some(show) = query.flag("show_connections") {
            state.show_connections = show;
        }
        if query.contains("connection_type") {
            state.connection_types = query
                .all("connection_type")
                .filter_map(ConnectionType::parse)
                .collect();
        }

        let mut state = state.normalized(data);

        if query.flag("reset") == Some(true) {
            state = state.apply(ViewEvent::Reset, data);
        }
        if let Some(preset) = query.last("preset").and_then(Preset::parse) {
            state = state.apply(ViewEvent::Preset(preset), data);
        }
        if let Some(stage) = query.last("focus").filter(|s| !s.is_empty()) {
            state = state.apply(ViewEvent::SelectStage(stage.to_string()), data);
        }
        state
    }

    /// Canonical query string for this state (stable key order)
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, String)> = vec![("mode", self.mode.slug().to_string())];

        if let Some(stage) = &self.selected_stage {
            pairs.push(("stage", stage.clone()));
        }
        if self.mode == ViewMode::CompareTools && self.selected_categories.is_empty() {
            pairs.push(("category", String::new()));
        }
        for category in &self.selected_categories {
            pairs.push(("category", category.clone()));
        }
        for ring in Ring::ALL {
            pairs.push((
                match ring {
                    Ring::Stages => "show_stages",
                    Ring::Categories => "show_categories",
                    Ring::Exemplars => "show_exemplars",
                },
                bool_param(self.rings.is_visible(ring)),
            ));
        }
        pairs.push(("show_connections", bool_param(self.show_connections)));
        if self.connection_types.is_empty() {
            pairs.push(("connection_type", String::new()));
        }
        for kind in &self.connection_types {
            pairs.push(("connection_type", kind.as_str().to_string()));
        }

        pairs
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(&v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn default_compare_categories(data: &LifecycleData) -> Vec<String> {
    data.all_categories()
        .into_iter()
        .take(DEFAULT_COMPARE_CATEGORIES)
        .collect()
}

fn bool_param(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

/// Decoded query string that keeps repeated keys in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pairs: Vec<(String, String)>,
}

impl ViewQuery {
    /// Parse an `application/x-www-form-urlencoded` query (without the leading `?`).
    pub fn parse(raw: &str) -> Self {
        let pairs = form_urlencoded::parse(raw.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { pairs }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Last value for `key`; later values override earlier ones
    pub fn last(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Boolean parameter; forms send a hidden `0` before the checkbox's `1`.
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.last(key)?.to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => Some(true),
            "0" | "false" | "off" | "no" => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> LifecycleData {
        LifecycleData::default_dataset()
    }

    #[test]
    fn test_defaults_match_dashboard_controls() {
        let state = ViewState::default();
        assert_eq!(state.mode, ViewMode::CompleteLifecycle);
        assert!(state.rings.stages && state.rings.categories && !state.rings.exemplars);
        assert!(state.shows_connection(ConnectionType::Normal));
        assert!(state.shows_connection(ConnectionType::Alternative));
    }

    #[test]
    fn test_focus_without_stage_picks_first() {
        let state = ViewState::default().apply(ViewEvent::SetMode(ViewMode::FocusOnStage), &data());
        assert_eq!(state.selected_stage.as_deref(), Some("Conceptualise"));
        assert_eq!(state.focused_stage(), Some("Conceptualise"));
    }

    #[test]
    fn test_select_stage_switches_to_focus() {
        let state = ViewState::default().apply(ViewEvent::SelectStage("Store".to_string()), &data());
        assert_eq!(state.mode, ViewMode::FocusOnStage);
        assert_eq!(state.focused_stage(), Some("Store"));

        let unchanged = ViewState::default().apply(ViewEvent::SelectStage("Nope".to_string()), &data());
        assert_eq!(unchanged, ViewState::default());
    }

    #[test]
    fn test_compare_defaults_to_first_three_categories() {
        let data = data();
        let state = ViewState::default().apply(ViewEvent::SetMode(ViewMode::CompareTools), &data);
        let expected: Vec<String> = data.all_categories().into_iter().take(3).collect();
        assert_eq!(state.selected_categories, expected);
        assert_eq!(state.category_filter(), Some(expected.as_slice()));
        assert_eq!(state.focused_stage(), None);
    }

    #[test]
    fn test_compare_selection_can_be_cleared() {
        let d = data();
        let state = ViewState::default()
            .apply(ViewEvent::SetMode(ViewMode::CompareTools), &d)
            .apply(ViewEvent::SetCategories(vec!["Database".to_string()]), &d)
            .apply(ViewEvent::SetCategories(vec![]), &d);

        assert_eq!(state.mode, ViewMode::CompareTools);
        assert!(state.selected_categories.is_empty());
        assert_eq!(state.category_filter(), None);

        // Re-selecting the mode it is already in keeps the empty selection
        let again = state.apply(ViewEvent::SetMode(ViewMode::CompareTools), &d);
        assert!(again.selected_categories.is_empty());
    }

    #[test]
    fn test_query_compare_defaults_only_without_category_key() {
        let d = data();
        let entering = ViewState::from_query(&ViewQuery::parse("mode=compare_tools"), &d);
        assert_eq!(entering.selected_categories.len(), 3);

        let cleared = ViewState::from_query(&ViewQuery::parse("mode=compare_tools&category="), &d);
        assert!(cleared.selected_categories.is_empty());

        let raw = cleared.to_query_string();
        assert!(raw.contains("category=&"));
        assert_eq!(ViewState::from_query(&ViewQuery::parse(&raw), &d), cleared);
    }

    #[test]
    fn test_query_decoding() {
        let query = ViewQuery::parse("stage=Data+Store&category=A%26B&flag&category=%E2%9C%93");
        assert_eq!(query.last("stage"), Some("Data Store"));
        assert_eq!(query.all("category").collect::<Vec<_>>(), vec!["A&B", "✓"]);
        assert!(query.contains("flag"));
        assert_eq!(query.last("flag"), Some(""));
        assert_eq!(query.last("missing"), None);
    }

    #[test]
    fn test_set_categories_drops_unknown() {
        let state = ViewState::default()
            .apply(ViewEvent::SetMode(ViewMode::CompareTools), &data())
            .apply(
                ViewEvent::SetCategories(vec!["Database".to_string(), "Astrology".to_string()]),
                &data(),
            );
        assert_eq!(state.selected_categories, vec!["Database".to_string()]);
    }

    #[test]
    fn test_leaving_focus_clears_selection() {
        let state = ViewState::default()
            .apply(ViewEvent::SelectStage("Plan".to_string()), &data())
            .apply(ViewEvent::SetMode(ViewMode::CompleteLifecycle), &data());
        assert_eq!(state.selected_stage, None);
    }

    #[test]
    fn test_presets_and_reset() {
        let d = data();
        let all = ViewState::default().apply(ViewEvent::Preset(Preset::ShowAllLevels), &d);
        assert!(all.rings.categories && all.rings.exemplars);

        let stages_only = all
            .clone()
            .apply(ViewEvent::SetConnections(false), &d)
            .apply(ViewEvent::Preset(Preset::StagesOnly), &d);
        assert!(stages_only.rings.stages);
        assert!(!stages_only.rings.categories && !stages_only.rings.exemplars);
        assert!(stages_only.show_connections);

        let reset = stages_only
            .apply(ViewEvent::SelectStage("Fund".to_string()), &d)
            .apply(ViewEvent::Reset, &d);
        assert_eq!(reset, ViewState::default());
    }

    #[test]
    fn test_connection_types_toggle() {
        let state = ViewState::default().apply(
            ViewEvent::SetConnectionTypes(vec![ConnectionType::Alternative, ConnectionType::Alternative]),
            &data(),
        );
        assert_eq!(state.connection_types, vec![ConnectionType::Alternative]);
        assert!(!state.shows_connection(ConnectionType::Normal));

        let hidden = state.apply(ViewEvent::SetConnections(false), &data());
        assert!(!hidden.shows_connection(ConnectionType::Alternative));
    }

    #[test]
    fn test_query_parsing_repeated_keys_and_hidden_flags() {
        let query = ViewQuery::parse(
            "mode=compare_tools&category=Database&category=ETL+Tools&show_exemplars=0&show_exemplars=1&connection_type=",
        );
        let state = ViewState::from_query(&query, &data());

        assert_eq!(state.mode, ViewMode::CompareTools);
        assert_eq!(state.selected_categories, vec!["Database", "ETL Tools"]);
        assert!(state.rings.exemplars);
        assert!(state.connection_types.is_empty());
    }

    #[test]
    fn test_query_focus_action() {
        let query = ViewQuery::parse("focus=Publish");
        let state = ViewState::from_query(&query, &data());
        assert_eq!(state.focused_stage(), Some("Publish"));
    }

    #[test]
    fn test_query_string_round_trip() {
        let d = data();
        let state = ViewState::default()
            .apply(ViewEvent::SetMode(ViewMode::CompareTools), &d)
            .apply(
                ViewEvent::SetCategories(vec!["Combined DMP/Project".to_string()]),
                &d,
            )
            .apply(ViewEvent::SetRing(Ring::Stages, false), &d);

        let raw = state.to_query_string();
        assert!(raw.contains("category=Combined%20DMP%2FProject"));

        let parsed = ViewState::from_query(&ViewQuery::parse(&raw), &d);
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_mode_parse_accepts_labels() {
        assert_eq!(ViewMode::parse("Focus on Stage"), Some(ViewMode::FocusOnStage));
        assert_eq!(ViewMode::parse("compare_tools"), Some(ViewMode::CompareTools));
        assert_eq!(ViewMode::parse("zoom"), None);
    }
}
