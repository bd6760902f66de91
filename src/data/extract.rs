//! Lookup helpers over a loaded lifecycle document
//!
//! Grouping of exemplars by stage and category, per-stage counts and
//! dataset-wide totals used by the dashboard panels.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::model::{Exemplar, LifecycleData, Stage};

/// Color used for stages that are not in the dataset
pub const FALLBACK_STAGE_COLOR: &str = "#cccccc";

/// Stage with category and tool counts
#[derive(Debug, Clone, Serialize)]
pub struct StageSummary {
    pub name: String,
    pub description: String,
    pub color: String,
    pub categories_count: usize,
    pub tools_count: usize,
    pub categories: Vec<String>,
}

/// Dataset-wide totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LifecycleStatistics {
    pub total_stages: usize,
    pub total_categories: usize,
    pub total_tools: usize,
    pub total_connections: usize,
}

impl LifecycleData {
    pub fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.name == name)
    }

    pub fn stage_index(&self, name: &str) -> Option<usize> {
        self.stages.iter().position(|s| s.name == name)
    }

    pub fn has_stage(&self, name: &str) -> bool {
        self.stage(name).is_some()
    }

    pub fn stage_color(&self, name: &str) -> &str {
        self.stage(name)
            .map(|s| s.color.as_str())
            .unwrap_or(FALLBACK_STAGE_COLOR)
    }

    pub fn exemplars_for_stage<'a>(&'a self, stage: &'a str) -> impl Iterator<Item = &'a Exemplar> + 'a {
        self.exemplars.iter().filter(move |e| e.stage == stage)
    }

    /// Unique categories of a stage, sorted
    pub fn categories_for_stage(&self, stage: &str) -> Vec<String> {
        self.exemplars_for_stage(stage)
            .map(|e| e.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Exemplars of one category within a stage, dataset order
    pub fn exemplars_in_category<'a>(
        &'a self,
        stage: &'a str,
        category: &'a str,
    ) -> impl Iterator<Item = &'a Exemplar> + 'a {
        self.exemplars
            .iter()
            .filter(move |e| e.stage == stage && e.category == category)
    }

    /// Exemplars keyed by `(stage, category)`
    pub fn tools_by_category(&self) -> FxHashMap<(String, String), Vec<&Exemplar>> {
        let mut grouped: FxHashMap<(String, String), Vec<&Exemplar>> = FxHashMap::default();
        for exemplar in &self.exemplars {
            grouped
                .entry((exemplar.stage.clone(), exemplar.category.clone()))
                .or_default()
                .push(exemplar);
        }
        grouped
    }

    /// Every category across all stages, sorted
    pub fn all_categories(&self) -> Vec<String> {
        self.exemplars
            .iter()
            .map(|e| e.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn stage_summaries(&self) -> Vec<StageSummary> {
        self.stages
            .iter()
            .map(|stage| {
                let categories = self.categories_for_stage(&stage.name);
                StageSummary {
                    name: stage.name.clone(),
                    description: stage.description.clone(),
                    color: stage.color.clone(),
                    categories_count: categories.len(),
                    tools_count: self.exemplars_for_stage(&stage.name).count(),
                    categories,
                }
            })
            .collect()
    }

    pub fn statistics(&self) -> LifecycleStatistics {
        LifecycleStatistics {
            total_stages: self.stages.len(),
            total_categories: self.all_categories().len(),
            total_tools: self.exemplars.len(),
            total_connections: self.connections.len(),
        }
    }
}
