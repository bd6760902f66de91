//! Reference checks for a lifecycle document
//!
//! Reported at startup; never used to reject a document.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::Serialize;

use super::model::LifecycleData;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    DuplicateStage { name: String },
    DanglingConnection { from: String, to: String, missing: String },
    DanglingExemplar { name: String, stage: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::DuplicateStage { name } => {
                write!(f, "stage '{}' is defined more than once", name)
            }
            ValidationIssue::DanglingConnection { from, to, missing } => {
                write!(f, "connection {} -> {} references unknown stage '{}'", from, to, missing)
            }
            ValidationIssue::DanglingExemplar { name, stage } => {
                write!(f, "exemplar '{}' references unknown stage '{}'", name, stage)
            }
        }
    }
}

impl LifecycleData {
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let mut seen = FxHashSet::default();

        for stage in &self.stages {
            if !seen.insert(stage.name.as_str()) {
                issues.push(ValidationIssue::DuplicateStage {
                    name: stage.name.clone(),
                });
            }
        }

        for conn in &self.connections {
            for endpoint in [&conn.from, &conn.to] {
                if !seen.contains(endpoint.as_str()) {
                    issues.push(ValidationIssue::DanglingConnection {
                        from: conn.from.clone(),
                        to: conn.to.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
        }

        for exemplar in &self.exemplars {
            if !seen.contains(exemplar.stage.as_str()) {
                issues.push(ValidationIssue::DanglingExemplar {
                    name: exemplar.name.clone(),
                    stage: exemplar.stage.clone(),
                });
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Connection, ConnectionType, Exemplar, Stage};

    #[test]
    fn test_default_dataset_is_consistent() {
        let data = LifecycleData::default_dataset();
        assert!(data.validate().is_empty());

        for conn in &data.connections {
            assert!(data.has_stage(&conn.from), "unknown source {}", conn.from);
            assert!(data.has_stage(&conn.to), "unknown target {}", conn.to);
        }
    }

    #[test]
    fn test_reports_dangling_and_duplicates() {
        let stage = |name: &str| Stage {
            name: name.to_string(),
            description: String::new(),
            color: "#000000".to_string(),
        };
        let data = LifecycleData {
            stages: vec![stage("Collect"), stage("Collect")],
            connections: vec![Connection {
                from: "Collect".to_string(),
                to: "Archive".to_string(),
                kind: ConnectionType::Normal,
            }],
            exemplars: vec![Exemplar {
                stage: "Ghost".to_string(),
                category: "Misc".to_string(),
                name: "Tool".to_string(),
                description: String::new(),
            }],
        };

        let issues = data.validate();
        assert_eq!(issues.len(), 3);
        assert!(issues.contains(&ValidationIssue::DuplicateStage {
            name: "Collect".to_string()
        }));
        assert!(issues.iter().any(|i| matches!(
            i,
            ValidationIssue::DanglingConnection { missing, .. } if missing == "Archive"
        )));
        assert_eq!(
            issues[2].to_string(),
            "exemplar 'Tool' references unknown stage 'Ghost'"
        );
    }
}
