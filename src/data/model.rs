//! Lifecycle records as stored in `lifecycle_data.json`.

use serde::{Deserialize, Serialize};

/// A phase of the research data lifecycle.
///
/// Stage order in the document defines the angular slot on the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub description: String,
    pub color: String,
}

/// Flow type of a connection between two stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    /// Regular forward flow around the cycle
    Normal,
    /// Feedback / return path, drawn dashed
    Alternative,
}

impl ConnectionType {
    pub const ALL: [ConnectionType; 2] = [ConnectionType::Normal, ConnectionType::Alternative];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionType::Normal => "normal",
            ConnectionType::Alternative => "alternative",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(ConnectionType::Normal),
            "alternative" => Some(ConnectionType::Alternative),
            _ => None,
        }
    }

    pub fn is_dashed(&self) -> bool {
        matches!(self, ConnectionType::Alternative)
    }
}

/// Directed edge between two stages, referenced by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: ConnectionType,
}

/// Example tool for a stage, grouped under a category (substage).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exemplar {
    pub stage: String,
    pub category: String,
    pub name: String,
    pub description: String,
}

/// The three collections that make up a lifecycle document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleData {
    pub stages: Vec<Stage>,
    pub connections: Vec<Connection>,
    pub exemplars: Vec<Exemplar>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_type_uses_json_key() {
        let json = r#"{"from": "Collect", "to": "Process", "type": "alternative"}"#;
        let conn: Connection = serde_json::from_str(json).unwrap();
        assert_eq!(conn.kind, ConnectionType::Alternative);
        assert!(conn.kind.is_dashed());

        let back = serde_json::to_value(&conn).unwrap();
        assert_eq!(back["type"], "alternative");
    }

    #[test]
    fn test_unknown_connection_type_rejected() {
        let json = r#"{"from": "A", "to": "B", "type": "sideways"}"#;
        assert!(serde_json::from_str::<Connection>(json).is_err());
    }

    #[test]
    fn test_parse_connection_type() {
        assert_eq!(ConnectionType::parse(" Normal "), Some(ConnectionType::Normal));
        assert_eq!(ConnectionType::parse("alternative"), Some(ConnectionType::Alternative));
        assert_eq!(ConnectionType::parse("dashed"), None);
    }
}
