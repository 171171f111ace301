use serde::{Deserialize, Serialize};

use crate::edge::Edge;
use crate::error::ConfigError;
use crate::node::Node;

/// A complete node graph.
///
/// Edge order is significant: it decides fan-out order for flow ports and
/// which edge wins when several edges feed the same data input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub nodes: Vec<Node>,
  #[serde(default)]
  pub edges: Vec<Edge>,
}

impl Graph {
  pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      nodes: Vec::new(),
      edges: Vec::new(),
    }
  }

  /// Parse a graph from its JSON export format.
  pub fn from_json(json: &str) -> Result<Self, ConfigError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_object() {
      return Err(ConfigError::NotAGraph);
    }
    Ok(serde_json::from_value(value)?)
  }

  /// Serialize the graph to pretty-printed JSON.
  pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  /// Get a node by ID.
  pub fn get_node(&self, node_id: &str) -> Option<&Node> {
    self.nodes.iter().find(|n| n.id == node_id)
  }
}
