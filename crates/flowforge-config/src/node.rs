use serde::{Deserialize, Serialize};

/// Open, type-specific configuration bag of a node instance.
pub type DataBag = serde_json::Map<String, serde_json::Value>;

/// Canvas position of a node. Carried for round-tripping only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
  pub x: f64,
  pub y: f64,
}

/// A node instance placed in a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
  pub id: String,
  /// Node type identifier, resolved against the node registry at run time.
  #[serde(rename = "type")]
  pub node_type: String,
  #[serde(default, alias = "position")]
  pub pos: Position,
  #[serde(default)]
  pub data: DataBag,
}

impl Node {
  pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      node_type: node_type.into(),
      pos: Position::default(),
      data: DataBag::new(),
    }
  }

  pub fn at(mut self, x: f64, y: f64) -> Self {
    self.pos = Position { x, y };
    self
  }

  pub fn with_data(mut self, data: DataBag) -> Self {
    self.data = data;
    self
  }
}
