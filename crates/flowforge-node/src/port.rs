use serde::{Deserialize, Serialize};

/// What travels through a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortKind {
  /// Control transfer, no value.
  Flow,
  /// A computed value, pulled lazily.
  Data,
}

/// A named attachment point on a node.
///
/// Direction is implied by whether the port is listed in a definition's
/// inputs or outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortDef {
  pub id: String,
  pub label: String,
  pub kind: PortKind,
}

impl PortDef {
  pub fn flow(id: impl Into<String>, label: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      label: label.into(),
      kind: PortKind::Flow,
    }
  }

  pub fn data(id: impl Into<String>, label: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      label: label.into(),
      kind: PortKind::Data,
    }
  }

  pub fn is_data(&self) -> bool {
    self.kind == PortKind::Data
  }
}
