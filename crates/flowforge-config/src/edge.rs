use serde::{Deserialize, Serialize};

/// One end of an edge: a port on a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
  pub node_id: String,
  pub port_id: String,
}

impl Endpoint {
  pub fn new(node_id: impl Into<String>, port_id: impl Into<String>) -> Self {
    Self {
      node_id: node_id.into(),
      port_id: port_id.into(),
    }
  }
}

/// A connection from an output port to an input port.
///
/// Flow edges join flow ports and data edges join data ports. The kind is not
/// stored on the edge; it follows from the ports' declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
  pub id: String,
  pub from: Endpoint,
  pub to: Endpoint,
}

impl Edge {
  pub fn new(id: impl Into<String>, from: Endpoint, to: Endpoint) -> Self {
    Self {
      id: id.into(),
      from,
      to,
    }
  }
}
