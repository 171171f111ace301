use std::collections::HashMap;

use flowforge_config::{Edge, Graph, Node};

/// node id -> port id -> edges in edge-list order.
type PortEdges<'g> = HashMap<&'g str, HashMap<&'g str, Vec<&'g Edge>>>;

/// Graph structure for traversal and data resolution.
#[derive(Debug, Clone)]
pub struct GraphIndex<'g> {
  graph: &'g Graph,
  /// Node lookup by id. The first node wins if ids repeat.
  nodes: HashMap<&'g str, &'g Node>,
  /// Keyed by the edge's source endpoint.
  outgoing: PortEdges<'g>,
  /// Keyed by the edge's target endpoint.
  incoming: PortEdges<'g>,
}

impl<'g> GraphIndex<'g> {
  /// Build an index over the given graph.
  pub fn new(graph: &'g Graph) -> Self {
    let mut nodes = HashMap::with_capacity(graph.nodes.len());
    for node in &graph.nodes {
      nodes.entry(node.id.as_str()).or_insert(node);
    }

    let mut outgoing = PortEdges::new();
    let mut incoming = PortEdges::new();

    for edge in &graph.edges {
      outgoing
        .entry(edge.from.node_id.as_str())
        .or_default()
        .entry(edge.from.port_id.as_str())
        .or_default()
        .push(edge);
      incoming
        .entry(edge.to.node_id.as_str())
        .or_default()
        .entry(edge.to.port_id.as_str())
        .or_default()
        .push(edge);
    }

    Self {
      graph,
      nodes,
      outgoing,
      incoming,
    }
  }

  /// The indexed graph.
  pub fn graph(&self) -> &'g Graph {
    self.graph
  }

  /// Get a node by ID.
  pub fn node(&self, node_id: &str) -> Option<&'g Node> {
    self.nodes.get(node_id).copied()
  }

  /// Edges leaving an output port, in edge-list order.
  pub fn outgoing(&self, node_id: &str, port_id: &str) -> &[&'g Edge] {
    edges_at(&self.outgoing, node_id, port_id)
  }

  /// Edges arriving at an input port, in edge-list order.
  pub fn incoming(&self, node_id: &str, port_id: &str) -> &[&'g Edge] {
    edges_at(&self.incoming, node_id, port_id)
  }

  /// The edge that feeds a data input port.
  ///
  /// When several edges arrive at the same port the first one listed in the
  /// graph wins and the rest are ignored.
  pub fn first_incoming(&self, node_id: &str, port_id: &str) -> Option<&'g Edge> {
    self.incoming(node_id, port_id).first().copied()
  }
}

fn edges_at<'s, 'g>(map: &'s PortEdges<'g>, node_id: &str, port_id: &str) -> &'s [&'g Edge] {
  map
    .get(node_id)
    .and_then(|ports| ports.get(port_id))
    .map(Vec::as_slice)
    .unwrap_or(&[])
}
