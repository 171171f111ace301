//! Per-run output cache.
//!
//! Maps a node id to the output mapping of that node's most recent execution.
//! Data pulls consult it; control-flow executions overwrite it. It lives for
//! exactly one run.

use std::collections::HashMap;

use flowforge_node::Values;

#[derive(Debug, Clone, Default)]
pub struct OutputCache {
  outputs: HashMap<String, Values>,
}

impl OutputCache {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn contains(&self, node_id: &str) -> bool {
    self.outputs.contains_key(node_id)
  }

  /// One output value of a cached node.
  pub fn value(&self, node_id: &str, port_id: &str) -> Option<&serde_json::Value> {
    self.outputs.get(node_id)?.get(port_id)
  }

  /// Store outputs, replacing any earlier entry for the node.
  pub fn insert(&mut self, node_id: impl Into<String>, outputs: Values) -> Option<Values> {
    self.outputs.insert(node_id.into(), outputs)
  }

  pub fn len(&self) -> usize {
    self.outputs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.outputs.is_empty()
  }
}
