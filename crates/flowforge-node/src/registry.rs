use std::collections::HashMap;
use std::sync::Arc;

use flowforge_config::Node;

use crate::definition::NodeDef;

/// Mapping from node type identifier to its definition.
///
/// Iteration follows registration order, which is also the palette order.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
  defs: Vec<Arc<NodeDef>>,
  by_type: HashMap<String, usize>,
}

impl NodeRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a node kind, replacing any previous definition of the same type.
  ///
  /// Returns the replaced definition.
  pub fn register(&mut self, def: NodeDef) -> Option<Arc<NodeDef>> {
    let def = Arc::new(def);
    match self.by_type.get(&def.node_type) {
      Some(&slot) => Some(std::mem::replace(&mut self.defs[slot], def)),
      None => {
        self.by_type.insert(def.node_type.clone(), self.defs.len());
        self.defs.push(def);
        None
      }
    }
  }

  /// Builder-style [`register`](Self::register).
  pub fn with(mut self, def: NodeDef) -> Self {
    self.register(def);
    self
  }

  pub fn get(&self, node_type: &str) -> Option<&NodeDef> {
    self.by_type.get(node_type).map(|&slot| self.defs[slot].as_ref())
  }

  pub fn contains(&self, node_type: &str) -> bool {
    self.by_type.contains_key(node_type)
  }

  pub fn iter(&self) -> impl Iterator<Item = &NodeDef> {
    self.defs.iter().map(|d| d.as_ref())
  }

  pub fn len(&self) -> usize {
    self.defs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.defs.is_empty()
  }

  /// Run a node instance's advisory validation hook.
  ///
  /// Returns `None` when the node is valid or its type is unknown.
  pub fn validate_node(&self, node: &Node) -> Option<String> {
    self.get(&node.node_type)?.validate(&node.data)
  }
}
