//! Run errors.

use flowforge_node::NodeError;

/// Conditions that abort a run. None are retried.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
  /// The requested start node is not in the graph.
  #[error("Start node not found: {node_id}")]
  StartNodeNotFound { node_id: String },

  /// A node's type is not registered.
  #[error("Unknown node type: {node_type} (node {node_id})")]
  UnknownNodeType { node_id: String, node_type: String },

  /// An edge reached during the run points at a node that does not exist.
  #[error("Node missing: {node_id} (referenced by edge {edge_id})")]
  MissingReferencedNode { node_id: String, edge_id: String },

  /// The control-flow step counter exceeded the budget.
  #[error("Run stopped: exceeded max steps ({max_steps}).")]
  StepBudgetExceeded { max_steps: usize },

  /// A node behavior failed.
  #[error("Node {node_id} failed: {source}")]
  NodeExecutionFailure {
    node_id: String,
    #[source]
    source: NodeError,
  },

  /// A data pull reached a node that is already being resolved.
  #[error("Cyclic data dependency at node {node_id}")]
  CyclicDependency { node_id: String },

  /// The run's cancellation signal fired.
  #[error("Run cancelled.")]
  Cancelled,
}

impl RunError {
  /// The node the error is attributed to, if any.
  pub fn node_id(&self) -> Option<&str> {
    match self {
      RunError::UnknownNodeType { node_id, .. }
      | RunError::NodeExecutionFailure { node_id, .. }
      | RunError::CyclicDependency { node_id } => Some(node_id),
      RunError::StartNodeNotFound { .. }
      | RunError::MissingReferencedNode { .. }
      | RunError::StepBudgetExceeded { .. }
      | RunError::Cancelled => None,
    }
  }
}

/// Errors from talking to a [`crate::GraphRunner`].
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
  #[error("graph runner channel closed")]
  Closed,

  #[error("graph runner stopped before replying")]
  NoReply,
}
