//! Execution context handed to node behaviors.

use std::time::Duration;

use flowforge_config::DataBag;
use tokio_util::sync::CancellationToken;

use crate::error::NodeError;
use crate::event::{EventLog, RunEvent};
use crate::{Values, Vars};

/// Cooperative suspension primitive.
///
/// A suspended behavior yields to the runtime; the evaluator awaits it to
/// completion before anything else executes. If the run carries a cancellation
/// signal, firing it cuts the suspension short with [`NodeError::Cancelled`].
#[derive(Debug, Clone)]
pub struct Suspender {
  cancel: CancellationToken,
}

impl Suspender {
  pub fn new(cancel: CancellationToken) -> Self {
    Self { cancel }
  }

  /// Wait for `duration`, or until the run is cancelled.
  pub async fn suspend(&self, duration: Duration) -> Result<(), NodeError> {
    if self.cancel.is_cancelled() {
      return Err(NodeError::Cancelled);
    }

    tokio::select! {
      _ = tokio::time::sleep(duration) => Ok(()),
      _ = self.cancel.cancelled() => Err(NodeError::Cancelled),
    }
  }
}

impl Default for Suspender {
  fn default() -> Self {
    Self::new(CancellationToken::new())
  }
}

/// Everything a behavior sees during one execution.
///
/// `vars` is the run's variable mapping at the time of invocation. Changes are
/// requested through [`crate::ExecResult::vars_patch`], never by mutation.
pub struct ExecContext<'a> {
  pub node_id: &'a str,
  pub node_type: &'a str,
  /// The node instance's configuration bag.
  pub data: &'a DataBag,
  /// Resolved data inputs, keyed by input port id. Unwired ports are absent.
  pub inputs: Values,
  pub vars: &'a Vars,
  events: &'a EventLog<'a>,
  suspender: &'a Suspender,
}

impl<'a> ExecContext<'a> {
  pub fn new(
    node_id: &'a str,
    node_type: &'a str,
    data: &'a DataBag,
    inputs: Values,
    vars: &'a Vars,
    events: &'a EventLog<'a>,
    suspender: &'a Suspender,
  ) -> Self {
    Self {
      node_id,
      node_type,
      data,
      inputs,
      vars,
      events,
      suspender,
    }
  }

  /// Append an event to the run log as-is.
  pub fn emit(&self, event: RunEvent) {
    self.events.emit(event);
  }

  /// Emit an `info` event tagged with this node.
  pub fn info(&self, msg: impl Into<String>) {
    self.emit(RunEvent::info(msg).for_node(self.node_id));
  }

  /// Emit a `warn` event tagged with this node.
  pub fn warn(&self, msg: impl Into<String>) {
    self.emit(RunEvent::warn(msg).for_node(self.node_id));
  }

  /// Cooperatively yield for `duration`.
  pub async fn suspend(&self, duration: Duration) -> Result<(), NodeError> {
    self.suspender.suspend(duration).await
  }

  /// Data input by port id, treating JSON `null` as absent.
  pub fn input(&self, port_id: &str) -> Option<&serde_json::Value> {
    self.inputs.get(port_id).filter(|v| !v.is_null())
  }

  /// Configuration field by key, treating JSON `null` as absent.
  pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
    self.data.get(key).filter(|v| !v.is_null())
  }
}
