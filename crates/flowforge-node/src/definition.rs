//! Node definitions and the behavior contract.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use flowforge_config::DataBag;

use crate::context::ExecContext;
use crate::error::NodeError;
use crate::port::PortDef;
use crate::{Values, Vars};

/// What a behavior hands back to the evaluator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecResult {
  /// Data outputs, cached for later data pulls.
  pub outputs: Values,
  /// Shallow-merged into the run's variables; patch keys win.
  pub vars_patch: Vars,
  /// Flow output ports to activate. Empty ends this control path.
  pub next_flow: Vec<String>,
}

impl ExecResult {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_output(mut self, port_id: impl Into<String>, value: serde_json::Value) -> Self {
    self.outputs.insert(port_id.into(), value);
    self
  }

  pub fn with_var(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
    self.vars_patch.insert(key.into(), value);
    self
  }

  pub fn then(mut self, port_id: impl Into<String>) -> Self {
    self.next_flow.push(port_id.into());
    self
  }
}

/// Executable behavior of a node kind.
#[async_trait]
pub trait NodeBehavior: Send + Sync {
  /// Execute one node instance.
  async fn exec(&self, ctx: ExecContext<'_>) -> Result<ExecResult, NodeError>;

  /// Advisory check of a node's configuration bag, for authoring tools.
  ///
  /// Returns a message describing the problem. Never consulted by a run.
  fn validate(&self, _data: &DataBag) -> Option<String> {
    None
  }
}

/// A synchronous behavior built from a closure. See [`from_fn`].
pub struct FnBehavior<F> {
  f: F,
}

/// Wrap a closure as a [`NodeBehavior`] that never suspends.
pub fn from_fn<F>(f: F) -> FnBehavior<F>
where
  F: Fn(&ExecContext<'_>) -> Result<ExecResult, NodeError> + Send + Sync,
{
  FnBehavior { f }
}

#[async_trait]
impl<F> NodeBehavior for FnBehavior<F>
where
  F: Fn(&ExecContext<'_>) -> Result<ExecResult, NodeError> + Send + Sync,
{
  async fn exec(&self, ctx: ExecContext<'_>) -> Result<ExecResult, NodeError> {
    (self.f)(&ctx)
  }
}

/// A registered node kind: port schema plus behavior.
#[derive(Clone)]
pub struct NodeDef {
  pub node_type: String,
  pub title: String,
  pub subtitle: Option<String>,
  pub inputs: Vec<PortDef>,
  pub outputs: Vec<PortDef>,
  /// Initial configuration for newly placed instances.
  pub default_data: DataBag,
  behavior: Arc<dyn NodeBehavior>,
}

impl NodeDef {
  pub fn new(
    node_type: impl Into<String>,
    title: impl Into<String>,
    behavior: impl NodeBehavior + 'static,
  ) -> Self {
    Self {
      node_type: node_type.into(),
      title: title.into(),
      subtitle: None,
      inputs: Vec::new(),
      outputs: Vec::new(),
      default_data: DataBag::new(),
      behavior: Arc::new(behavior),
    }
  }

  pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
    self.subtitle = Some(subtitle.into());
    self
  }

  pub fn input(mut self, port: PortDef) -> Self {
    self.inputs.push(port);
    self
  }

  pub fn output(mut self, port: PortDef) -> Self {
    self.outputs.push(port);
    self
  }

  pub fn default_data(mut self, data: DataBag) -> Self {
    self.default_data = data;
    self
  }

  /// Data-kind input ports, in declaration order.
  pub fn data_inputs(&self) -> impl Iterator<Item = &PortDef> {
    self.inputs.iter().filter(|p| p.is_data())
  }

  pub async fn exec(&self, ctx: ExecContext<'_>) -> Result<ExecResult, NodeError> {
    self.behavior.exec(ctx).await
  }

  pub fn validate(&self, data: &DataBag) -> Option<String> {
    self.behavior.validate(data)
  }
}

impl fmt::Debug for NodeDef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("NodeDef")
      .field("node_type", &self.node_type)
      .field("title", &self.title)
      .field("inputs", &self.inputs)
      .field("outputs", &self.outputs)
      .finish_non_exhaustive()
  }
}
