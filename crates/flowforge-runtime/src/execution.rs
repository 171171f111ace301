//! One run of the evaluator.
//!
//! Two mechanisms share the output cache:
//!
//! - **Data resolution** is a lazy, memoized pull. Before a node executes, the
//!   source of each wired data input is resolved: from the cache when present,
//!   otherwise by executing the source (and, transitively, its sources). Pulled
//!   nodes emit no step event and their flow outputs are discarded.
//! - **Control flow** is a breadth-first walk over flow edges. Every node
//!   reached through a flow edge executes again, even when cached, and its
//!   outputs replace the cache entry.

use std::collections::{HashSet, VecDeque};

use flowforge_config::{Edge, Node};
use flowforge_node::{
  ExecContext, ExecResult, NodeDef, NodeError, NodeRegistry, RunEvent, Suspender, Values, Vars,
};
use flowforge_workflow::GraphIndex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::cache::OutputCache;
use crate::error::RunError;
use crate::state::RunState;

/// A pending flow activation: `port_id` on `node` fired.
struct Activation<'g> {
  node: &'g Node,
  port_id: String,
}

/// A frame of the data-resolution stack. `expanded` once its own
/// dependencies have been pushed.
struct Frame<'g> {
  edge: &'g Edge,
  expanded: bool,
}

pub(crate) struct Execution<'a> {
  index: GraphIndex<'a>,
  registry: &'a NodeRegistry,
  state: RunState<'a>,
  cache: OutputCache,
  suspender: Suspender,
  cancel: CancellationToken,
  max_steps: usize,
  steps: usize,
}

impl<'a> Execution<'a> {
  pub(crate) fn new(
    index: GraphIndex<'a>,
    registry: &'a NodeRegistry,
    state: RunState<'a>,
    cancel: CancellationToken,
    max_steps: usize,
  ) -> Self {
    Self {
      index,
      registry,
      state,
      cache: OutputCache::new(),
      suspender: Suspender::new(cancel.clone()),
      cancel,
      max_steps,
      steps: 0,
    }
  }

  pub(crate) fn state(&self) -> &RunState<'a> {
    &self.state
  }

  pub(crate) fn into_parts(self) -> (Vec<RunEvent>, Vars, usize) {
    let steps = self.steps;
    let (events, vars) = self.state.into_parts();
    (events, vars, steps)
  }

  /// Execute the start node, then follow flow edges breadth-first.
  pub(crate) async fn drive(&mut self, start_node_id: &str) -> Result<(), RunError> {
    let start = self
      .index
      .node(start_node_id)
      .ok_or_else(|| RunError::StartNodeNotFound {
        node_id: start_node_id.to_string(),
      })?;

    let mut queue = VecDeque::new();
    for port_id in self.evaluate(start).await? {
      queue.push_back(Activation {
        node: start,
        port_id,
      });
    }

    while let Some(activation) = queue.pop_front() {
      if self.cancel.is_cancelled() {
        return Err(RunError::Cancelled);
      }
      if self.steps >= self.max_steps {
        return Err(RunError::StepBudgetExceeded {
          max_steps: self.max_steps,
        });
      }
      self.steps += 1;

      let edges: Vec<&'a Edge> = self
        .index
        .outgoing(&activation.node.id, &activation.port_id)
        .to_vec();
      for edge in edges {
        let next = self.referenced_node(edge)?;
        for port_id in self.evaluate(next).await? {
          queue.push_back(Activation { node: next, port_id });
        }
      }
    }

    Ok(())
  }

  /// Resolve inputs, emit the step event, execute, cache outputs.
  /// Returns the flow ports the node fired.
  async fn evaluate(&mut self, node: &'a Node) -> Result<Vec<String>, RunError> {
    let def = self.definition_of(node)?;

    for port in def.data_inputs() {
      if let Some(edge) = self.index.first_incoming(&node.id, &port.id) {
        self.resolve(edge).await?;
      }
    }
    let inputs = self.bind_inputs(node, def);

    self
      .state
      .emit(RunEvent::step(&node.id, &node.node_type, &def.title));

    let result = self.invoke(node, def, inputs).await?;
    self.cache.insert(node.id.clone(), result.outputs);
    Ok(result.next_flow)
  }

  /// Make sure the source of `edge` is in the cache, executing it and any
  /// uncached transitive sources depth-first.
  async fn resolve(&mut self, edge: &'a Edge) -> Result<(), RunError> {
    let mut stack = vec![Frame {
      edge,
      expanded: false,
    }];
    let mut resolving: HashSet<&'a str> = HashSet::new();

    while let Some(top) = stack.last() {
      let edge = top.edge;
      let node_id = edge.from.node_id.as_str();

      if top.expanded {
        stack.pop();
        resolving.remove(node_id);

        let node = self.source_node(edge)?;
        let def = self.definition_of(node)?;
        let inputs = self.bind_inputs(node, def);
        let result = self.invoke(node, def, inputs).await?;
        debug!(node_id = %node.id, "node_pulled");
        self.cache.insert(node.id.clone(), result.outputs);
        continue;
      }

      if self.cache.contains(node_id) {
        stack.pop();
        continue;
      }

      let node = self.source_node(edge)?;
      let def = self.definition_of(node)?;
      if let Some(top) = stack.last_mut() {
        top.expanded = true;
      }
      resolving.insert(node_id);

      let deps: Vec<&'a Edge> = def
        .data_inputs()
        .filter_map(|port| self.index.first_incoming(&node.id, &port.id))
        .collect();
      for dep in deps.into_iter().rev() {
        let source_id = dep.from.node_id.as_str();
        if self.cache.contains(source_id) {
          continue;
        }
        if resolving.contains(source_id) {
          return Err(RunError::CyclicDependency {
            node_id: source_id.to_string(),
          });
        }
        stack.push(Frame {
          edge: dep,
          expanded: false,
        });
      }
    }

    Ok(())
  }

  /// Inputs for `node` from the cache. Every wired source must already be
  /// resolved; unwired ports and missing output keys stay absent.
  fn bind_inputs(&self, node: &Node, def: &NodeDef) -> Values {
    let mut inputs = Values::new();
    for port in def.data_inputs() {
      let Some(edge) = self.index.first_incoming(&node.id, &port.id) else {
        continue;
      };
      if let Some(value) = self.cache.value(&edge.from.node_id, &edge.from.port_id) {
        inputs.insert(port.id.clone(), value.clone());
      }
    }
    inputs
  }

  /// Run a behavior and merge its variable patch.
  async fn invoke(
    &mut self,
    node: &'a Node,
    def: &'a NodeDef,
    inputs: Values,
  ) -> Result<ExecResult, RunError> {
    debug!(node_id = %node.id, node_type = %node.node_type, "node_started");
    let ctx = ExecContext::new(
      &node.id,
      &node.node_type,
      &node.data,
      inputs,
      self.state.vars(),
      self.state.events(),
      &self.suspender,
    );

    let mut result = def.exec(ctx).await.map_err(|e| match e {
      NodeError::Cancelled => RunError::Cancelled,
      source => {
        warn!(node_id = %node.id, error = %source, "node_failed");
        RunError::NodeExecutionFailure {
          node_id: node.id.clone(),
          source,
        }
      }
    })?;

    self.state.merge_vars(std::mem::take(&mut result.vars_patch));
    Ok(result)
  }

  fn definition_of(&self, node: &'a Node) -> Result<&'a NodeDef, RunError> {
    self
      .registry
      .get(&node.node_type)
      .ok_or_else(|| RunError::UnknownNodeType {
        node_id: node.id.clone(),
        node_type: node.node_type.clone(),
      })
  }

  /// Target of a flow edge.
  fn referenced_node(&self, edge: &'a Edge) -> Result<&'a Node, RunError> {
    self.lookup(&edge.to.node_id, edge)
  }

  /// Source of a data edge.
  fn source_node(&self, edge: &'a Edge) -> Result<&'a Node, RunError> {
    self.lookup(&edge.from.node_id, edge)
  }

  fn lookup(&self, node_id: &str, edge: &Edge) -> Result<&'a Node, RunError> {
    self
      .index
      .node(node_id)
      .ok_or_else(|| RunError::MissingReferencedNode {
        node_id: node_id.to_string(),
        edge_id: edge.id.clone(),
      })
  }
}
