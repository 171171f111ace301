//! The evaluator: public entry points for running a graph.

use flowforge_config::Graph;
use flowforge_node::{NodeRegistry, NoopNotifier, RunEvent, RunNotifier};
use flowforge_workflow::GraphIndex;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, error, info, info_span};

use crate::config::{EvaluatorConfig, RunOptions};
use crate::execution::Execution;
use crate::result::RunResult;
use crate::state::RunState;

/// Runs graphs against a node registry.
///
/// Every run gets a fresh output cache, variable mapping and event log.
/// Events are pushed to the notifier as they are emitted and are also
/// returned in the [`RunResult`].
pub struct Evaluator<N: RunNotifier = NoopNotifier> {
  config: EvaluatorConfig,
  notifier: N,
}

impl Evaluator<NoopNotifier> {
  pub fn new(config: EvaluatorConfig) -> Self {
    Self {
      config,
      notifier: NoopNotifier,
    }
  }
}

impl Default for Evaluator<NoopNotifier> {
  fn default() -> Self {
    Self::new(EvaluatorConfig::default())
  }
}

impl<N: RunNotifier> Evaluator<N> {
  pub fn with_notifier(config: EvaluatorConfig, notifier: N) -> Self {
    Self { config, notifier }
  }

  pub fn config(&self) -> &EvaluatorConfig {
    &self.config
  }

  pub fn notifier(&self) -> &N {
    &self.notifier
  }

  /// Run `graph` from `start_node_id` with the configured step budget.
  pub async fn run(&self, graph: &Graph, registry: &NodeRegistry, start_node_id: &str) -> RunResult {
    self
      .run_with(graph, registry, start_node_id, RunOptions::default())
      .await
  }

  /// Run `graph` from `start_node_id`.
  ///
  /// Never fails: a fatal condition ends the run with a single error event as
  /// the last entry of the log and `ok == false`. Variable merges and events
  /// that happened before the failure are kept.
  pub async fn run_with(
    &self,
    graph: &Graph,
    registry: &NodeRegistry,
    start_node_id: &str,
    options: RunOptions,
  ) -> RunResult {
    let run_id = uuid::Uuid::new_v4().to_string();
    let max_steps = options.max_steps.unwrap_or(self.config.max_steps);
    let cancel = options.cancel.unwrap_or_else(CancellationToken::new);

    let span = info_span!(
      "run",
      run_id = %run_id,
      graph_id = %graph.id,
      start_node_id = %start_node_id,
    );

    async move {
      let state = RunState::new(&self.notifier);
      let mut execution =
        Execution::new(GraphIndex::new(graph), registry, state, cancel, max_steps);

      execution.state().emit(RunEvent::info("Run started."));
      info!(max_steps, "run_started");

      let outcome = execution.drive(start_node_id).await;

      match &outcome {
        Ok(()) => {
          execution.state().emit(RunEvent::info("Run complete."));
        }
        Err(e) => {
          let event = RunEvent::error(e.to_string());
          let event = match e.node_id() {
            Some(node_id) => event.for_node(node_id),
            None => event,
          };
          execution.state().emit(event);
        }
      }

      let (events, vars, steps) = execution.into_parts();
      match &outcome {
        Ok(()) => info!(steps, events = events.len(), "run_completed"),
        Err(e) => error!(steps, error = %e, "run_failed"),
      }

      RunResult {
        run_id,
        ok: outcome.is_ok(),
        events,
        vars,
        steps,
        error: outcome.err(),
      }
    }
    .instrument(span)
    .await
  }
}

/// Run a graph once with a default evaluator.
///
/// `max_steps` falls back to [`crate::DEFAULT_MAX_STEPS`].
pub async fn run_graph(
  graph: &Graph,
  registry: &NodeRegistry,
  start_node_id: &str,
  max_steps: Option<usize>,
) -> RunResult {
  let options = RunOptions {
    max_steps,
    cancel: None,
  };
  Evaluator::new(EvaluatorConfig::default())
    .run_with(graph, registry, start_node_id, options)
    .await
}
