//! Serialized graph runner.
//!
//! The `GraphRunner` owns an mpsc channel of run requests and executes them
//! one at a time, so two runs never overlap. Callers talk to it through a
//! cloneable [`RunnerHandle`].

use std::sync::Arc;

use flowforge_config::Graph;
use flowforge_node::{NodeRegistry, NoopNotifier, RunNotifier};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::RunOptions;
use crate::error::RunnerError;
use crate::evaluator::Evaluator;
use crate::result::RunResult;

struct RunRequest {
  start_node_id: String,
  max_steps: Option<usize>,
  reply: oneshot::Sender<RunResult>,
}

/// A runner that executes runs of one graph, in request order.
///
/// # Usage
///
/// ```ignore
/// let runner = GraphRunner::new(graph, registry, Evaluator::default());
///
/// // Hand out handles to whatever starts runs (CLI, UI, timers)
/// let handle = runner.handle();
///
/// // Start the execution loop
/// let cancel = CancellationToken::new();
/// tokio::spawn(runner.start(cancel.clone()));
///
/// let result = handle.run("trigger", None).await?;
/// ```
pub struct GraphRunner<N: RunNotifier = NoopNotifier> {
  sender: mpsc::Sender<RunRequest>,
  receiver: mpsc::Receiver<RunRequest>,
  graph: Arc<Graph>,
  registry: Arc<NodeRegistry>,
  evaluator: Evaluator<N>,
}

impl<N: RunNotifier> GraphRunner<N> {
  pub fn new(graph: Arc<Graph>, registry: Arc<NodeRegistry>, evaluator: Evaluator<N>) -> Self {
    Self::with_buffer_size(graph, registry, evaluator, 16)
  }

  pub fn with_buffer_size(
    graph: Arc<Graph>,
    registry: Arc<NodeRegistry>,
    evaluator: Evaluator<N>,
    buffer_size: usize,
  ) -> Self {
    let (sender, receiver) = mpsc::channel(buffer_size);
    Self {
      sender,
      receiver,
      graph,
      registry,
      evaluator,
    }
  }

  pub fn handle(&self) -> RunnerHandle {
    RunnerHandle {
      sender: self.sender.clone(),
    }
  }

  pub fn graph(&self) -> &Graph {
    &self.graph
  }

  /// Start the execution loop.
  ///
  /// Returns when the cancellation token fires or every handle is dropped.
  /// Cancelling also cancels the run in progress.
  pub async fn start(self, cancel: CancellationToken) {
    let Self {
      sender,
      mut receiver,
      graph,
      registry,
      evaluator,
    } = self;
    // Only handles keep the channel open.
    drop(sender);

    info!(graph_id = %graph.id, graph_name = %graph.name, "runner_started");

    loop {
      tokio::select! {
        _ = cancel.cancelled() => {
          info!(graph_id = %graph.id, "runner_cancelled");
          break;
        }
        request = receiver.recv() => {
          let Some(request) = request else {
            info!(graph_id = %graph.id, "runner_channel_closed");
            break;
          };

          let options = RunOptions {
            max_steps: request.max_steps,
            cancel: Some(cancel.child_token()),
          };
          let result = evaluator
            .run_with(&graph, &registry, &request.start_node_id, options)
            .await;

          if request.reply.send(result).is_err() {
            warn!(graph_id = %graph.id, "run_result_dropped");
          }
        }
      }
    }
  }

  /// Execute a single run directly, bypassing the queue.
  pub async fn execute_once(&self, start_node_id: &str, options: RunOptions) -> RunResult {
    self
      .evaluator
      .run_with(&self.graph, &self.registry, start_node_id, options)
      .await
  }
}

/// Cloneable handle for requesting runs from a [`GraphRunner`].
#[derive(Clone)]
pub struct RunnerHandle {
  sender: mpsc::Sender<RunRequest>,
}

impl RunnerHandle {
  /// Queue a run and wait for its result.
  pub async fn run(
    &self,
    start_node_id: impl Into<String>,
    max_steps: Option<usize>,
  ) -> Result<RunResult, RunnerError> {
    let (reply, result) = oneshot::channel();
    let request = RunRequest {
      start_node_id: start_node_id.into(),
      max_steps,
      reply,
    };
    self
      .sender
      .send(request)
      .await
      .map_err(|_| RunnerError::Closed)?;
    result.await.map_err(|_| RunnerError::NoReply)
  }

  pub fn is_closed(&self) -> bool {
    self.sender.is_closed()
  }
}
