use flowforge_node::{RunEvent, Vars};
use serde::{Serialize, Serializer};

use crate::error::RunError;

/// Outcome of one run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
  pub run_id: String,
  /// True iff no fatal error occurred.
  pub ok: bool,
  /// Every event in emission order.
  pub events: Vec<RunEvent>,
  /// Variables after the last merge.
  pub vars: Vars,
  /// Control-flow dequeues processed.
  pub steps: usize,
  #[serde(
    skip_serializing_if = "Option::is_none",
    serialize_with = "serialize_error"
  )]
  pub error: Option<RunError>,
}

impl RunResult {
  /// Messages of the toast events, in order.
  pub fn toasts(&self) -> Vec<&str> {
    self.events.iter().filter_map(RunEvent::toast_message).collect()
  }

  /// Ids of nodes that received a step event, in order.
  pub fn executed_nodes(&self) -> Vec<&str> {
    self
      .events
      .iter()
      .filter_map(|event| match event {
        RunEvent::Step { node_id, .. } => Some(node_id.as_str()),
        _ => None,
      })
      .collect()
  }
}

fn serialize_error<S: Serializer>(error: &Option<RunError>, serializer: S) -> Result<S::Ok, S::Error> {
  match error {
    Some(error) => serializer.serialize_some(&error.to_string()),
    None => serializer.serialize_none(),
  }
}
