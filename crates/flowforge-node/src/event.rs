//! Run events.
//!
//! The event log is the observable output of a run: an ordered, append-only
//! sequence of records. Consumers (log panels, toast hosts) read it after the
//! run or live through a [`RunNotifier`].

use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::notify::RunNotifier;

/// Message prefix that marks an `info` event as a user-facing notification.
pub const TOAST_PREFIX: &str = "Toast: ";

/// Discriminant of a [`RunEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
  Info,
  Warn,
  Step,
  Error,
}

impl fmt::Display for EventKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      EventKind::Info => "info",
      EventKind::Warn => "warn",
      EventKind::Step => "step",
      EventKind::Error => "error",
    };
    f.write_str(s)
  }
}

/// A single entry of the run log.
///
/// `at` is a Unix timestamp in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RunEvent {
  #[serde(rename_all = "camelCase")]
  Info {
    at: i64,
    msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    node_id: Option<String>,
  },

  #[serde(rename_all = "camelCase")]
  Warn {
    at: i64,
    msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    node_id: Option<String>,
  },

  /// Emitted immediately before each control-flow-triggered execution.
  #[serde(rename_all = "camelCase")]
  Step {
    at: i64,
    node_id: String,
    node_type: String,
    title: String,
  },

  #[serde(rename_all = "camelCase")]
  Error {
    at: i64,
    msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    node_id: Option<String>,
  },
}

fn now_millis() -> i64 {
  chrono::Utc::now().timestamp_millis()
}

impl RunEvent {
  pub fn info(msg: impl Into<String>) -> Self {
    RunEvent::Info {
      at: now_millis(),
      msg: msg.into(),
      node_id: None,
    }
  }

  pub fn warn(msg: impl Into<String>) -> Self {
    RunEvent::Warn {
      at: now_millis(),
      msg: msg.into(),
      node_id: None,
    }
  }

  pub fn error(msg: impl Into<String>) -> Self {
    RunEvent::Error {
      at: now_millis(),
      msg: msg.into(),
      node_id: None,
    }
  }

  pub fn step(
    node_id: impl Into<String>,
    node_type: impl Into<String>,
    title: impl Into<String>,
  ) -> Self {
    RunEvent::Step {
      at: now_millis(),
      node_id: node_id.into(),
      node_type: node_type.into(),
      title: title.into(),
    }
  }

  /// A notification request, following the `"Toast: "` message convention.
  pub fn toast(msg: &str) -> Self {
    Self::info(format!("{TOAST_PREFIX}{msg}"))
  }

  /// Attach the emitting node. No-op for step events, which always carry one.
  pub fn for_node(mut self, id: impl Into<String>) -> Self {
    match &mut self {
      RunEvent::Info { node_id, .. }
      | RunEvent::Warn { node_id, .. }
      | RunEvent::Error { node_id, .. } => *node_id = Some(id.into()),
      RunEvent::Step { .. } => {}
    }
    self
  }

  pub fn kind(&self) -> EventKind {
    match self {
      RunEvent::Info { .. } => EventKind::Info,
      RunEvent::Warn { .. } => EventKind::Warn,
      RunEvent::Step { .. } => EventKind::Step,
      RunEvent::Error { .. } => EventKind::Error,
    }
  }

  pub fn at(&self) -> i64 {
    match self {
      RunEvent::Info { at, .. }
      | RunEvent::Warn { at, .. }
      | RunEvent::Step { at, .. }
      | RunEvent::Error { at, .. } => *at,
    }
  }

  pub fn msg(&self) -> Option<&str> {
    match self {
      RunEvent::Info { msg, .. } | RunEvent::Warn { msg, .. } | RunEvent::Error { msg, .. } => {
        Some(msg)
      }
      RunEvent::Step { .. } => None,
    }
  }

  pub fn node_id(&self) -> Option<&str> {
    match self {
      RunEvent::Info { node_id, .. }
      | RunEvent::Warn { node_id, .. }
      | RunEvent::Error { node_id, .. } => node_id.as_deref(),
      RunEvent::Step { node_id, .. } => Some(node_id),
    }
  }

  /// The notification text if this is an `info` event using the toast convention.
  pub fn toast_message(&self) -> Option<&str> {
    match self {
      RunEvent::Info { msg, .. } => msg.strip_prefix(TOAST_PREFIX),
      _ => None,
    }
  }
}

impl fmt::Display for RunEvent {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RunEvent::Step {
        node_id,
        node_type,
        title,
        ..
      } => write!(f, "[step] {title} ({node_type}) #{node_id}"),
      other => {
        write!(f, "[{}] {}", other.kind(), other.msg().unwrap_or_default())?;
        if let Some(id) = other.node_id() {
          write!(f, " #{id}")?;
        }
        Ok(())
      }
    }
  }
}

/// Append-only event log of one run.
///
/// `emit` takes `&self` so the log can be shared with a node behavior while the
/// evaluator still reads the run's variables. Every appended event is
/// forwarded to the notifier in the same order.
pub struct EventLog<'n> {
  events: Mutex<Vec<RunEvent>>,
  notifier: &'n dyn RunNotifier,
}

impl<'n> EventLog<'n> {
  pub fn new(notifier: &'n dyn RunNotifier) -> Self {
    Self {
      events: Mutex::new(Vec::new()),
      notifier,
    }
  }

  /// Append an event. Never fails and never reorders.
  pub fn emit(&self, event: RunEvent) {
    self.notifier.notify(&event);
    self
      .events
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .push(event);
  }

  pub fn len(&self) -> usize {
    self
      .events
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Copy of the events appended so far.
  pub fn snapshot(&self) -> Vec<RunEvent> {
    self
      .events
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }

  pub fn into_events(self) -> Vec<RunEvent> {
    self
      .events
      .into_inner()
      .unwrap_or_else(PoisonError::into_inner)
  }
}

impl fmt::Debug for EventLog<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("EventLog")
      .field("len", &self.len())
      .finish_non_exhaustive()
  }
}
