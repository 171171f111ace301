//! Per-run mutable state: the event log and the run variables.

use flowforge_node::{EventLog, RunEvent, RunNotifier, Vars};

pub struct RunState<'n> {
  vars: Vars,
  events: EventLog<'n>,
}

impl<'n> RunState<'n> {
  pub fn new(notifier: &'n dyn RunNotifier) -> Self {
    Self {
      vars: Vars::new(),
      events: EventLog::new(notifier),
    }
  }

  pub fn vars(&self) -> &Vars {
    &self.vars
  }

  pub fn events(&self) -> &EventLog<'n> {
    &self.events
  }

  pub fn emit(&self, event: RunEvent) {
    self.events.emit(event);
  }

  /// Replace the variables with the previous mapping overlaid by `patch`.
  pub fn merge_vars(&mut self, patch: Vars) {
    if patch.is_empty() {
      return;
    }
    let mut next = self.vars.clone();
    next.extend(patch);
    self.vars = next;
  }

  pub fn into_parts(self) -> (Vec<RunEvent>, Vars) {
    (self.events.into_events(), self.vars)
  }
}
