use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// Control-flow dequeues allowed per run unless configured otherwise.
pub const DEFAULT_MAX_STEPS: usize = 200;

/// Configuration for the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
  /// Step budget: the only guard against flow cycles.
  #[serde(default = "default_max_steps")]
  pub max_steps: usize,
}

fn default_max_steps() -> usize {
  DEFAULT_MAX_STEPS
}

impl Default for EvaluatorConfig {
  fn default() -> Self {
    Self {
      max_steps: DEFAULT_MAX_STEPS,
    }
  }
}

/// Per-run overrides.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
  /// Overrides [`EvaluatorConfig::max_steps`] for this run.
  pub max_steps: Option<usize>,
  /// Hard stop. Checked at every control-flow dequeue and raced against every
  /// node suspension. Without one a run cannot be interrupted.
  pub cancel: Option<CancellationToken>,
}

impl RunOptions {
  pub fn max_steps(mut self, max_steps: usize) -> Self {
    self.max_steps = Some(max_steps);
    self
  }

  pub fn cancel(mut self, cancel: CancellationToken) -> Self {
    self.cancel = Some(cancel);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_defaults() {
    let config: EvaluatorConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, EvaluatorConfig::default());
    assert_eq!(config.max_steps, 200);

    let config: EvaluatorConfig = serde_json::from_str(r#"{ "max_steps": 5 }"#).unwrap();
    assert_eq!(config.max_steps, 5);
  }
}
