use thiserror::Error;

/// Errors raised by a node behavior.
#[derive(Debug, Error)]
pub enum NodeError {
  /// The behavior failed with a domain error.
  #[error("{0}")]
  Failed(String),

  /// A suspension was interrupted by the run's cancellation signal.
  #[error("suspension cancelled")]
  Cancelled,
}

impl NodeError {
  pub fn failed(message: impl Into<String>) -> Self {
    Self::Failed(message.into())
  }
}
