use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to parse graph JSON: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("graph JSON must be an object with 'nodes' and 'edges'")]
  NotAGraph,
}
