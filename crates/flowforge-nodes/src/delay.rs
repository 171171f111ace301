use std::time::Duration;

use async_trait::async_trait;
use flowforge_config::DataBag;
use flowforge_node::{ExecContext, ExecResult, NodeBehavior, NodeDef, NodeError, PortDef};
use serde_json::json;
use tracing::debug;

use crate::coerce::{first_present, format_number, to_number};

pub const DELAY: &str = "timing.delay";

/// Suspends for `inputs.ms`, else `data.ms`, milliseconds.
struct Delay;

#[async_trait]
impl NodeBehavior for Delay {
  async fn exec(&self, ctx: ExecContext<'_>) -> Result<ExecResult, NodeError> {
    let raw = first_present([ctx.input("ms"), ctx.field("ms")])
      .map(to_number)
      .unwrap_or(0.0);
    // NaN and negatives collapse to zero
    let ms = if raw > 0.0 { raw } else { 0.0 };

    ctx.info(format!("Delay {}ms", format_number(ms)));

    let duration = Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX);
    debug!(node_id = %ctx.node_id, ?duration, "suspending");
    ctx.suspend(duration).await?;

    Ok(ExecResult::new().then("out"))
  }
}

pub(crate) fn definition() -> NodeDef {
  let mut defaults = DataBag::new();
  defaults.insert("ms".to_string(), json!(500));

  NodeDef::new(DELAY, "Delay", Delay)
    .subtitle("Sleep and continue")
    .input(PortDef::flow("in", "In"))
    .input(PortDef::data("ms", "Ms"))
    .output(PortDef::flow("out", "Out"))
    .default_data(defaults)
}
