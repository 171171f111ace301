use async_trait::async_trait;
use flowforge_config::DataBag;
use flowforge_node::{ExecContext, ExecResult, NodeBehavior, NodeDef, NodeError, PortDef};
use serde_json::{Value, json};

use crate::coerce::{first_present, to_display};

pub const SET_VAR: &str = "logic.setVar";

/// Writes `inputs.value`, else `data.fallback`, else `true` into one variable.
struct SetVar;

fn key_of(data: &DataBag) -> String {
  data
    .get("key")
    .filter(|v| !v.is_null())
    .map(to_display)
    .unwrap_or_default()
    .trim()
    .to_string()
}

#[async_trait]
impl NodeBehavior for SetVar {
  async fn exec(&self, ctx: ExecContext<'_>) -> Result<ExecResult, NodeError> {
    let key = key_of(ctx.data);
    let value = first_present([ctx.input("value"), ctx.field("fallback")])
      .cloned()
      .unwrap_or(Value::Bool(true));

    ctx.info(format!("Var set: {key}"));

    Ok(ExecResult::new().with_var(key, value).then("out"))
  }

  fn validate(&self, data: &DataBag) -> Option<String> {
    if key_of(data).is_empty() {
      Some("Key required.".to_string())
    } else {
      None
    }
  }
}

pub(crate) fn definition() -> NodeDef {
  let mut defaults = DataBag::new();
  defaults.insert("key".to_string(), json!("name"));

  NodeDef::new(SET_VAR, "Set Variable", SetVar)
    .subtitle("Write into runtime vars")
    .input(PortDef::flow("in", "In"))
    .input(PortDef::data("value", "Value"))
    .output(PortDef::flow("out", "Out"))
    .default_data(defaults)
}
