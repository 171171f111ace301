use flowforge_config::DataBag;
use flowforge_node::{ExecResult, NodeDef, PortDef, RunEvent, from_fn};
use serde_json::{Value, json};

use crate::coerce::{first_present, to_display};

pub const TOAST: &str = "action.toast";

pub(crate) fn definition() -> NodeDef {
  let mut defaults = DataBag::new();
  defaults.insert("msg".to_string(), json!("Hello from FlowForge"));

  NodeDef::new(
    TOAST,
    "Toast",
    from_fn(|ctx| {
      let msg = first_present([ctx.input("msg"), ctx.field("msg")])
        .map(to_display)
        .unwrap_or_else(|| "Toast".to_string());

      ctx.emit(RunEvent::toast(&msg).for_node(ctx.node_id));

      Ok(
        ExecResult::new()
          .with_output("msg", Value::String(msg))
          .then("out"),
      )
    }),
  )
  .subtitle("Show notification")
  .input(PortDef::flow("in", "In"))
  .input(PortDef::data("msg", "Msg"))
  .output(PortDef::flow("out", "Out"))
  .default_data(defaults)
}
