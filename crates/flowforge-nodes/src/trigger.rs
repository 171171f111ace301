use flowforge_node::{ExecResult, NodeDef, PortDef, from_fn};

pub const MANUAL_TRIGGER: &str = "trigger.manual";

pub(crate) fn definition() -> NodeDef {
  NodeDef::new(
    MANUAL_TRIGGER,
    "Manual Trigger",
    from_fn(|ctx| {
      ctx.info("Triggered.");
      Ok(ExecResult::new().then("go"))
    }),
  )
  .subtitle("Start the flow")
  .output(PortDef::flow("go", "Go"))
}
