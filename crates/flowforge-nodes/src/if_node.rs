use flowforge_node::{ExecResult, NodeDef, PortDef, from_fn};

use crate::coerce::truthy;

pub const IF: &str = "logic.if";

pub(crate) fn definition() -> NodeDef {
  NodeDef::new(
    IF,
    "If",
    from_fn(|ctx| {
      let cond = truthy(ctx.input("cond"));
      ctx.info(format!("If = {cond}"));
      Ok(ExecResult::new().then(if cond { "t" } else { "f" }))
    }),
  )
  .subtitle("Branch by boolean")
  .input(PortDef::flow("in", "In"))
  .input(PortDef::data("cond", "Cond"))
  .output(PortDef::flow("t", "True"))
  .output(PortDef::flow("f", "False"))
}
