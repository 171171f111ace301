//! Flowforge Nodes
//!
//! The built-in node catalogue. Each node kind is an ordinary [`NodeDef`]
//! registered through [`register_builtins`]; the evaluator knows nothing about
//! any of them.
//!
//! | Type | Behavior |
//! |------|----------|
//! | `trigger.manual` | starts a flow |
//! | `logic.setVar` | writes one run variable |
//! | `logic.if` | branches on a data input |
//! | `timing.delay` | suspends, then continues |
//! | `action.toast` | requests a user-facing notification |

mod coerce;
mod delay;
mod demo;
mod if_node;
mod set_var;
mod toast;
mod trigger;

use flowforge_node::{NodeDef, NodeRegistry};

pub use coerce::{first_present, format_number, to_display, to_number, truthy};
pub use delay::DELAY;
pub use demo::demo_graph;
pub use if_node::IF;
pub use set_var::SET_VAR;
pub use toast::TOAST;
pub use trigger::MANUAL_TRIGGER;

/// Palette grouping of a built-in node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
  pub node_type: &'static str,
  pub group: &'static str,
}

/// Built-in node kinds in palette order.
pub const PALETTE: &[PaletteEntry] = &[
  PaletteEntry {
    node_type: MANUAL_TRIGGER,
    group: "Triggers",
  },
  PaletteEntry {
    node_type: SET_VAR,
    group: "Logic",
  },
  PaletteEntry {
    node_type: IF,
    group: "Logic",
  },
  PaletteEntry {
    node_type: DELAY,
    group: "Timing",
  },
  PaletteEntry {
    node_type: TOAST,
    group: "Actions",
  },
];

/// Definitions of every built-in node kind, in palette order.
pub fn builtin_defs() -> Vec<NodeDef> {
  vec![
    trigger::definition(),
    set_var::definition(),
    if_node::definition(),
    delay::definition(),
    toast::definition(),
  ]
}

/// Register every built-in node kind.
pub fn register_builtins(registry: &mut NodeRegistry) {
  for def in builtin_defs() {
    registry.register(def);
  }
}

/// A registry holding only the built-in node kinds.
pub fn builtin_registry() -> NodeRegistry {
  let mut registry = NodeRegistry::new();
  register_builtins(&mut registry);
  registry
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_palette_matches_registry() {
    let registry = builtin_registry();
    assert_eq!(registry.len(), PALETTE.len());
    for (entry, def) in PALETTE.iter().zip(registry.iter()) {
      assert_eq!(entry.node_type, def.node_type);
    }
  }
}
