use flowforge_config::{DataBag, Edge, Endpoint, Graph, Node};
use serde_json::json;

use crate::{DELAY, MANUAL_TRIGGER, SET_VAR, TOAST};

fn new_id() -> String {
  uuid::Uuid::new_v4().simple().to_string()
}

fn bag(value: serde_json::Value) -> DataBag {
  match value {
    serde_json::Value::Object(map) => map,
    _ => DataBag::new(),
  }
}

fn link(from: &Node, from_port: &str, to: &Node, to_port: &str) -> Edge {
  Edge::new(
    new_id(),
    Endpoint::new(&from.id, from_port),
    Endpoint::new(&to.id, to_port),
  )
}

/// The starter flow: trigger, set `name`, wait, then toast.
pub fn demo_graph() -> Graph {
  let trigger = Node::new(new_id(), MANUAL_TRIGGER).at(80.0, 80.0);
  let set_var = Node::new(new_id(), SET_VAR)
    .at(380.0, 70.0)
    .with_data(bag(json!({ "key": "name", "fallback": "World" })));
  let delay = Node::new(new_id(), DELAY)
    .at(660.0, 70.0)
    .with_data(bag(json!({ "ms": 350 })));
  let toast = Node::new(new_id(), TOAST)
    .at(940.0, 70.0)
    .with_data(bag(json!({ "msg": "Flow complete." })));

  let edges = vec![
    link(&trigger, "go", &set_var, "in"),
    link(&set_var, "out", &delay, "in"),
    link(&delay, "out", &toast, "in"),
  ];

  let mut graph = Graph::new(new_id(), "Demo Flow");
  graph.nodes = vec![trigger, set_var, delay, toast];
  graph.edges = edges;
  graph
}
