//! Integration tests for the evaluator using probe nodes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use flowforge_config::{DataBag, Edge, Endpoint, Graph, Node};
use flowforge_node::{
  ChannelNotifier, EventKind, ExecContext, ExecResult, NodeBehavior, NodeDef, NodeError,
  NodeRegistry, PortDef, RunEvent, from_fn,
};
use flowforge_runtime::{Evaluator, EvaluatorConfig, RunError, RunOptions, RunResult, run_graph};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Executions per node id.
type Counts = Arc<Mutex<HashMap<String, usize>>>;

fn count_of(counts: &Counts, node_id: &str) -> usize {
  counts.lock().unwrap().get(node_id).copied().unwrap_or(0)
}

/// `probe`: flow in/out, data input `x`, data output `v`.
///
/// `v` is the `x` input if wired, else the `value` field, else the node's
/// execution count. When `x` is present it is also written to the variable
/// named after the node.
fn probe(counts: Counts) -> NodeDef {
  let behavior = from_fn(move |ctx| {
    let count = {
      let mut counts = counts.lock().unwrap();
      let entry = counts.entry(ctx.node_id.to_string()).or_insert(0);
      *entry += 1;
      *entry
    };

    let v = ctx
      .input("x")
      .or_else(|| ctx.field("value"))
      .cloned()
      .unwrap_or(json!(count));

    let mut result = ExecResult::new().with_output("v", v);
    if let Some(x) = ctx.input("x") {
      result = result.with_var(ctx.node_id, x.clone());
    }
    Ok(result.then("out"))
  });

  NodeDef::new("probe", "Probe", behavior)
    .input(PortDef::flow("in", "In"))
    .input(PortDef::data("x", "X"))
    .output(PortDef::flow("out", "Out"))
    .output(PortDef::data("v", "V"))
}

/// `fail`: always fails.
fn fail() -> NodeDef {
  NodeDef::new(
    "fail",
    "Fail",
    from_fn(|_| Err(NodeError::failed("boom"))),
  )
  .input(PortDef::flow("in", "In"))
}

/// `setvar`: writes `data.key = data.value`.
fn set_var() -> NodeDef {
  let behavior = from_fn(|ctx| {
    let key = ctx.field("key").and_then(Value::as_str).unwrap_or("k");
    let value = ctx.field("value").cloned().unwrap_or(Value::Null);
    Ok(ExecResult::new().with_var(key, value).then("out"))
  });
  NodeDef::new("setvar", "Set Var", behavior)
    .input(PortDef::flow("in", "In"))
    .output(PortDef::flow("out", "Out"))
}

/// `readvar`: copies the run variable named by `data.key` into `seen`.
fn read_var() -> NodeDef {
  let behavior = from_fn(|ctx| {
    let key = ctx.field("key").and_then(Value::as_str).unwrap_or("k");
    let seen = ctx.vars.get(key).cloned().unwrap_or(Value::Null);
    ctx.info(format!("saw {seen}"));
    Ok(ExecResult::new().with_var("seen", seen).then("out"))
  });
  NodeDef::new("readvar", "Read Var", behavior)
    .input(PortDef::flow("in", "In"))
    .output(PortDef::flow("out", "Out"))
}

/// `sum`: flow in/out, data inputs `x` and `y`, data output `v = x + y`.
/// The total is also written to the variable named after the node.
fn sum(counts: Counts) -> NodeDef {
  let behavior = from_fn(move |ctx| {
    *counts
      .lock()
      .unwrap()
      .entry(ctx.node_id.to_string())
      .or_insert(0) += 1;

    let total: u64 = ["x", "y"]
      .iter()
      .filter_map(|port| ctx.input(port))
      .filter_map(Value::as_u64)
      .sum();
    Ok(
      ExecResult::new()
        .with_output("v", json!(total))
        .with_var(ctx.node_id, json!(total))
        .then("out"),
    )
  });

  NodeDef::new("sum", "Sum", behavior)
    .input(PortDef::flow("in", "In"))
    .input(PortDef::data("x", "X"))
    .input(PortDef::data("y", "Y"))
    .output(PortDef::flow("out", "Out"))
    .output(PortDef::data("v", "V"))
}

/// `inc`: data only, `v = x + 1` (`x` defaults to 0). Touches no variables.
fn inc() -> NodeDef {
  let behavior = from_fn(|ctx| {
    let x = ctx.input("x").and_then(Value::as_u64).unwrap_or(0);
    Ok(ExecResult::new().with_output("v", json!(x + 1)))
  });

  NodeDef::new("inc", "Inc", behavior)
    .input(PortDef::data("x", "X"))
    .output(PortDef::data("v", "V"))
}

struct Sleep;

#[async_trait]
impl NodeBehavior for Sleep {
  async fn exec(&self, ctx: ExecContext<'_>) -> Result<ExecResult, NodeError> {
    ctx.suspend(Duration::from_secs(10)).await?;
    Ok(ExecResult::new().then("out"))
  }
}

fn sleep() -> NodeDef {
  NodeDef::new("sleep", "Sleep", Sleep)
    .input(PortDef::flow("in", "In"))
    .output(PortDef::flow("out", "Out"))
}

fn registry(counts: &Counts) -> NodeRegistry {
  NodeRegistry::new()
    .with(probe(counts.clone()))
    .with(sum(counts.clone()))
    .with(inc())
    .with(fail())
    .with(set_var())
    .with(read_var())
    .with(sleep())
}

fn node(id: &str, node_type: &str) -> Node {
  Node::new(id, node_type)
}

fn node_with(id: &str, node_type: &str, data: Value) -> Node {
  let data: DataBag = serde_json::from_value(data).unwrap();
  Node::new(id, node_type).with_data(data)
}

fn flow(id: &str, from: &str, to: &str) -> Edge {
  Edge::new(id, Endpoint::new(from, "out"), Endpoint::new(to, "in"))
}

fn wire(id: &str, from: &str, to: &str) -> Edge {
  Edge::new(id, Endpoint::new(from, "v"), Endpoint::new(to, "x"))
}

fn graph(nodes: Vec<Node>, edges: Vec<Edge>) -> Graph {
  let mut graph = Graph::new("test-graph", "Test Graph");
  graph.nodes = nodes;
  graph.edges = edges;
  graph
}

async fn run(graph: &Graph, counts: &Counts, start: &str) -> RunResult {
  Evaluator::new(EvaluatorConfig::default())
    .run(graph, &registry(counts), start)
    .await
}

fn messages(result: &RunResult) -> Vec<String> {
  result.events.iter().map(ToString::to_string).collect()
}

fn assert_single_trailing_error(result: &RunResult) {
  assert!(!result.ok);
  let errors = result
    .events
    .iter()
    .filter(|e| e.kind() == EventKind::Error)
    .count();
  assert_eq!(errors, 1);
  assert_eq!(result.events.last().unwrap().kind(), EventKind::Error);
}

#[tokio::test]
async fn test_breadth_first_order() {
  let counts = Counts::default();
  let graph = graph(
    vec![
      node("t", "probe"),
      node("a", "probe"),
      node("b", "probe"),
      node("c", "probe"),
    ],
    vec![flow("e1", "t", "a"), flow("e2", "t", "b"), flow("e3", "a", "c")],
  );

  let result = run(&graph, &counts, "t").await;

  assert!(result.ok, "{:?}", result.error);
  assert_eq!(result.executed_nodes(), vec!["t", "a", "b", "c"]);
  assert_eq!(result.events.first().unwrap().msg(), Some("Run started."));
  assert_eq!(result.events.last().unwrap().msg(), Some("Run complete."));
  // t.out, a.out, b.out, c.out
  assert_eq!(result.steps, 4);
}

#[tokio::test]
async fn test_data_source_pulled_once_for_fan_out() {
  let counts = Counts::default();
  let graph = graph(
    vec![
      node("t", "probe"),
      node_with("s", "probe", json!({ "value": "shared" })),
      node("a", "probe"),
      node("b", "probe"),
    ],
    vec![
      flow("e1", "t", "a"),
      flow("e2", "a", "b"),
      wire("w1", "s", "a"),
      wire("w2", "s", "b"),
    ],
  );

  let result = run(&graph, &counts, "t").await;

  assert!(result.ok);
  assert_eq!(count_of(&counts, "s"), 1);
  assert_eq!(result.vars["a"], json!("shared"));
  assert_eq!(result.vars["b"], json!("shared"));
  // Pulled nodes get no step event.
  assert_eq!(result.executed_nodes(), vec!["t", "a", "b"]);
}

#[tokio::test]
async fn test_diamond_source_pulled_once() {
  let counts = Counts::default();
  // d pulls b and c, which both pull a.
  let graph = graph(
    vec![
      node("t", "probe"),
      node_with("a", "probe", json!({ "value": 2 })),
      node("b", "probe"),
      node("c", "probe"),
      node("d", "sum"),
    ],
    vec![
      flow("e1", "t", "d"),
      wire("w1", "a", "b"),
      wire("w2", "a", "c"),
      wire("w3", "b", "d"),
      Edge::new("w4", Endpoint::new("c", "v"), Endpoint::new("d", "y")),
    ],
  );

  let result = run(&graph, &counts, "t").await;

  assert!(result.ok, "{:?}", result.error);
  assert_eq!(count_of(&counts, "a"), 1);
  assert_eq!(count_of(&counts, "b"), 1);
  assert_eq!(count_of(&counts, "c"), 1);
  assert_eq!(count_of(&counts, "d"), 1);
  assert_eq!(result.vars["b"], json!(2));
  assert_eq!(result.vars["c"], json!(2));
  assert_eq!(result.vars["d"], json!(4));
  assert_eq!(result.executed_nodes(), vec!["t", "d"]);
}

#[tokio::test]
async fn test_shared_source_resolved_once_within_one_pull() {
  let counts = Counts::default();
  // e pulls b then a, and b also pulls a: a is queued twice but runs once.
  let graph = graph(
    vec![
      node("t", "probe"),
      node_with("a", "probe", json!({ "value": 3 })),
      node("b", "probe"),
      node("e", "sum"),
      node("d", "probe"),
    ],
    vec![
      flow("e1", "t", "d"),
      wire("w1", "e", "d"),
      wire("w2", "b", "e"),
      Edge::new("w3", Endpoint::new("a", "v"), Endpoint::new("e", "y")),
      wire("w4", "a", "b"),
    ],
  );

  let result = run(&graph, &counts, "t").await;

  assert!(result.ok, "{:?}", result.error);
  assert_eq!(count_of(&counts, "a"), 1);
  assert_eq!(count_of(&counts, "b"), 1);
  assert_eq!(count_of(&counts, "e"), 1);
  assert_eq!(result.vars["d"], json!(6));
}

#[tokio::test]
async fn test_long_data_chain() {
  const LEN: usize = 20_000;

  let counts = Counts::default();
  let mut nodes: Vec<Node> = (0..LEN).map(|i| node(&format!("n{i}"), "inc")).collect();
  nodes.push(node("t", "probe"));
  nodes.push(node("end", "probe"));

  let mut edges: Vec<Edge> = (1..LEN)
    .map(|i| wire(&format!("w{i}"), &format!("n{}", i - 1), &format!("n{i}")))
    .collect();
  edges.push(wire("w-end", &format!("n{}", LEN - 1), "end"));
  edges.push(flow("e1", "t", "end"));

  let graph = graph(nodes, edges);

  let result = run(&graph, &counts, "t").await;

  assert!(result.ok, "{:?}", result.error);
  assert_eq!(result.vars["end"], json!(LEN));
  assert_eq!(result.executed_nodes(), vec!["t", "end"]);
}

#[tokio::test]
async fn test_transitive_pull() {
  let counts = Counts::default();
  let graph = graph(
    vec![
      node("t", "probe"),
      node_with("s1", "probe", json!({ "value": 7 })),
      node("s2", "probe"),
      node("a", "probe"),
    ],
    vec![flow("e1", "t", "a"), wire("w1", "s1", "s2"), wire("w2", "s2", "a")],
  );

  let result = run(&graph, &counts, "t").await;

  assert!(result.ok);
  assert_eq!(result.vars["s2"], json!(7));
  assert_eq!(result.vars["a"], json!(7));
  assert_eq!(count_of(&counts, "s1"), 1);
  assert_eq!(count_of(&counts, "s2"), 1);
}

#[tokio::test]
async fn test_control_execution_overwrites_cache() {
  let counts = Counts::default();
  // a pulls c, then c runs through flow, then b pulls c again.
  let graph = graph(
    vec![
      node("t", "probe"),
      node("a", "probe"),
      node("c", "probe"),
      node("b", "probe"),
    ],
    vec![
      flow("e1", "t", "a"),
      flow("e2", "a", "c"),
      flow("e3", "c", "b"),
      wire("w1", "c", "a"),
      wire("w2", "c", "b"),
    ],
  );

  let result = run(&graph, &counts, "t").await;

  assert!(result.ok);
  assert_eq!(count_of(&counts, "c"), 2);
  assert_eq!(result.vars["a"], json!(1));
  assert_eq!(result.vars["b"], json!(2));
  assert_eq!(result.executed_nodes(), vec!["t", "a", "c", "b"]);
}

#[tokio::test]
async fn test_flow_join_executes_twice() {
  let counts = Counts::default();
  let graph = graph(
    vec![
      node("t", "probe"),
      node("a", "probe"),
      node("b", "probe"),
      node("j", "probe"),
    ],
    vec![
      flow("e1", "t", "a"),
      flow("e2", "t", "b"),
      flow("e3", "a", "j"),
      flow("e4", "b", "j"),
    ],
  );

  let result = run(&graph, &counts, "t").await;

  assert!(result.ok);
  assert_eq!(result.executed_nodes(), vec!["t", "a", "b", "j", "j"]);
  assert_eq!(count_of(&counts, "j"), 2);
}

#[tokio::test]
async fn test_first_data_edge_wins() {
  let counts = Counts::default();
  let graph = graph(
    vec![
      node("t", "probe"),
      node_with("s1", "probe", json!({ "value": "first" })),
      node_with("s2", "probe", json!({ "value": "second" })),
      node("a", "probe"),
    ],
    vec![flow("e1", "t", "a"), wire("w1", "s1", "a"), wire("w2", "s2", "a")],
  );

  let result = run(&graph, &counts, "t").await;

  assert!(result.ok);
  assert_eq!(result.vars["a"], json!("first"));
  assert_eq!(count_of(&counts, "s2"), 0);
}

#[tokio::test]
async fn test_missing_output_key_leaves_input_absent() {
  let counts = Counts::default();
  let graph = graph(
    vec![node("t", "probe"), node("s", "probe"), node("a", "probe")],
    vec![
      flow("e1", "t", "a"),
      Edge::new("w1", Endpoint::new("s", "nope"), Endpoint::new("a", "x")),
    ],
  );

  let result = run(&graph, &counts, "t").await;

  assert!(result.ok);
  assert!(!result.vars.contains_key("a"));
  // The source still executed.
  assert_eq!(count_of(&counts, "s"), 1);
}

#[tokio::test]
async fn test_step_budget_stops_flow_cycle() {
  let counts = Counts::default();
  let graph = graph(
    vec![node("a", "probe"), node("b", "probe")],
    vec![flow("e1", "a", "b"), flow("e2", "b", "a")],
  );
  let evaluator = Evaluator::new(EvaluatorConfig { max_steps: 5 });

  let result = evaluator.run(&graph, &registry(&counts), "a").await;

  assert_single_trailing_error(&result);
  assert!(matches!(
    result.error,
    Some(RunError::StepBudgetExceeded { max_steps: 5 })
  ));
  assert_eq!(
    result.events.last().unwrap().msg(),
    Some("Run stopped: exceeded max steps (5).")
  );
  assert_eq!(result.steps, 5);
  // The start node plus one execution per processed step.
  assert_eq!(result.executed_nodes().len(), 6);
}

#[tokio::test]
async fn test_step_budget_of_one() {
  let counts = Counts::default();
  let graph = graph(
    vec![node("a", "probe"), node("b", "probe")],
    vec![flow("e1", "a", "b"), flow("e2", "b", "a")],
  );

  let result = run_graph(&graph, &registry(&counts), "a", Some(1)).await;

  assert_single_trailing_error(&result);
  assert_eq!(result.executed_nodes(), vec!["a", "b"]);
}

#[tokio::test]
async fn test_default_budget() {
  let counts = Counts::default();
  let graph = graph(
    vec![node("a", "probe")],
    vec![flow("e1", "a", "a")],
  );

  let result = run_graph(&graph, &registry(&counts), "a", None).await;

  assert!(matches!(
    result.error,
    Some(RunError::StepBudgetExceeded { max_steps: 200 })
  ));
  assert_eq!(count_of(&counts, "a"), 201);
}

#[tokio::test]
async fn test_vars_visible_to_later_nodes() {
  let counts = Counts::default();
  let graph = graph(
    vec![
      node_with("s1", "setvar", json!({ "key": "k", "value": 1 })),
      node_with("r", "readvar", json!({ "key": "k" })),
      node_with("s2", "setvar", json!({ "key": "other", "value": true })),
      node_with("s3", "setvar", json!({ "key": "k", "value": 2 })),
    ],
    vec![flow("e1", "s1", "r"), flow("e2", "r", "s2"), flow("e3", "s2", "s3")],
  );

  let result = run(&graph, &counts, "s1").await;

  assert!(result.ok);
  assert_eq!(result.vars["k"], json!(2));
  assert_eq!(result.vars["other"], json!(true));
  // r ran between the two writes of k.
  assert_eq!(result.vars["seen"], json!(1));

  let info = result
    .events
    .iter()
    .find(|e| e.node_id() == Some("r") && e.kind() == EventKind::Info)
    .unwrap();
  assert_eq!(info.msg(), Some("saw 1"));
}

#[tokio::test]
async fn test_node_failure_is_fatal() {
  let counts = Counts::default();
  let graph = graph(
    vec![
      node_with("s", "setvar", json!({ "key": "k", "value": 1 })),
      node("f", "fail"),
      node("after", "probe"),
    ],
    vec![flow("e1", "s", "f"), flow("e2", "s", "after")],
  );

  let result = run(&graph, &counts, "s").await;

  assert_single_trailing_error(&result);
  assert!(matches!(
    &result.error,
    Some(RunError::NodeExecutionFailure { node_id, .. }) if node_id == "f"
  ));
  let last = result.events.last().unwrap();
  assert_eq!(last.node_id(), Some("f"));
  assert_eq!(last.msg(), Some("Node f failed: boom"));
  // Merges before the failure are kept, nothing after it runs.
  assert_eq!(result.vars["k"], json!(1));
  assert_eq!(count_of(&counts, "after"), 0);
}

#[tokio::test]
async fn test_unknown_node_type() {
  let counts = Counts::default();
  let graph = graph(
    vec![node("t", "probe"), node("m", "mystery")],
    vec![flow("e1", "t", "m")],
  );

  let result = run(&graph, &counts, "t").await;

  assert_single_trailing_error(&result);
  assert!(matches!(
    &result.error,
    Some(RunError::UnknownNodeType { node_id, node_type }) if node_id == "m" && node_type == "mystery"
  ));
}

#[tokio::test]
async fn test_missing_flow_target() {
  let counts = Counts::default();
  let graph = graph(vec![node("t", "probe")], vec![flow("e1", "t", "ghost")]);

  let result = run(&graph, &counts, "t").await;

  assert_single_trailing_error(&result);
  assert!(matches!(
    &result.error,
    Some(RunError::MissingReferencedNode { node_id, edge_id }) if node_id == "ghost" && edge_id == "e1"
  ));
}

#[tokio::test]
async fn test_missing_data_source() {
  let counts = Counts::default();
  let graph = graph(vec![node("t", "probe")], vec![wire("w1", "ghost", "t")]);

  let result = run(&graph, &counts, "t").await;

  assert_single_trailing_error(&result);
  assert!(matches!(
    &result.error,
    Some(RunError::MissingReferencedNode { node_id, .. }) if node_id == "ghost"
  ));
  // Failure happened while resolving inputs, before the step event.
  assert!(result.executed_nodes().is_empty());
}

#[tokio::test]
async fn test_start_node_not_found() {
  let counts = Counts::default();
  let graph = graph(vec![node("t", "probe")], vec![]);

  let result = run(&graph, &counts, "nope").await;

  assert_single_trailing_error(&result);
  assert_eq!(result.events.len(), 2);
  assert_eq!(result.events[0].msg(), Some("Run started."));
  assert_eq!(
    result.events[1].msg(),
    Some("Start node not found: nope")
  );
  assert_eq!(result.steps, 0);
  assert!(result.vars.is_empty());
}

#[tokio::test]
async fn test_cyclic_data_dependency() {
  let counts = Counts::default();
  let graph = graph(
    vec![node("t", "probe"), node("x", "probe"), node("y", "probe")],
    vec![flow("e1", "t", "x"), wire("w1", "y", "x"), wire("w2", "x", "y")],
  );

  let result = run(&graph, &counts, "t").await;

  assert_single_trailing_error(&result);
  assert!(matches!(
    result.error,
    Some(RunError::CyclicDependency { .. })
  ));
  assert_eq!(count_of(&counts, "x"), 0);
  assert_eq!(count_of(&counts, "y"), 0);
}

#[tokio::test]
async fn test_self_wired_data_input_is_cyclic() {
  let counts = Counts::default();
  let graph = graph(
    vec![node("t", "probe"), node("a", "probe")],
    vec![flow("e1", "t", "a"), wire("w1", "a", "a")],
  );

  let result = run(&graph, &counts, "t").await;

  assert!(matches!(
    &result.error,
    Some(RunError::CyclicDependency { node_id }) if node_id == "a"
  ));
  assert_eq!(result.executed_nodes(), vec!["t"]);
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_interrupts_suspension() {
  let counts = Counts::default();
  let graph = graph(
    vec![node("t", "probe"), node("s", "sleep"), node("after", "probe")],
    vec![flow("e1", "t", "s"), flow("e2", "s", "after")],
  );
  let registry = registry(&counts);
  let cancel = CancellationToken::new();

  let trigger = cancel.clone();
  tokio::spawn(async move {
    tokio::time::sleep(Duration::from_secs(1)).await;
    trigger.cancel();
  });

  let started = tokio::time::Instant::now();
  let result = Evaluator::new(EvaluatorConfig::default())
    .run_with(&graph, &registry, "t", RunOptions::default().cancel(cancel))
    .await;

  assert_single_trailing_error(&result);
  assert!(matches!(result.error, Some(RunError::Cancelled)));
  assert!(started.elapsed() < Duration::from_secs(10));
  assert_eq!(count_of(&counts, "after"), 0);
}

#[tokio::test]
async fn test_cancelled_before_first_step() {
  let counts = Counts::default();
  let graph = graph(
    vec![node("t", "probe"), node("a", "probe")],
    vec![flow("e1", "t", "a")],
  );
  let cancel = CancellationToken::new();
  cancel.cancel();

  let result = Evaluator::new(EvaluatorConfig::default())
    .run_with(&graph, &registry(&counts), "t", RunOptions::default().cancel(cancel))
    .await;

  assert!(matches!(result.error, Some(RunError::Cancelled)));
  // The start node runs before the first dequeue.
  assert_eq!(result.executed_nodes(), vec!["t"]);
}

#[tokio::test]
async fn test_notifier_sees_every_event() {
  let counts = Counts::default();
  let graph = graph(
    vec![node("t", "probe"), node("a", "probe")],
    vec![flow("e1", "t", "a")],
  );
  let (notifier, mut rx) = ChannelNotifier::channel();
  let evaluator = Evaluator::with_notifier(EvaluatorConfig::default(), notifier);

  let result = evaluator.run(&graph, &registry(&counts), "t").await;

  let mut streamed: Vec<RunEvent> = Vec::new();
  while let Ok(event) = rx.try_recv() {
    streamed.push(event);
  }
  assert_eq!(streamed, result.events);
}

#[tokio::test]
async fn test_runs_are_deterministic() {
  let counts = Counts::default();
  let graph = graph(
    vec![
      node("t", "probe"),
      node_with("s", "setvar", json!({ "key": "k", "value": "x" })),
      node("a", "probe"),
      node_with("r", "readvar", json!({ "key": "k" })),
    ],
    vec![flow("e1", "t", "s"), flow("e2", "t", "a"), flow("e3", "s", "r")],
  );

  let first = run(&graph, &counts, "t").await;
  let second = run(&graph, &counts, "t").await;

  assert_eq!(messages(&first), messages(&second));
  assert_eq!(first.vars, second.vars);
  assert_ne!(first.run_id, second.run_id);
}

#[tokio::test]
async fn test_result_serializes_error_message() {
  let counts = Counts::default();
  let graph = graph(vec![], vec![]);

  let result = run(&graph, &counts, "t").await;
  let json = serde_json::to_value(&result).unwrap();

  assert_eq!(json["ok"], json!(false));
  assert_eq!(json["error"], json!("Start node not found: t"));
  assert_eq!(json["events"][1]["kind"], json!("error"));
  assert!(json["runId"].is_string());
}
