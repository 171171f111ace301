use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use flowforge_config::Graph;
use flowforge_node::{ChannelNotifier, NodeRegistry, RunEvent};
use flowforge_nodes::{MANUAL_TRIGGER, PALETTE, builtin_registry, demo_graph};
use flowforge_runtime::{DEFAULT_MAX_STEPS, Evaluator, EvaluatorConfig, RunOptions};

/// FlowForge - run node graphs from the command line
#[derive(Parser)]
#[command(name = "flowforge")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run a graph from a start node
  Run {
    /// Path to the graph file (JSON)
    graph_file: PathBuf,

    /// Start node id (default: the first manual trigger)
    #[arg(long)]
    start: Option<String>,

    /// Control-flow step budget
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Print the run result as JSON instead of streaming the log
    #[arg(long)]
    json: bool,
  },

  /// Check node configuration without running
  Validate {
    /// Path to the graph file (JSON)
    graph_file: PathBuf,
  },

  /// List the available node kinds
  Nodes,

  /// Write the demo graph
  New {
    /// Output file (default: stdout)
    #[arg(long, short)]
    output: Option<PathBuf>,
  },
}

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flowforge=info"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}

#[tokio::main]
async fn main() -> Result<()> {
  init_tracing();
  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Run {
      graph_file,
      start,
      max_steps,
      json,
    }) => run_graph(&graph_file, start, max_steps, json).await?,
    Some(Commands::Validate { graph_file }) => validate_graph(&graph_file).await?,
    Some(Commands::Nodes) => list_nodes(),
    Some(Commands::New { output }) => write_demo(output).await?,
    None => {
      println!("flowforge - use --help to see available commands");
    }
  }

  Ok(())
}

async fn load_graph(path: &Path) -> Result<Graph> {
  let content = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("failed to read graph file: {}", path.display()))?;

  let graph = Graph::from_json(&content)
    .with_context(|| format!("failed to parse graph file: {}", path.display()))?;

  debug!(path = %path.display(), graph_id = %graph.id, nodes = graph.nodes.len(), "graph_loaded");
  Ok(graph)
}

fn default_start(graph: &Graph) -> Result<String> {
  graph
    .nodes
    .iter()
    .find(|node| node.node_type == MANUAL_TRIGGER)
    .map(|node| node.id.clone())
    .context("graph has no manual trigger; pass --start")
}

async fn run_graph(
  graph_file: &Path,
  start: Option<String>,
  max_steps: usize,
  json: bool,
) -> Result<()> {
  let graph = load_graph(graph_file).await?;
  let registry = builtin_registry();
  let start = match start {
    Some(start) => start,
    None => default_start(&graph)?,
  };

  eprintln!("Loaded graph: {} ({} nodes)", graph.name, graph.nodes.len());

  let (notifier, mut events) = ChannelNotifier::channel();
  let evaluator = Evaluator::with_notifier(EvaluatorConfig { max_steps }, notifier);

  // Stream the log as it is produced.
  let printer = tokio::spawn(async move {
    while let Some(event) = events.recv().await {
      if !json {
        print_event(&event);
      }
    }
  });

  let cancel = CancellationToken::new();
  let interrupt = cancel.clone();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      interrupt.cancel();
    }
  });

  let result = evaluator
    .run_with(&graph, &registry, &start, RunOptions::default().cancel(cancel))
    .await;

  // Dropping the evaluator closes the event channel.
  drop(evaluator);
  printer.await.context("event printer failed")?;

  if json {
    println!("{}", serde_json::to_string_pretty(&result)?);
  } else {
    eprintln!("Steps: {}", result.steps);
    println!("{}", serde_json::to_string_pretty(&result.vars)?);
  }

  if let Some(error) = result.error {
    bail!("run {} failed: {error}", result.run_id);
  }
  Ok(())
}

fn print_event(event: &RunEvent) {
  match event.toast_message() {
    Some(msg) => eprintln!(">> {msg}"),
    None => eprintln!("{event}"),
  }
}

async fn validate_graph(graph_file: &Path) -> Result<()> {
  let graph = load_graph(graph_file).await?;
  let registry = builtin_registry();

  let problems = collect_problems(&graph, &registry);
  if problems.is_empty() {
    println!("{}: ok", graph.name);
    return Ok(());
  }

  for problem in &problems {
    println!("{problem}");
  }
  bail!("{} problem(s) in {}", problems.len(), graph_file.display());
}

fn collect_problems(graph: &Graph, registry: &NodeRegistry) -> Vec<String> {
  let mut problems = Vec::new();
  for node in &graph.nodes {
    if !registry.contains(&node.node_type) {
      problems.push(format!("{}: unknown node type {}", node.id, node.node_type));
    } else if let Some(message) = registry.validate_node(node) {
      problems.push(format!("{}: {message}", node.id));
    }
  }
  for edge in &graph.edges {
    for endpoint in [&edge.from, &edge.to] {
      if graph.get_node(&endpoint.node_id).is_none() {
        problems.push(format!("edge {}: missing node {}", edge.id, endpoint.node_id));
      }
    }
  }
  problems
}

fn list_nodes() {
  let registry = builtin_registry();
  for entry in PALETTE {
    let Some(def) = registry.get(entry.node_type) else {
      continue;
    };
    let subtitle = def.subtitle.as_deref().unwrap_or_default();
    println!("{:<16} {:<10} {:<16} {subtitle}", def.node_type, entry.group, def.title);
  }
}

async fn write_demo(output: Option<PathBuf>) -> Result<()> {
  let json = demo_graph().to_json_pretty()?;

  match output {
    Some(path) => {
      tokio::fs::write(&path, json)
        .await
        .with_context(|| format!("failed to write graph file: {}", path.display()))?;
      eprintln!("Wrote demo graph to {}", path.display());
    }
    None => println!("{json}"),
  }
  Ok(())
}
