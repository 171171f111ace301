//! Flowforge Runtime
//!
//! The execution engine. Given a graph, a node registry and a start node, the
//! [`Evaluator`] runs the graph and returns a [`RunResult`] holding the ordered
//! event log and the final run variables.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        GraphRunner                          │
//! │  - owns an mpsc channel of run requests                     │
//! │  - executes them one at a time (runs never overlap)         │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Evaluator                           │
//! │  - run(graph, registry, start) → RunResult                  │
//! │  - control flow: breadth-first, re-executing, step budget   │
//! │  - data: lazy pull, memoized in a per-run output cache      │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   NodeDef behaviors                         │
//! │  - exec(ctx) with inputs, vars, emit, suspend               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use flowforge_runtime::{Evaluator, EvaluatorConfig};
//!
//! let evaluator = Evaluator::new(EvaluatorConfig::default());
//! let result = evaluator.run(&graph, &registry, "trigger").await;
//!
//! for event in &result.events {
//!     println!("{event}");
//! }
//! ```

mod cache;
mod config;
mod error;
mod evaluator;
mod execution;
mod result;
mod runner;
mod state;

pub use cache::OutputCache;
pub use config::{DEFAULT_MAX_STEPS, EvaluatorConfig, RunOptions};
pub use error::{RunError, RunnerError};
pub use evaluator::{Evaluator, run_graph};
pub use result::RunResult;
pub use runner::{GraphRunner, RunnerHandle};
pub use state::RunState;
