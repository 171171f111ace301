//! Flowforge Workflow
//!
//! This crate provides the read-only query surface the evaluator uses over a
//! [`flowforge_config::Graph`]. The graph itself is never mutated during a run;
//! [`GraphIndex`] borrows it and answers "which edges leave this port" and
//! "which edges arrive at this port" in graph edge-list order.

mod graph;

pub use graph::GraphIndex;
