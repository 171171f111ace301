//! Flowforge Config
//!
//! This crate contains the serializable graph types for flowforge. These types
//! are the exact import/export format of a graph: what the editor persists and
//! what the CLI loads with `flowforge run graph.json`.
//!
//! Node `data` bags are opaque here. They round-trip untouched and are only
//! interpreted by the node behavior that executes them.
//!
//! ```json
//! {
//!   "id": "g1",
//!   "name": "Demo Flow",
//!   "nodes": [
//!     { "id": "t", "type": "trigger.manual", "pos": { "x": 80, "y": 80 }, "data": {} }
//!   ],
//!   "edges": []
//! }
//! ```

mod edge;
mod error;
mod graph;
mod node;

pub use edge::{Edge, Endpoint};
pub use error::ConfigError;
pub use graph::Graph;
pub use node::{DataBag, Node, Position};
