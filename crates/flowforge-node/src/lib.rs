//! Flowforge Node
//!
//! The contract between the evaluator and node behaviors. A node kind is a
//! [`NodeDef`]: a port schema plus one [`NodeBehavior`] that the evaluator
//! calls with an [`ExecContext`]. Node kinds are added by registering
//! definitions in a [`NodeRegistry`]; the evaluator never special-cases a
//! node type.
//!
//! Behaviors talk back to the run through the context only:
//! - `emit` appends a [`RunEvent`] to the run's log
//! - `suspend` cooperatively waits, honoring the run's cancellation signal
//! - the returned [`ExecResult`] carries outputs, a vars patch and the flow
//!   ports to activate

mod context;
mod definition;
mod error;
mod event;
mod notify;
mod port;
mod registry;

pub use context::{ExecContext, Suspender};
pub use definition::{ExecResult, FnBehavior, NodeBehavior, NodeDef, from_fn};
pub use error::NodeError;
pub use event::{EventKind, EventLog, RunEvent, TOAST_PREFIX};
pub use notify::{ChannelNotifier, NoopNotifier, RunNotifier};
pub use port::{PortDef, PortKind};
pub use registry::NodeRegistry;

/// Run-scoped variables shared by every node execution.
pub type Vars = serde_json::Map<String, serde_json::Value>;

/// A node's resolved data inputs, or its data outputs.
pub type Values = serde_json::Map<String, serde_json::Value>;
