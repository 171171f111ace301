//! Run notifiers for live observability.
//!
//! Every event appended to a run's log is also handed to a notifier, so
//! consumers can stream events to a UI, render toasts, or persist them while
//! the run is still going.

use tokio::sync::mpsc;

use crate::event::RunEvent;

/// Trait for receiving run events as they are emitted.
///
/// Called synchronously from `emit`, in log order. Implementations must not
/// block.
pub trait RunNotifier: Send + Sync {
  fn notify(&self, event: &RunEvent);
}

/// A notifier that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl RunNotifier for NoopNotifier {
  fn notify(&self, _event: &RunEvent) {}
}

/// A notifier that sends events to an unbounded channel.
///
/// Unbounded so a slow consumer never stalls the run; event volume is a
/// handful per executed node.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  sender: mpsc::UnboundedSender<RunEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::UnboundedSender<RunEvent>) -> Self {
    Self { sender }
  }

  /// Create a notifier together with the receiving end of its channel.
  pub fn channel() -> (Self, mpsc::UnboundedReceiver<RunEvent>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (Self::new(sender), receiver)
  }
}

impl RunNotifier for ChannelNotifier {
  fn notify(&self, event: &RunEvent) {
    // Receiver may have been dropped
    let _ = self.sender.send(event.clone());
  }
}

impl<T: RunNotifier + ?Sized> RunNotifier for std::sync::Arc<T> {
  fn notify(&self, event: &RunEvent) {
    (**self).notify(event)
  }
}
