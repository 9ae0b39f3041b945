//! Notification sinks.
//!
//! The router and engine tasks call [`NotificationSink::notify`] once per
//! added order, delete outcome and execution. Rendering is up to the sink.

use std::io::Write;

use exchange_core::Notification;
use exchange_protocol::format_notification;
use tokio::sync::mpsc;
use tracing::warn;

/// Receiver of trade and book events.
///
/// Called concurrently from every engine task, so implementations must
/// be cheap and must not block for long.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Writes one text line per notification to stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        StdoutSink
    }
}

impl NotificationSink for StdoutSink {
    fn notify(&self, notification: &Notification) {
        let line = format_notification(notification);
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{}", line) {
            warn!(error = %e, "failed to write notification");
        }
    }
}

/// Forwards notifications into an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelSink { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn notify(&self, notification: &Notification) {
        // Receiver gone means nobody is listening any more.
        let _ = self.tx.send(notification.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_sink_forwards_in_order() {
        let (sink, mut rx) = ChannelSink::new();
        sink.notify(&Notification::order_deleted(1, "X", true));
        sink.notify(&Notification::order_deleted(2, "X", false));

        let first = rx.try_recv().unwrap();
        let second = rx.try_recv().unwrap();
        assert!(matches!(first, Notification::OrderDeleted(d) if d.order_id == 1));
        assert!(matches!(second, Notification::OrderDeleted(d) if d.order_id == 2));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn channel_sink_tolerates_dropped_receiver() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        sink.notify(&Notification::order_deleted(1, "X", true));
    }
}
