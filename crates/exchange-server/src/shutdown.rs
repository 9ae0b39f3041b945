//! Broadcast shutdown shared by the router, every engine task and the
//! TCP intake.
//!
//! Shutdown drops everything: workers stop at their next wait point and
//! queued events are abandoned.

use tokio::sync::watch;

/// Owning side: trips the signal for every [`ShutdownSignal`].
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

/// Observing side, cheap to clone into each worker.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Shutdown { tx }
    }

    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Shutdown::new()
    }
}

impl ShutdownSignal {
    /// Resolves once shutdown is triggered or the [`Shutdown`] is dropped.
    ///
    /// Cancel-safe, meant for `tokio::select!`.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn every_signal_observes_trigger() {
        let shutdown = Shutdown::new();
        let mut a = shutdown.signal();
        let mut b = shutdown.signal();

        let waiter = tokio::spawn(async move { a.cancelled().await });
        shutdown.trigger();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("signal a resolved")
            .unwrap();
        tokio::time::timeout(Duration::from_secs(1), b.cancelled())
            .await
            .expect("signal b resolved");
    }

    #[tokio::test]
    async fn dropping_the_owner_counts_as_shutdown() {
        let shutdown = Shutdown::new();
        let mut signal = shutdown.signal();
        drop(shutdown);
        tokio::time::timeout(Duration::from_secs(1), signal.cancelled())
            .await
            .expect("signal resolved");
    }

    #[tokio::test]
    async fn signal_created_after_trigger_is_already_cancelled() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        let mut late = shutdown.signal();
        tokio::time::timeout(Duration::from_secs(1), late.cancelled())
            .await
            .expect("late signal resolved");
    }
}
