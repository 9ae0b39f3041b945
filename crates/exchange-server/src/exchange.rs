//! Entry point to the concurrent exchange.
//!
//! [`Exchange::start`] spawns the router; engines appear as instruments
//! are seen. Callers obtain a [`Submitter`] per submission context and
//! await each event's completion before sending the next.

use exchange_core::OrderEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::ExchangeError;
use crate::router::run_router;
use crate::shutdown::{Shutdown, ShutdownSignal};
use crate::types::{InboundTx, SharedSink, Submission};

/// Running exchange: router task, engine tasks and shared shutdown.
#[derive(Debug)]
pub struct Exchange {
    inbound: InboundTx,
    shutdown: Shutdown,
    router: JoinHandle<()>,
}

impl Exchange {
    /// Spawn the router on the current tokio runtime.
    ///
    /// `queue_capacity` bounds the inbound queue and each engine queue;
    /// producers wait while a queue is full.
    pub fn start(queue_capacity: usize, sink: SharedSink) -> Self {
        let queue_capacity = queue_capacity.max(1);
        let (inbound, inbound_rx) = mpsc::channel(queue_capacity);
        let shutdown = Shutdown::new();

        let router = tokio::spawn(run_router(
            inbound_rx,
            queue_capacity,
            sink,
            shutdown.signal(),
        ));
        info!(queue_capacity, "exchange started");

        Exchange {
            inbound,
            shutdown,
            router,
        }
    }

    /// A new submission context.
    pub fn submitter(&self) -> Submitter {
        Submitter {
            inbound: self.inbound.clone(),
        }
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Stop the router and every engine, abandoning in-flight events.
    pub async fn shutdown(self) {
        self.shutdown.trigger();
        if let Err(e) = self.router.await {
            warn!(error = %e, "router task failed");
        }
        info!("exchange stopped");
    }
}

/// One submission context: at most one event in flight at a time.
#[derive(Debug, Clone)]
pub struct Submitter {
    inbound: InboundTx,
}

impl Submitter {
    /// Enqueue `event` and wait until it has been fully processed.
    ///
    /// Returns once every notification for the event has been handed to
    /// the sink. Fails only if the exchange shuts down first.
    pub async fn submit(&mut self, event: OrderEvent) -> Result<(), ExchangeError> {
        let (submission, completed) = Submission::new(event);
        self.inbound
            .send(submission)
            .await
            .map_err(|_| ExchangeError::ShutDown)?;
        completed.await.map_err(|_| ExchangeError::ShutDown)
    }
}
