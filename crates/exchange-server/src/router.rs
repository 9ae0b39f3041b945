//! Router task: demultiplexes the global inbound stream onto the
//! per-instrument engine queues.
//!
//! For each submission:
//! 1. Resolve a missing instrument (cancels) through the routing table;
//!    unresolvable cancels are rejected here and never reach an engine.
//! 2. Remember the instrument of every buy/sell for later cancels.
//! 3. Forward to the instrument's engine, spawning it on first sight.
//!
//! The router is the only reader and writer of both tables, so they
//! need no lock. Forwarding preserves consumption order per instrument.

use std::collections::HashMap;

use exchange_core::{Routed, RoutingTable};
use tracing::{debug, info, warn};

use crate::engine_task::{spawn_engine, EngineHandle};
use crate::shutdown::ShutdownSignal;
use crate::types::{InboundRx, SharedSink, Submission};

pub(crate) async fn run_router(
    mut inbound: InboundRx,
    queue_capacity: usize,
    sink: SharedSink,
    mut shutdown: ShutdownSignal,
) {
    let mut routing = RoutingTable::new();

    // Instrument -> engine queue.
    let mut engines: HashMap<String, EngineHandle> = HashMap::new();

    loop {
        let submission = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            next = inbound.recv() => match next {
                Some(submission) => submission,
                None => break,
            },
        };

        let Submission { event, done } = submission;
        let event = match routing.route(event) {
            Routed::Forward(event) => event,
            Routed::Rejected(notification) => {
                debug!(?notification, "cancel for unknown order rejected by router");
                sink.notify(&notification);
                let _ = done.send(());
                continue;
            }
        };

        let engine_tx = engines
            .entry(event.instrument.clone())
            .or_insert_with(|| {
                spawn_engine(
                    &event.instrument,
                    queue_capacity,
                    sink.clone(),
                    shutdown.clone(),
                )
            })
            .tx
            .clone();

        let instrument = event.instrument.clone();
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            sent = engine_tx.send(Submission { event, done }) => {
                if sent.is_err() {
                    // Dropping the submission releases its submitter with an error.
                    warn!(%instrument, "engine queue closed; event dropped");
                }
            }
        }
    }

    info!(
        instruments = engines.len(),
        routed_orders = routing.len(),
        "router stopping"
    );

    // Closing every queue lets engines finish even without a shutdown.
    let joins: Vec<_> = engines.into_values().map(|handle| handle.join).collect();
    for join in joins {
        if let Err(e) = join.await {
            warn!(error = %e, "engine task failed");
        }
    }
}
