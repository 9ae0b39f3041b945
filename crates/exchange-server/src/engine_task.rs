//! Per-instrument engine task.
//!
//! Each task exclusively owns one [`OrderBook`] and consumes its own
//! queue one submission at a time, so no locking is needed and
//! price-time priority follows directly from FIFO delivery.

use exchange_core::OrderBook;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::shutdown::ShutdownSignal;
use crate::types::{EngineRx, EngineTx, SharedSink, Submission};

/// Router-side handle to a running engine task.
#[derive(Debug)]
pub(crate) struct EngineHandle {
    pub tx: EngineTx,
    pub join: JoinHandle<()>,
}

/// Spawn a fresh engine (empty books) for `instrument`.
pub(crate) fn spawn_engine(
    instrument: &str,
    queue_capacity: usize,
    sink: SharedSink,
    shutdown: ShutdownSignal,
) -> EngineHandle {
    let (tx, rx) = mpsc::channel(queue_capacity);
    let book = OrderBook::new(instrument);
    info!(instrument, "spawning engine");
    let join = tokio::spawn(run_engine_loop(book, rx, sink, shutdown));
    EngineHandle { tx, join }
}

/// Run one instrument's processing loop until shutdown or until the
/// router drops the queue.
async fn run_engine_loop(
    mut book: OrderBook,
    mut rx: EngineRx,
    sink: SharedSink,
    mut shutdown: ShutdownSignal,
) {
    loop {
        let submission = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            next = rx.recv() => match next {
                Some(submission) => submission,
                None => break,
            },
        };

        let Submission { event, done } = submission;
        debug!(
            instrument = %book.instrument(),
            order_id = event.order_id,
            kind = ?event.kind,
            "engine received event"
        );

        for notification in book.handle(event) {
            sink.notify(&notification);
        }
        // The submitter may have given up already.
        let _ = done.send(());
    }

    info!(
        instrument = %book.instrument(),
        live_orders = book.live_orders(),
        "engine stopped"
    );
}
