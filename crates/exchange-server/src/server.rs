//! TCP listener and top-level server wiring.
//!
//! This module:
//! - Starts the [`Exchange`] (router + engines).
//! - Listens on the configured address/port.
//! - Accepts connections up to `max_clients`, one client task each.
//! - Shuts everything down when the supplied future resolves.

use std::future::Future;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::client::{self, ClientId};
use crate::config::Config;
use crate::exchange::Exchange;
use crate::types::SharedSink;

/// Counter for assigning unique `ClientId`s.
static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

fn next_client_id() -> ClientId {
    ClientId(NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Decrements the live-connection count when a client task ends.
struct ConnectionSlot(Arc<AtomicUsize>);

impl Drop for ConnectionSlot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Run the TCP server until `stop` resolves.
pub async fn run(
    config: Config,
    sink: SharedSink,
    stop: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr_string();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "listening");

    serve(listener, config, sink, stop).await
}

/// Same as [`run`] on an already bound listener.
pub async fn serve(
    listener: TcpListener,
    config: Config,
    sink: SharedSink,
    stop: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    let exchange = Exchange::start(config.queue_capacity, sink);
    let active = Arc::new(AtomicUsize::new(0));
    tokio::pin!(stop);

    let result = loop {
        let (stream, peer_addr) = tokio::select! {
            _ = &mut stop => break Ok(()),
            accepted = listener.accept() => match accepted {
                Ok(conn) => conn,
                Err(e) => break Err(e.into()),
            },
        };

        if active.load(Ordering::Acquire) >= config.max_clients {
            warn!(
                %peer_addr,
                max_clients = config.max_clients,
                "rejecting connection: max_clients reached"
            );
            // Just drop the stream; client will see the connection closed.
            continue;
        }

        let client_id = next_client_id();
        info!(client = client_id.0, %peer_addr, "accepted connection");

        active.fetch_add(1, Ordering::AcqRel);
        let slot = ConnectionSlot(active.clone());
        let submitter = exchange.submitter();
        let shutdown = exchange.shutdown_signal();

        tokio::spawn(async move {
            let _slot = slot;
            if let Err(e) = client::run_client(client_id, stream, submitter, shutdown).await {
                error!(client = client_id.0, error = %e, "client error");
            }
        });
    };

    info!("shutting down");
    exchange.shutdown().await;
    result
}
