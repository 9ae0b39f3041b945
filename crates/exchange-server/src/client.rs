// crates/exchange-server/src/client.rs

//! Per-connection intake loop.
//!
//! Each TCP connection is one submission context: a line is parsed,
//! submitted, and the next line is only read once the previous event
//! has completed. Notifications go to the shared sink, not back over
//! the socket.

use exchange_protocol::parse_input_line;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::exchange::Submitter;
use crate::shutdown::ShutdownSignal;

/// Identifier for a connected client, unique over the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub u64);

/// Run the read-submit-wait loop for a single connection.
pub(crate) async fn run_client(
    client_id: ClientId,
    stream: TcpStream,
    mut submitter: Submitter,
    mut shutdown: ShutdownSignal,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(stream).lines();

    loop {
        let line = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            info!(client = client_id.0, "client disconnected");
            break;
        };

        match parse_input_line(&line) {
            Ok(Some(event)) => {
                debug!(client = client_id.0, ?event, "submitting");
                if let Err(e) = submitter.submit(event).await {
                    info!(client = client_id.0, error = %e, "closing client");
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!(client = client_id.0, line = %line.trim(), error = %e, "invalid input");
            }
        }
    }

    Ok(())
}
