//! exchange-server
//!
//! Concurrent runtime around `exchange-core`:
//! - one router task demultiplexing the inbound stream,
//! - one engine task per instrument, spawned on first sight,
//! - a submission handle that waits for each event's completion,
//! - a TCP connection layer feeding text commands into it.

pub mod config;
pub mod error;
pub mod exchange;
pub mod server;
pub mod shutdown;
pub mod sink;
pub mod types;

// these are internal modules, not re-exported
mod client;
mod engine_task;
mod router;

pub use error::ExchangeError;
pub use exchange::{Exchange, Submitter};
pub use sink::{ChannelSink, NotificationSink, StdoutSink};
