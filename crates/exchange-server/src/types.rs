//! Shared types for the exchange runtime.
//!
//! This module defines:
//! - `Submission`: an order event plus its completion signal
//! - channel aliases between submitters, the router and engine tasks

use std::sync::Arc;

use exchange_core::OrderEvent;
use tokio::sync::{mpsc, oneshot};

use crate::sink::NotificationSink;

/// Fired exactly once when the event has been fully processed (or
/// rejected by the router). Dropping it unfired means the event was
/// abandoned by shutdown.
pub type CompletionTx = oneshot::Sender<()>;
pub type CompletionRx = oneshot::Receiver<()>;

/// Unit of work flowing from a submitter through the router to an engine.
#[derive(Debug)]
pub struct Submission {
    pub event: OrderEvent,
    pub done: CompletionTx,
}

impl Submission {
    pub fn new(event: OrderEvent) -> (Self, CompletionRx) {
        let (done, completed) = oneshot::channel();
        (Submission { event, done }, completed)
    }
}

/// Channel from submitters → router task.
pub type InboundTx = mpsc::Sender<Submission>;
pub type InboundRx = mpsc::Receiver<Submission>;

/// Channel from router → one instrument's engine task.
pub type EngineTx = mpsc::Sender<Submission>;
pub type EngineRx = mpsc::Receiver<Submission>;

/// Notification sink shared by the router and all engine tasks.
pub type SharedSink = Arc<dyn NotificationSink>;
