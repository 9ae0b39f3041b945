//! Order id -> instrument resolution used by the router.
//!
//! Cancels arrive without an instrument tag. Every buy/sell the router
//! sees is recorded here so a later cancel can be sent to the engine
//! that owns the order.
//!
//! Entries are never evicted: a cancel for an order that has since been
//! filled or cancelled still resolves, and the owning engine answers it
//! with a rejected delete. The table therefore grows with the number of
//! distinct order ids seen.

use std::collections::HashMap;

use crate::messages::{Notification, OrderEvent};

/// Outcome of routing one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    /// Deliver to the engine of `event.instrument`.
    Forward(OrderEvent),

    /// Cancel for an order id never seen; answer it without an engine.
    Rejected(Notification),
}

#[derive(Debug, Default)]
pub struct RoutingTable {
    order_to_instrument: HashMap<u32, String>,
}

impl RoutingTable {
    pub fn new() -> Self {
        RoutingTable::default()
    }

    /// Resolve the event's instrument and remember buy/sell ids.
    pub fn route(&mut self, mut event: OrderEvent) -> Routed {
        if event.instrument.is_empty() {
            match self.order_to_instrument.get(&event.order_id) {
                Some(instrument) => event.instrument = instrument.clone(),
                None => {
                    return Routed::Rejected(Notification::order_deleted(
                        event.order_id,
                        String::new(),
                        false,
                    ));
                }
            }
        }

        if !event.kind.is_cancel() {
            self.order_to_instrument
                .insert(event.order_id, event.instrument.clone());
        }

        Routed::Forward(event)
    }

    pub fn instrument_of(&self, order_id: u32) -> Option<&str> {
        self.order_to_instrument.get(&order_id).map(String::as_str)
    }

    /// Number of order ids ever recorded.
    pub fn len(&self) -> usize {
        self.order_to_instrument.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order_to_instrument.is_empty()
    }
}
