//! Single-threaded multi-instrument engine.
//!
//! Applies exactly the same routing and matching rules as the concurrent
//! runtime, but inline: one [`RoutingTable`], one [`OrderBook`] per
//! instrument created on first use. Because each instrument's events
//! are processed in arrival order either way, the per-instrument
//! notification sequence is the same as the runtime's, which makes this
//! type the reference for replays and tests.

use std::collections::HashMap;

use tracing::info;

use crate::messages::{Notification, OrderEvent};
use crate::order_book::OrderBook;
use crate::routing::{Routed, RoutingTable};

#[derive(Debug, Default)]
pub struct MatchingEngine {
    /// Instrument -> OrderBook.
    order_books: HashMap<String, OrderBook>,

    routing: RoutingTable,
}

impl MatchingEngine {
    pub fn new() -> Self {
        MatchingEngine::default()
    }

    /// Route and process a single event, returning its notifications.
    pub fn process_event(&mut self, event: OrderEvent) -> Vec<Notification> {
        match self.routing.route(event) {
            Routed::Rejected(notification) => vec![notification],
            Routed::Forward(event) => {
                let book = self.get_or_create_order_book(&event.instrument);
                book.handle(event)
            }
        }
    }

    fn get_or_create_order_book(&mut self, instrument: &str) -> &mut OrderBook {
        self.order_books
            .entry(instrument.to_string())
            .or_insert_with(|| {
                info!(instrument, "creating order book");
                OrderBook::new(instrument)
            })
    }

    /// For tests or admin queries: get immutable access to a book.
    pub fn get_book(&self, instrument: &str) -> Option<&OrderBook> {
        self.order_books.get(instrument)
    }

    /// For tests or admin queries: number of instruments currently tracked.
    pub fn num_instruments(&self) -> usize {
        self.order_books.len()
    }

    pub fn routing(&self) -> &RoutingTable {
        &self.routing
    }
}
