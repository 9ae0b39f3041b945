//! Per-instrument matching state: the two books, the arena behind
//! them and the order index used for cancels.
//!
//! Events are handled strictly one at a time:
//! - Cancel: zero the resting order in place (lazy deletion).
//! - Buy / Sell: sweep the opposite book while the price crosses,
//!   trading at the resting order's price, then rest any remainder.
//!
//! Dead entries (count 0) are evicted whenever they reach the top of a
//! book during matching; nothing ever searches the middle of a book.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::arena::{OrderArena, SlotId};
use crate::book::Book;
use crate::messages::{Notification, OrderEvent};
use crate::order::{OrderRecord, RestClock};
use crate::order_kind::OrderKind;
use crate::side::Side;
use crate::top_of_book::{PriceLevel, TopOfBook};

/// Single-instrument order book and matcher.
#[derive(Debug)]
pub struct OrderBook {
    instrument: String,

    arena: OrderArena,

    /// Bids: highest price first.
    bids: Book,

    /// Asks: lowest price first.
    asks: Book,

    /// Live order id -> arena slot. Lazily-deleted orders are not here.
    index: HashMap<u32, SlotId>,

    clock: RestClock,
}

impl OrderBook {
    /// Create an empty book pair for the given instrument.
    pub fn new(instrument: impl Into<String>) -> Self {
        OrderBook {
            instrument: instrument.into(),
            arena: OrderArena::new(),
            bids: Book::new(Side::Buy),
            asks: Book::new(Side::Sell),
            index: HashMap::new(),
            clock: RestClock::new(),
        }
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    /// Process one event and return the notifications it produced, in
    /// the order they happened.
    pub fn handle(&mut self, event: OrderEvent) -> Vec<Notification> {
        match event.kind {
            OrderKind::Cancel => self.cancel_order(event.order_id),
            OrderKind::Buy => self.add_order(event, Side::Buy),
            OrderKind::Sell => self.add_order(event, Side::Sell),
        }
    }

    /// Remaining quantity of a live order, `None` if it is not resting.
    pub fn resting_quantity(&self, order_id: u32) -> Option<u32> {
        self.index
            .get(&order_id)
            .map(|slot| self.arena.get(*slot).count)
    }

    /// Number of live resting orders across both sides.
    pub fn live_orders(&self) -> usize {
        self.index.len()
    }

    /// Read-only view of one side, including lazily-deleted entries.
    pub fn book(&self, side: Side) -> &Book {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    /// Best live bid and ask levels with their aggregate quantity.
    ///
    /// Scans the whole book, so it is meant for queries and tests rather
    /// than the matching path.
    pub fn top_of_book(&self) -> TopOfBook {
        TopOfBook {
            bid: self.best_level(Side::Buy),
            ask: self.best_level(Side::Sell),
        }
    }

    // -------------------------------------------------------------------------
    // Internal handlers
    // -------------------------------------------------------------------------

    fn cancel_order(&mut self, order_id: u32) -> Vec<Notification> {
        match self.index.remove(&order_id) {
            Some(slot) => {
                let record = self.arena.get_mut(slot);
                debug!(
                    instrument = %self.instrument,
                    order_id,
                    cancelled = record.count,
                    "order cancelled"
                );
                record.count = 0;
                vec![Notification::order_deleted(order_id, self.instrument.clone(), true)]
            }
            None => {
                debug!(instrument = %self.instrument, order_id, "cancel of unknown order");
                vec![Notification::order_deleted(order_id, self.instrument.clone(), false)]
            }
        }
    }

    fn add_order(&mut self, mut event: OrderEvent, side: Side) -> Vec<Notification> {
        let mut outputs = Vec::new();
        let opposite = side.opposite();

        while event.count > 0 {
            let top = match self.book_mut(opposite).peek() {
                Some(entry) => *entry,
                None => break,
            };

            let resting = self.arena.get_mut(top.slot);
            if resting.is_dead() {
                self.evict_top(opposite);
                continue;
            }

            if !side.crosses(event.price, top.price) {
                break;
            }

            let trade_qty = event.count.min(resting.count);
            resting.fill(trade_qty);
            event.count -= trade_qty;

            let resting_id = resting.order_id;
            let resting_filled = resting.is_dead();
            outputs.push(Notification::order_executed(
                resting_id,
                event.order_id,
                resting.execution_id,
                resting.price,
                trade_qty,
            ));
            debug!(
                instrument = %self.instrument,
                resting_id,
                incoming_id = event.order_id,
                price = top.price,
                qty = trade_qty,
                "orders matched"
            );

            if resting_filled {
                // A replaced duplicate id may point at a newer slot.
                if self.index.get(&resting_id) == Some(&top.slot) {
                    self.index.remove(&resting_id);
                }
                self.evict_top(opposite);
            }
        }

        if event.count > 0 {
            outputs.push(self.rest(event, side));
        }

        outputs
    }

    fn rest(&mut self, event: OrderEvent, side: Side) -> Notification {
        let timestamp_ns = self.clock.stamp();
        let slot = self.arena.insert(OrderRecord::new(
            event.order_id,
            side,
            event.price,
            event.count,
            timestamp_ns,
        ));
        self.book_mut(side).push(event.price, timestamp_ns, slot);

        if self.index.insert(event.order_id, slot).is_some() {
            warn!(
                instrument = %self.instrument,
                order_id = event.order_id,
                "order id already live; cancels now target the newer order"
            );
        }

        debug!(
            instrument = %self.instrument,
            order_id = event.order_id,
            side = ?side,
            price = event.price,
            count = event.count,
            "order rested"
        );
        Notification::order_added(
            event.order_id,
            self.instrument.clone(),
            side,
            event.price,
            event.count,
        )
    }

    /// Pop the top entry of `side` and release its slot.
    ///
    /// Only called right after a successful peek on the same side.
    fn evict_top(&mut self, side: Side) {
        let entry = self
            .book_mut(side)
            .pop()
            .expect("evicting from an empty book after a successful peek");
        self.arena.remove(entry.slot);
    }

    fn book_mut(&mut self, side: Side) -> &mut Book {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    fn best_level(&self, side: Side) -> Option<PriceLevel> {
        fn outranks(side: Side, a: u32, b: u32) -> bool {
            match side {
                Side::Buy => a > b,
                Side::Sell => a < b,
            }
        }

        let mut best: Option<PriceLevel> = None;
        for entry in self.book(side).iter() {
            let count = self.arena.get(entry.slot).count;
            if count == 0 {
                continue;
            }
            best = match best {
                Some(level) if level.price == entry.price => Some(PriceLevel {
                    price: level.price,
                    total_quantity: level.total_quantity + u64::from(count),
                }),
                Some(level) if !outranks(side, entry.price, level.price) => Some(level),
                _ => Some(PriceLevel {
                    price: entry.price,
                    total_quantity: u64::from(count),
                }),
            };
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{OrderAdded, OrderDeleted, OrderExecuted};

    fn added(n: &Notification) -> &OrderAdded {
        match n {
            Notification::OrderAdded(a) => a,
            other => panic!("expected OrderAdded, got {:?}", other),
        }
    }

    fn deleted(n: &Notification) -> &OrderDeleted {
        match n {
            Notification::OrderDeleted(d) => d,
            other => panic!("expected OrderDeleted, got {:?}", other),
        }
    }

    fn executed(n: &Notification) -> &OrderExecuted {
        match n {
            Notification::OrderExecuted(e) => e,
            other => panic!("expected OrderExecuted, got {:?}", other),
        }
    }

    #[test]
    fn resting_buy_partially_filled_by_sell() {
        let mut book = OrderBook::new("X");

        let out = book.handle(OrderEvent::buy(1, "X", 100, 10));
        assert_eq!(out.len(), 1);
        let a = added(&out[0]);
        assert_eq!((a.order_id, a.side, a.price, a.count), (1, Side::Buy, 100, 10));

        let out = book.handle(OrderEvent::sell(2, "X", 100, 4));
        assert_eq!(out.len(), 1);
        let e = executed(&out[0]);
        assert_eq!(
            (e.resting_order_id, e.incoming_order_id, e.execution_id, e.price, e.count),
            (1, 2, 1, 100, 4)
        );

        assert_eq!(book.resting_quantity(1), Some(6));
        assert_eq!(book.resting_quantity(2), None);
        assert_eq!(book.live_orders(), 1);
    }

    #[test]
    fn sell_sweeps_better_price_first() {
        let mut book = OrderBook::new("X");
        book.handle(OrderEvent::buy(1, "X", 100, 5));
        book.handle(OrderEvent::buy(2, "X", 101, 5));

        let out = book.handle(OrderEvent::sell(3, "X", 99, 7));
        assert_eq!(out.len(), 2);

        let first = executed(&out[0]);
        assert_eq!((first.resting_order_id, first.price, first.count), (2, 101, 5));
        let second = executed(&out[1]);
        assert_eq!((second.resting_order_id, second.price, second.count), (1, 100, 2));

        assert_eq!(book.resting_quantity(1), Some(3));
        assert_eq!(book.resting_quantity(2), None);
        assert_eq!(book.resting_quantity(3), None);
    }

    #[test]
    fn equal_prices_fill_in_arrival_order() {
        let mut book = OrderBook::new("X");
        book.handle(OrderEvent::sell(1, "X", 50, 2));
        book.handle(OrderEvent::sell(2, "X", 50, 2));
        book.handle(OrderEvent::sell(3, "X", 50, 2));

        let out = book.handle(OrderEvent::buy(4, "X", 50, 5));
        let resting: Vec<u32> = out.iter().map(|n| executed(n).resting_order_id).collect();
        assert_eq!(resting, vec![1, 2, 3]);
        assert_eq!(book.resting_quantity(3), Some(1));
    }

    #[test]
    fn cancelled_order_is_skipped_by_matching() {
        let mut book = OrderBook::new("X");
        book.handle(OrderEvent::buy(1, "X", 100, 5));

        let out = book.handle(OrderEvent::cancel(1));
        let d = deleted(&out[0]);
        assert!(d.accepted);
        assert_eq!(d.order_id, 1);

        // Lazily deleted: still physically present until popped.
        assert_eq!(book.book(Side::Buy).len(), 1);
        assert_eq!(book.live_orders(), 0);
        assert_eq!(book.top_of_book().bid, None);

        let out = book.handle(OrderEvent::sell(2, "X", 100, 5));
        assert_eq!(out.len(), 1);
        let a = added(&out[0]);
        assert_eq!((a.order_id, a.count), (2, 5));

        assert!(book.book(Side::Buy).is_empty());
        assert_eq!(book.book(Side::Sell).len(), 1);
    }

    #[test]
    fn cancel_in_the_middle_keeps_others_in_order() {
        let mut book = OrderBook::new("X");
        book.handle(OrderEvent::buy(1, "X", 100, 1));
        book.handle(OrderEvent::buy(2, "X", 100, 1));
        book.handle(OrderEvent::buy(3, "X", 100, 1));
        book.handle(OrderEvent::cancel(2));

        let out = book.handle(OrderEvent::sell(4, "X", 100, 2));
        let resting: Vec<u32> = out.iter().map(|n| executed(n).resting_order_id).collect();
        assert_eq!(resting, vec![1, 3]);
        assert!(book.book(Side::Buy).is_empty());
    }

    #[test]
    fn unknown_and_double_cancel_are_rejected() {
        let mut book = OrderBook::new("X");
        let out = book.handle(OrderEvent::cancel(99));
        assert!(!deleted(&out[0]).accepted);

        book.handle(OrderEvent::buy(1, "X", 100, 5));
        assert!(deleted(&book.handle(OrderEvent::cancel(1))[0]).accepted);
        assert!(!deleted(&book.handle(OrderEvent::cancel(1))[0]).accepted);
    }

    #[test]
    fn cancel_of_filled_order_is_rejected() {
        let mut book = OrderBook::new("X");
        book.handle(OrderEvent::sell(1, "X", 100, 3));
        book.handle(OrderEvent::buy(2, "X", 100, 3));
        assert!(!deleted(&book.handle(OrderEvent::cancel(1))[0]).accepted);
    }

    #[test]
    fn non_crossing_order_rests() {
        let mut book = OrderBook::new("X");
        book.handle(OrderEvent::sell(1, "X", 105, 5));
        let out = book.handle(OrderEvent::buy(2, "X", 104, 5));
        assert_eq!(added(&out[0]).order_id, 2);

        let tob = book.top_of_book();
        assert_eq!(tob.bid, Some(PriceLevel { price: 104, total_quantity: 5 }));
        assert_eq!(tob.ask, Some(PriceLevel { price: 105, total_quantity: 5 }));
    }

    #[test]
    fn partial_fill_then_rest_remainder() {
        let mut book = OrderBook::new("X");
        book.handle(OrderEvent::sell(1, "X", 100, 3));
        book.handle(OrderEvent::sell(2, "X", 102, 3));

        let out = book.handle(OrderEvent::buy(3, "X", 101, 10));
        assert_eq!(out.len(), 2);
        assert_eq!(executed(&out[0]).count, 3);
        let a = added(&out[1]);
        assert_eq!((a.order_id, a.price, a.count), (3, 101, 7));
        assert_eq!(book.resting_quantity(3), Some(7));
        assert_eq!(book.resting_quantity(2), Some(3));
    }

    #[test]
    fn execution_ids_count_per_resting_order() {
        let mut book = OrderBook::new("X");
        book.handle(OrderEvent::sell(1, "X", 100, 10));

        let ids: Vec<u32> = (2..5)
            .map(|id| {
                let out = book.handle(OrderEvent::buy(id, "X", 100, 2));
                executed(&out[0]).execution_id
            })
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(book.resting_quantity(1), Some(4));
    }

    #[test]
    fn zero_count_order_produces_nothing() {
        let mut book = OrderBook::new("X");
        book.handle(OrderEvent::sell(1, "X", 100, 3));
        assert!(book.handle(OrderEvent::buy(2, "X", 100, 0)).is_empty());
        assert_eq!(book.resting_quantity(1), Some(3));
    }

    #[test]
    fn top_of_book_aggregates_best_level() {
        let mut book = OrderBook::new("X");
        book.handle(OrderEvent::buy(1, "X", 100, 4));
        book.handle(OrderEvent::buy(2, "X", 101, 1));
        book.handle(OrderEvent::buy(3, "X", 101, 2));
        book.handle(OrderEvent::sell(4, "X", 110, 7));
        book.handle(OrderEvent::sell(5, "X", 109, 1));
        book.handle(OrderEvent::cancel(5));

        let tob = book.top_of_book();
        assert_eq!(tob.bid, Some(PriceLevel { price: 101, total_quantity: 3 }));
        assert_eq!(tob.ask, Some(PriceLevel { price: 110, total_quantity: 7 }));
    }

    #[test]
    fn top_of_book_total_exceeds_single_order_range() {
        let mut book = OrderBook::new("X");
        book.handle(OrderEvent::buy(1, "X", 100, u32::MAX));
        book.handle(OrderEvent::buy(2, "X", 100, 1));

        let tob = book.top_of_book();
        assert_eq!(
            tob.bid,
            Some(PriceLevel { price: 100, total_quantity: u64::from(u32::MAX) + 1 })
        );
        assert_eq!(tob.ask, None);
    }
}
