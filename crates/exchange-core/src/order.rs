//! Resting order record and the clocks used to stamp it.
//!
//! An [`OrderRecord`] lives in the [`OrderArena`](crate::arena::OrderArena)
//! for as long as it sits in a book. The book and the per-engine order
//! index both refer to it by slot id, so cancelling through the index
//! is visible to the book without any shared pointers.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::side::Side;

/// A single order resting in a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub order_id: u32,
    pub side: Side,
    pub price: u32,

    /// Remaining unfilled quantity. Zero means filled or cancelled.
    pub count: u32,

    /// Number of executions against this order so far.
    pub execution_id: u32,

    /// Time the order started resting (ns since epoch).
    pub timestamp_ns: u64,
}

impl OrderRecord {
    pub fn new(order_id: u32, side: Side, price: u32, count: u32, timestamp_ns: u64) -> Self {
        OrderRecord {
            order_id,
            side,
            price,
            count,
            execution_id: 0,
            timestamp_ns,
        }
    }

    /// Returns `true` once nothing is left to match (filled or cancelled).
    pub fn is_dead(&self) -> bool {
        self.count == 0
    }

    /// Fill by up to `qty` units and bump the execution sequence.
    ///
    /// Returns the quantity actually filled.
    pub fn fill(&mut self, qty: u32) -> u32 {
        let filled = qty.min(self.count);
        self.count -= filled;
        self.execution_id += 1;
        filled
    }
}

/// Get the current timestamp in nanoseconds since the Unix epoch.
pub fn current_timestamp_ns() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    now.as_secs()
        .saturating_mul(1_000_000_000)
        .saturating_add(now.subsec_nanos() as u64)
}

/// Hands out strictly increasing rest timestamps for one book.
///
/// Wall-clock readings can repeat or step backwards; time priority
/// needs a total order, so a reading that does not advance is bumped
/// one nanosecond past the previous stamp.
#[derive(Debug, Default)]
pub struct RestClock {
    last_ns: u64,
}

impl RestClock {
    pub fn new() -> Self {
        RestClock::default()
    }

    pub fn stamp(&mut self) -> u64 {
        self.stamp_from(current_timestamp_ns())
    }

    fn stamp_from(&mut self, now_ns: u64) -> u64 {
        let ts = now_ns.max(self.last_ns.saturating_add(1));
        self.last_ns = ts;
        ts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_caps_at_remaining() {
        let mut order = OrderRecord::new(1, Side::Buy, 100, 5, 1);
        assert_eq!(order.fill(3), 3);
        assert_eq!(order.execution_id, 1);
        assert_eq!(order.fill(10), 2);
        assert_eq!(order.execution_id, 2);
        assert!(order.is_dead());
    }

    #[test]
    fn rest_clock_never_repeats() {
        let mut clock = RestClock::new();
        assert_eq!(clock.stamp_from(10), 10);
        assert_eq!(clock.stamp_from(10), 11);
        assert_eq!(clock.stamp_from(5), 12);
        assert_eq!(clock.stamp_from(50), 50);
    }

    #[test]
    fn wall_clock_is_after_2020() {
        assert!(current_timestamp_ns() > 1_577_836_800_000_000_000);
    }
}
