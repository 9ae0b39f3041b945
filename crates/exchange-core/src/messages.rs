//! Message types used by the matching core.
//!
//! These are **transport-agnostic** logical messages:
//! - [`OrderEvent`]: what the router and the per-instrument engines consume.
//! - [`Notification`]: what they report to the notification sink.
//!
//! Note: text encoders live in the `exchange-protocol` crate;
//! this module is purely logical.

use crate::order::current_timestamp_ns;
use crate::order_kind::OrderKind;
use crate::side::Side;

/// A decoded buy / sell / cancel request.
///
/// `instrument` is empty for cancels as they arrive from clients; the
/// router fills it in from its routing table before forwarding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderEvent {
    /// Caller-assigned id, unique among live orders system-wide.
    pub order_id: u32,

    /// Instrument symbol, e.g. `"AAPL"`. Empty only for cancels.
    pub instrument: String,

    /// Limit price in integer ticks. Unused for cancels.
    pub price: u32,

    /// Quantity still to be matched. Decremented in place while matching.
    pub count: u32,

    pub kind: OrderKind,
}

impl OrderEvent {
    pub fn buy(order_id: u32, instrument: impl Into<String>, price: u32, count: u32) -> Self {
        OrderEvent {
            order_id,
            instrument: instrument.into(),
            price,
            count,
            kind: OrderKind::Buy,
        }
    }

    pub fn sell(order_id: u32, instrument: impl Into<String>, price: u32, count: u32) -> Self {
        OrderEvent {
            order_id,
            instrument: instrument.into(),
            price,
            count,
            kind: OrderKind::Sell,
        }
    }

    /// A cancel as submitted by a client: no instrument tag.
    pub fn cancel(order_id: u32) -> Self {
        OrderEvent {
            order_id,
            instrument: String::new(),
            price: 0,
            count: 0,
            kind: OrderKind::Cancel,
        }
    }
}

/// An event reported to the notification sink.
///
/// Every variant carries the wall-clock time (ns since epoch) at which
/// it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The (remainder of an) order now rests in its book.
    OrderAdded(OrderAdded),

    /// Outcome of a cancel request.
    OrderDeleted(OrderDeleted),

    /// One match between a resting order and an incoming order.
    OrderExecuted(OrderExecuted),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAdded {
    pub order_id: u32,
    pub instrument: String,
    pub side: Side,
    pub price: u32,
    /// Quantity that rests, after any matching on arrival.
    pub count: u32,
    pub timestamp_ns: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDeleted {
    pub order_id: u32,
    /// Empty when the router could not resolve the order at all.
    pub instrument: String,
    /// `false` means the order id was not live.
    pub accepted: bool,
    pub timestamp_ns: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderExecuted {
    pub resting_order_id: u32,
    pub incoming_order_id: u32,
    /// Per-resting-order execution sequence, starting at 1.
    pub execution_id: u32,
    /// Always the resting order's price.
    pub price: u32,
    pub count: u32,
    pub timestamp_ns: u64,
}

// -----------------------------------------------------------------------------
// Convenience constructors
// -----------------------------------------------------------------------------

impl Notification {
    pub fn order_added(
        order_id: u32,
        instrument: impl Into<String>,
        side: Side,
        price: u32,
        count: u32,
    ) -> Self {
        Notification::OrderAdded(OrderAdded {
            order_id,
            instrument: instrument.into(),
            side,
            price,
            count,
            timestamp_ns: current_timestamp_ns(),
        })
    }

    pub fn order_deleted(order_id: u32, instrument: impl Into<String>, accepted: bool) -> Self {
        Notification::OrderDeleted(OrderDeleted {
            order_id,
            instrument: instrument.into(),
            accepted,
            timestamp_ns: current_timestamp_ns(),
        })
    }

    pub fn order_executed(
        resting_order_id: u32,
        incoming_order_id: u32,
        execution_id: u32,
        price: u32,
        count: u32,
    ) -> Self {
        Notification::OrderExecuted(OrderExecuted {
            resting_order_id,
            incoming_order_id,
            execution_id,
            price,
            count,
            timestamp_ns: current_timestamp_ns(),
        })
    }

    pub fn timestamp_ns(&self) -> u64 {
        match self {
            Notification::OrderAdded(n) => n.timestamp_ns,
            Notification::OrderDeleted(n) => n.timestamp_ns,
            Notification::OrderExecuted(n) => n.timestamp_ns,
        }
    }
}
