//! Kind of an inbound order event.

use crate::side::Side;

/// What an [`OrderEvent`](crate::messages::OrderEvent) asks the engine to do.
///
/// Only simple limit orders exist: a buy or sell carries a limit price,
/// a cancel carries just the order id.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrderKind {
    Buy,
    Sell,
    Cancel,
}

impl OrderKind {
    /// Book side for buy/sell events, `None` for cancels.
    pub fn side(self) -> Option<Side> {
        match self {
            OrderKind::Buy => Some(Side::Buy),
            OrderKind::Sell => Some(Side::Sell),
            OrderKind::Cancel => None,
        }
    }

    pub fn is_cancel(self) -> bool {
        self == OrderKind::Cancel
    }
}
