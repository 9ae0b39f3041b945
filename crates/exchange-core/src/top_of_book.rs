//! Snapshot of the best live price on each side of one instrument.

/// Best price on one side and the live quantity resting at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceLevel {
    pub price: u32,
    /// Sum of several `u32` counts, so it gets the wider type.
    pub total_quantity: u64,
}

/// Best bid and ask, `None` for an empty side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopOfBook {
    pub bid: Option<PriceLevel>,
    pub ask: Option<PriceLevel>,
}
