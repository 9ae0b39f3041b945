//! One side of an instrument's book, ordered by price-time priority.
//!
//! - Bids: highest price first.
//! - Asks: lowest price first.
//! - Equal prices: earliest rest timestamp first.
//!
//! The book only stores the priority key and a [`SlotId`]; the mutable
//! part of the order (remaining count) lives in the arena. Removal from
//! the middle is not supported. Cancelled orders stay in place with a
//! zero count and are discarded by whoever next pops them.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::arena::SlotId;
use crate::side::Side;

/// Priority key plus arena slot of one resting order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BookEntry {
    pub price: u32,
    pub timestamp_ns: u64,
    pub slot: SlotId,
    side: Side,
}

impl Ord for BookEntry {
    /// Greater means higher priority (`BinaryHeap` is a max-heap).
    fn cmp(&self, other: &Self) -> Ordering {
        let by_price = match self.side {
            Side::Buy => self.price.cmp(&other.price),
            Side::Sell => other.price.cmp(&self.price),
        };
        by_price
            .then_with(|| other.timestamp_ns.cmp(&self.timestamp_ns))
            .then_with(|| other.slot.cmp(&self.slot))
    }
}

impl PartialOrd for BookEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority-ordered container of resting orders for one side.
#[derive(Debug)]
pub struct Book {
    side: Side,
    heap: BinaryHeap<BookEntry>,
}

impl Book {
    pub fn new(side: Side) -> Self {
        Book {
            side,
            heap: BinaryHeap::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn push(&mut self, price: u32, timestamp_ns: u64, slot: SlotId) {
        self.heap.push(BookEntry {
            price,
            timestamp_ns,
            slot,
            side: self.side,
        });
    }

    /// Highest-priority entry, possibly a lazily-deleted one.
    pub fn peek(&self) -> Option<&BookEntry> {
        self.heap.peek()
    }

    pub fn pop(&mut self) -> Option<BookEntry> {
        self.heap.pop()
    }

    /// Number of entries, including lazily-deleted ones not yet evicted.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// All entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &BookEntry> {
        self.heap.iter()
    }
}
