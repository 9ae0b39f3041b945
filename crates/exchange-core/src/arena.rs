//! Slot arena for resting order records.
//!
//! Slots are stable for as long as an order is referenced from a book,
//! so the book and the order index can both hold a plain [`SlotId`].
//! A slot is only released after its book entry has been popped, which
//! means a lazily-deleted order keeps its slot until it is evicted.

use crate::order::OrderRecord;

/// Index of a record inside an [`OrderArena`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(u32);

impl SlotId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Slot id for the `position`-th slot; more than `u32::MAX` slots is fatal.
    fn for_position(position: usize) -> Self {
        SlotId(u32::try_from(position).expect("order arena exhausted"))
    }
}

/// Growable pool of [`OrderRecord`]s with a free list for slot reuse.
#[derive(Debug, Default)]
pub struct OrderArena {
    slots: Vec<Option<OrderRecord>>,
    free: Vec<SlotId>,
}

impl OrderArena {
    pub fn new() -> Self {
        OrderArena::default()
    }

    /// Store a record and return its slot.
    pub fn insert(&mut self, record: OrderRecord) -> SlotId {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot.index()] = Some(record);
                slot
            }
            None => {
                let slot = SlotId::for_position(self.slots.len());
                self.slots.push(Some(record));
                slot
            }
        }
    }

    /// Release a slot for reuse, returning the record it held.
    ///
    /// Panics if the slot is not occupied: every book entry owns exactly
    /// one slot, so a double release means the book is corrupt.
    pub fn remove(&mut self, slot: SlotId) -> OrderRecord {
        let record = self.slots[slot.index()]
            .take()
            .unwrap_or_else(|| panic!("arena slot {:?} released twice", slot));
        self.free.push(slot);
        record
    }

    pub fn get(&self, slot: SlotId) -> &OrderRecord {
        self.slots[slot.index()]
            .as_ref()
            .unwrap_or_else(|| panic!("dangling arena slot {:?}", slot))
    }

    pub fn get_mut(&mut self, slot: SlotId) -> &mut OrderRecord {
        self.slots[slot.index()]
            .as_mut()
            .unwrap_or_else(|| panic!("dangling arena slot {:?}", slot))
    }

    /// Number of occupied slots (live and lazily-deleted records).
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
