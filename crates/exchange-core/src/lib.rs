//! exchange-core
//!
//! Pure matching logic:
//! - order events and notifications
//! - slot arena and price-time priority books
//! - per-instrument order book / matcher
//! - order id routing and a sequential multi-instrument engine

pub mod arena;
pub mod book;
pub mod matching_engine;
pub mod messages;
pub mod order;
pub mod order_book;
pub mod order_kind;
pub mod routing;
pub mod side;
pub mod top_of_book;

pub use side::Side;
pub use order_kind::OrderKind;

pub use messages::{Notification, OrderAdded, OrderDeleted, OrderEvent, OrderExecuted};

pub use arena::{OrderArena, SlotId};
pub use book::{Book, BookEntry};
pub use matching_engine::MatchingEngine;
pub use order::OrderRecord;
pub use order_book::OrderBook;
pub use routing::{Routed, RoutingTable};
pub use top_of_book::{PriceLevel, TopOfBook};
