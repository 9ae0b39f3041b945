//! exchange-protocol
//!
//! Text encoding/decoding for the exchange.
//!
//! This crate turns client command lines into
//! `exchange_core::OrderEvent`s and `exchange_core::Notification`s into
//! report lines. It is used by the TCP connection layer, the stdout
//! notification sink and the replay tests.

pub mod csv_codec;

pub use csv_codec::{
    ProtocolError,
    format_notification,
    format_notification_untimed,
    parse_input_line,
};
