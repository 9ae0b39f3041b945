// crates/exchange-protocol/src/csv_codec.rs

//! Comma-separated text codec.
//!
//! Input format (lines → `OrderEvent`):
//!
//! - Buy:
//!   `B, orderId(int), instrument(string), price(int), count(int)`
//!
//! - Sell:
//!   `S, orderId(int), instrument(string), price(int), count(int)`
//!
//! - Cancel (no instrument, the router resolves it):
//!   `C, orderId(int)`
//!
//! Output format (`Notification` → line):
//!
//! - OrderAdded:
//!   `A, orderId, instrument, side(B/S), price, count, timestamp`
//!
//! - OrderDeleted (A = accepted, R = rejected):
//!   `X, orderId, A|R, timestamp`
//!
//! - OrderExecuted:
//!   `E, restingId, incomingId, executionId, price, count, timestamp`

use std::num::ParseIntError;

use exchange_core::{Notification, OrderEvent, Side};
use thiserror::Error;

/// Why a command line could not be turned into an `OrderEvent`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("command {command} expects {expected} fields, got {got}")]
    FieldCount {
        command: char,
        expected: usize,
        got: usize,
    },

    #[error("invalid {field}: {source}")]
    InvalidNumber {
        field: &'static str,
        #[source]
        source: ParseIntError,
    },

    #[error("instrument must not be empty")]
    EmptyInstrument,

    #[error("count must be positive")]
    ZeroCount,
}

/// Parse a single line into an `OrderEvent`.
///
/// Returns `Ok(None)` for blank lines or comments (starting with `#`).
pub fn parse_input_line(line: &str) -> Result<Option<OrderEvent>, ProtocolError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let tokens = split_and_trim(trimmed, ',');
    let command = tokens[0].as_str();

    match command {
        "B" | "S" => parse_order(&tokens).map(Some),
        "C" => parse_cancel(&tokens).map(Some),
        _ => Err(ProtocolError::UnknownCommand(command.to_string())),
    }
}

fn parse_order(tokens: &[String]) -> Result<OrderEvent, ProtocolError> {
    // B|S, orderId, instrument, price, count
    let command = tokens[0].chars().next().unwrap_or('\0');
    expect_fields(command, tokens, 5)?;

    let order_id = parse_u32("order id", &tokens[1])?;
    let instrument = tokens[2].clone();
    let price = parse_u32("price", &tokens[3])?;
    let count = parse_u32("count", &tokens[4])?;

    if instrument.is_empty() {
        return Err(ProtocolError::EmptyInstrument);
    }
    if count == 0 {
        return Err(ProtocolError::ZeroCount);
    }

    let side = Side::from_char(command)
        .ok_or_else(|| ProtocolError::UnknownCommand(tokens[0].clone()))?;
    Ok(match side {
        Side::Buy => OrderEvent::buy(order_id, instrument, price, count),
        Side::Sell => OrderEvent::sell(order_id, instrument, price, count),
    })
}

fn parse_cancel(tokens: &[String]) -> Result<OrderEvent, ProtocolError> {
    // C, orderId
    expect_fields('C', tokens, 2)?;
    let order_id = parse_u32("order id", &tokens[1])?;
    Ok(OrderEvent::cancel(order_id))
}

/// Format a `Notification` as a line, including its timestamp.
pub fn format_notification(msg: &Notification) -> String {
    format!(
        "{}, {}",
        format_notification_untimed(msg),
        msg.timestamp_ns()
    )
}

/// Same as [`format_notification`] without the trailing timestamp.
///
/// Used where output has to be compared across runs.
pub fn format_notification_untimed(msg: &Notification) -> String {
    match msg {
        Notification::OrderAdded(a) => format!(
            "A, {}, {}, {}, {}, {}",
            a.order_id,
            a.instrument,
            a.side.as_char(),
            a.price,
            a.count
        ),
        Notification::OrderDeleted(d) => {
            let outcome = if d.accepted { 'A' } else { 'R' };
            format!("X, {}, {}", d.order_id, outcome)
        }
        Notification::OrderExecuted(e) => format!(
            "E, {}, {}, {}, {}, {}",
            e.resting_order_id, e.incoming_order_id, e.execution_id, e.price, e.count
        ),
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn split_and_trim(s: &str, delimiter: char) -> Vec<String> {
    s.split(delimiter)
        .map(|tok| tok.trim().to_string())
        .collect()
}

fn expect_fields(command: char, tokens: &[String], expected: usize) -> Result<(), ProtocolError> {
    if tokens.len() != expected {
        return Err(ProtocolError::FieldCount {
            command,
            expected,
            got: tokens.len(),
        });
    }
    Ok(())
}

fn parse_u32(field: &'static str, s: &str) -> Result<u32, ProtocolError> {
    s.parse::<u32>()
        .map_err(|source| ProtocolError::InvalidNumber { field, source })
}
