//! Errors surfaced to submitters.

use thiserror::Error;

/// Failure to get an event processed.
///
/// Expected outcomes (including rejected cancels) are reported through
/// notifications; this only covers the runtime going away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExchangeError {
    /// The exchange stopped before the event completed. The event may
    /// or may not have been applied.
    #[error("exchange has shut down")]
    ShutDown,
}
