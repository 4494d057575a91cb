//! Error types raised while constructing sequences.

use thiserror::Error;

/// Something went wrong while building a sequence.
///
/// Both variants are raised synchronously at construction time; nothing in
/// this crate fails once a sequence is iterating.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A combinator or config value was handed an argument outside its
    /// domain, e.g. a negative `take` count.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A time-of-day string did not match `H:MM`/`HH:MM` with hours 0-23
    /// and minutes 0-59.
    #[error("cannot parse time of day {0:?}: expected H:MM or HH:MM")]
    Parse(String),
}
