//! # Cadence
//!
//! A lazy, composable time-sequence engine for Rust.
//!
//! Cadence expresses recurring points in time ("every 5 seconds", "every
//! other day at 12:15") as lazy, potentially infinite sequences of
//! timestamps, and drives a repeating asynchronous action from such a
//! sequence with a single re-armed timer.
//!
//! ## Core Concepts
//!
//! - **TimeSequence**: the central abstraction. A value that can open a
//!   fresh iterator of [`time::TimePoint`]s on demand. Opening a second
//!   iterator starts an independent traversal; nothing is shared with a
//!   prior one.
//! - **Combinators**: every sequence can be transformed with `filter`,
//!   `map`, and `take`. Combinators return new sequence values and never
//!   mutate their receiver, so a sequence can be reused across scheduling
//!   calls.
//! - **Driver**: [`engine::run_schedule`] pulls one time point at a time,
//!   sleeps until it is due, awaits the action to completion, and only then
//!   pulls the next point. Two ticks of the same schedule never overlap.
//! - **Builder**: [`every::every`] and friends are plain immutable values;
//!   constructing a sequence arms no timer and reads no clock.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use cadence::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Fire-and-forget: runs in the background until the process exits.
//!     every(5).seconds().schedule(|| async {
//!         println!("five more seconds have passed");
//!         Ok(())
//!     });
//!
//!     // A finite schedule can be awaited to completion instead.
//!     let two_laps = every_other().seconds().take(2)?;
//!     run_schedule(two_laps, || async { Ok(()) }).await?;
//!
//!     Ok(())
//! }
//! ```

pub const ENGINE_NAME: &str = "Cadence Engine";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");


// Declare all the modules in the crate.
pub mod combinator;
pub mod config;
pub mod engine;
pub mod error;
pub mod every;
pub mod sequence;
pub mod time;

/// A prelude module for easy importing of the most common Cadence types.
pub mod prelude {
    pub use crate::config::{CadenceConfig, JobConfig};
    pub use crate::engine::{run_schedule, schedule};
    pub use crate::error::ScheduleError;
    pub use crate::every::{every, every_other, every_single};
    pub use crate::sequence::{Anchored, Daily, Periodic, TimeSequence};
    pub use crate::time::{TimePoint, Unit};
    pub use crate::{ENGINE_NAME, VERSION};
}
