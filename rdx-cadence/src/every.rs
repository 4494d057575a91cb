//! The human-readable factory for building periodic sequences.
//!
//! `every`, `every_single`, and `every_other` are plain functions returning
//! an immutable [`Every`] value; there is no process-wide builder state.
//!
//! ```
//! use cadence::every::{every, every_other};
//!
//! let five_seconds = every(5).seconds();
//! let alternate_days = every_other().days();
//! ```

use crate::sequence::{Daily, Periodic};
use crate::time::Unit;

/// A multiplier waiting for a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Every {
    count: u32,
}

/// Starts a schedule firing every `count` of some unit.
#[must_use]
pub const fn every(count: u32) -> Every {
    Every { count }
}

/// Starts a schedule firing every single one of some unit.
#[must_use]
pub const fn every_single() -> Every {
    every(1)
}

/// Starts a schedule firing every other one of some unit.
#[must_use]
pub const fn every_other() -> Every {
    every(2)
}

impl Every {
    pub fn milliseconds(self) -> Periodic {
        self.of(Unit::Millisecond)
    }

    pub fn seconds(self) -> Periodic {
        self.of(Unit::Second)
    }

    pub fn minutes(self) -> Periodic {
        self.of(Unit::Minute)
    }

    pub fn hours(self) -> Periodic {
        self.of(Unit::Hour)
    }

    /// Day schedules additionally support time-of-day anchoring via
    /// [`Daily::at`].
    pub fn days(self) -> Daily {
        Daily::new(self.of(Unit::Day))
    }

    pub fn weeks(self) -> Periodic {
        self.of(Unit::Week)
    }

    fn of(self, unit: Unit) -> Periodic {
        Periodic::new(unit.duration(self.count))
    }
}
