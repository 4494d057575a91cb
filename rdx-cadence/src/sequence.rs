//! The core time-sequence abstraction and its periodic implementations.

use crate::combinator::{Filtered, Mapped, Taken};
use crate::error::ScheduleError;
use crate::time::{self, TimePoint};
use chrono::{Duration, TimeZone, Utc};
use std::future::Future;

/// A lazy, possibly infinite, restartable sequence of time points.
///
/// The one required operation is [`time_points`](Self::time_points), which
/// opens a fresh, independent traversal. Everything else is a combinator:
/// each returns a new sequence value and leaves the receiver untouched, so
/// a sequence can be cloned and reused across any number of scheduling
/// calls.
///
/// Constructing a sequence is side-effect-free. No timer is armed and no
/// clock is read until a traversal actually begins.
pub trait TimeSequence {
    /// Opens a fresh iterator over this sequence's time points.
    ///
    /// Every call starts an independent traversal; nothing is shared with
    /// or resumed from a previous one. Unbounded sequences never report
    /// completion — termination only ever comes from [`take`](Self::take)
    /// or from an inherently finite sequence such as a `Vec<TimePoint>`.
    fn time_points(&self) -> Box<dyn Iterator<Item = TimePoint> + Send + '_>;

    /// Keeps only the points satisfying `predicate`, in order.
    ///
    /// The predicate is evaluated once per upstream point. Finding the next
    /// satisfying point may consume unboundedly many upstream points; with
    /// an infinite upstream and a predicate that never matches, pulling the
    /// next point will not return. That is an accepted property of the
    /// design, not something the driver guards against.
    fn filter<P>(self, predicate: P) -> Filtered<Self, P>
    where
        Self: Sized,
        P: Fn(TimePoint) -> bool,
    {
        Filtered::new(self, predicate)
    }

    /// Transforms each point with `transform`, one-to-one and in order.
    ///
    /// The transform need not be monotonic. The driver computes every delay
    /// from "now", so a point in the past simply fires immediately.
    fn map<F>(self, transform: F) -> Mapped<Self, F>
    where
        Self: Sized,
        F: Fn(TimePoint) -> TimePoint,
    {
        Mapped::new(self, transform)
    }

    /// Truncates the sequence to its first `count` points.
    ///
    /// Fails at combinator-call time with
    /// [`ScheduleError::InvalidArgument`] when `count` is negative.
    fn take(self, count: i64) -> Result<Taken<Self>, ScheduleError>
    where
        Self: Sized,
    {
        let count = usize::try_from(count).map_err(|_| {
            ScheduleError::InvalidArgument(format!(
                "take expects a non-negative count, got {count}"
            ))
        })?;
        Ok(Taken::new(self, count))
    }

    /// Fires `action` at each point of this sequence, in the background.
    ///
    /// Convenience for [`crate::engine::schedule`] on a clone of `self`;
    /// returns immediately. Must be called from within a tokio runtime.
    fn schedule<F, Fut>(&self, action: F)
    where
        Self: Clone + Send + Sync + Sized + 'static,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        crate::engine::schedule(self.clone(), action);
    }
}

/// Steps from an anchor point in fixed increments.
///
/// Ends only if the date arithmetic would leave chrono's representable
/// range, which on wall-clock timescales it never does.
#[derive(Debug, Clone)]
struct StepIter {
    next: Option<TimePoint>,
    step: Duration,
}

impl StepIter {
    fn new(anchor: TimePoint, step: Duration) -> Self {
        Self {
            next: Some(anchor),
            step,
        }
    }
}

impl Iterator for StepIter {
    type Item = TimePoint;

    fn next(&mut self) -> Option<TimePoint> {
        let current = self.next?;
        self.next = current.checked_add_signed(self.step);
        Some(current)
    }
}

/// A periodic sequence anchored to "now at iteration time".
///
/// The first point of each traversal is the current time at the moment the
/// iterator is opened; each following point adds one fixed step. Opening
/// two iterators at different times yields two unrelated schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Periodic {
    step: Duration,
}

impl Periodic {
    /// Creates a periodic sequence with the given step.
    #[must_use]
    pub const fn new(step: Duration) -> Self {
        Self { step }
    }

    /// The fixed step between consecutive points.
    #[must_use]
    pub const fn step(&self) -> Duration {
        self.step
    }

    /// Rebinds this sequence to a fixed anchor instead of "now".
    #[must_use]
    pub fn starting_at(self, anchor: TimePoint) -> Anchored {
        Anchored::new(anchor, self.step)
    }
}

impl TimeSequence for Periodic {
    fn time_points(&self) -> Box<dyn Iterator<Item = TimePoint> + Send + '_> {
        Box::new(StepIter::new(Utc::now(), self.step))
    }
}

/// A periodic sequence anchored to a stored, fixed time point.
///
/// The k-th point of every traversal is exactly `anchor + k * step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchored {
    anchor: TimePoint,
    step: Duration,
}

impl Anchored {
    /// Creates a sequence anchored at `anchor` with the given step.
    #[must_use]
    pub const fn new(anchor: TimePoint, step: Duration) -> Self {
        Self { anchor, step }
    }

    /// The fixed starting point of every traversal.
    #[must_use]
    pub const fn anchor(&self) -> TimePoint {
        self.anchor
    }

    /// The fixed step between consecutive points.
    #[must_use]
    pub const fn step(&self) -> Duration {
        self.step
    }
}

impl TimeSequence for Anchored {
    fn time_points(&self) -> Box<dyn Iterator<Item = TimePoint> + Send + '_> {
        Box::new(StepIter::new(self.anchor, self.step))
    }
}

/// A day-stepped periodic sequence.
///
/// Behaves exactly like the [`Periodic`] it wraps, but additionally knows
/// how to anchor itself at a wall-clock time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Daily {
    period: Periodic,
}

impl Daily {
    pub(crate) const fn new(period: Periodic) -> Self {
        Self { period }
    }

    /// The fixed step between consecutive points.
    #[must_use]
    pub const fn step(&self) -> Duration {
        self.period.step()
    }

    /// Anchors this schedule at the next local occurrence of `time_of_day`.
    ///
    /// `time_of_day` must match `H:MM` or `HH:MM`. The anchor is today if
    /// that time is still ahead on the local clock, otherwise tomorrow.
    pub fn at(self, time_of_day: &str) -> Result<Anchored, ScheduleError> {
        self.at_in(time_of_day, &chrono::Local)
    }

    /// Like [`at`](Self::at), but anchored in an explicit timezone.
    pub fn at_in<Z: TimeZone>(self, time_of_day: &str, tz: &Z) -> Result<Anchored, ScheduleError> {
        let parsed = time::parse_time_of_day(time_of_day)?;
        Ok(Anchored::new(
            time::next_occurrence_in(tz, parsed),
            self.period.step(),
        ))
    }

    /// Rebinds this sequence to a fixed anchor instead of "now".
    #[must_use]
    pub fn starting_at(self, anchor: TimePoint) -> Anchored {
        self.period.starting_at(anchor)
    }
}

impl TimeSequence for Daily {
    fn time_points(&self) -> Box<dyn Iterator<Item = TimePoint> + Send + '_> {
        self.period.time_points()
    }
}

/// An explicit, finite list of points is itself a sequence.
///
/// This is the extension point for schedules the unit constructors cannot
/// express; the driver run ends naturally when the list is exhausted.
impl TimeSequence for Vec<TimePoint> {
    fn time_points(&self) -> Box<dyn Iterator<Item = TimePoint> + Send + '_> {
        Box::new(self.iter().copied())
    }
}

/// Type-erased sequences, so heterogeneous schedules can share one type.
impl TimeSequence for Box<dyn TimeSequence + Send + Sync> {
    fn time_points(&self) -> Box<dyn Iterator<Item = TimePoint> + Send + '_> {
        self.as_ref().time_points()
    }
}

impl std::fmt::Debug for dyn TimeSequence + Send + Sync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn TimeSequence")
    }
}
