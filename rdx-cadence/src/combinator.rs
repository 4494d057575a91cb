//! Combinator sequences that wrap and transform an upstream sequence.

use crate::sequence::TimeSequence;
use crate::time::TimePoint;

/// Produces only the upstream points satisfying a predicate.
#[derive(Debug, Clone, Copy)]
pub struct Filtered<S, P> {
    upstream: S,
    predicate: P,
}

impl<S, P> Filtered<S, P> {
    pub(crate) const fn new(upstream: S, predicate: P) -> Self {
        Self {
            upstream,
            predicate,
        }
    }
}

impl<S, P> TimeSequence for Filtered<S, P>
where
    S: TimeSequence,
    P: Fn(TimePoint) -> bool + Send + Sync,
{
    fn time_points(&self) -> Box<dyn Iterator<Item = TimePoint> + Send + '_> {
        let predicate = &self.predicate;
        Box::new(
            self.upstream
                .time_points()
                .filter(move |point| predicate(*point)),
        )
    }
}

/// Produces the transform of each upstream point, one-to-one and in order.
#[derive(Debug, Clone, Copy)]
pub struct Mapped<S, F> {
    upstream: S,
    transform: F,
}

impl<S, F> Mapped<S, F> {
    pub(crate) const fn new(upstream: S, transform: F) -> Self {
        Self {
            upstream,
            transform,
        }
    }
}

impl<S, F> TimeSequence for Mapped<S, F>
where
    S: TimeSequence,
    F: Fn(TimePoint) -> TimePoint + Send + Sync,
{
    fn time_points(&self) -> Box<dyn Iterator<Item = TimePoint> + Send + '_> {
        let transform = &self.transform;
        Box::new(self.upstream.time_points().map(move |point| transform(point)))
    }
}

/// Produces at most the first `count` upstream points.
#[derive(Debug, Clone, Copy)]
pub struct Taken<S> {
    upstream: S,
    count: usize,
}

impl<S> Taken<S> {
    pub(crate) const fn new(upstream: S, count: usize) -> Self {
        Self { upstream, count }
    }
}

impl<S: TimeSequence> TimeSequence for Taken<S> {
    fn time_points(&self) -> Box<dyn Iterator<Item = TimePoint> + Send + '_> {
        Box::new(self.upstream.time_points().take(self.count))
    }
}
