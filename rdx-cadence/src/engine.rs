//! The driver loop that fires an action at each point of a time sequence.

use crate::sequence::TimeSequence;
use anyhow::Result;
use chrono::Utc;
use std::future::Future;
use tracing::{debug, error, trace};

/// Fires `action` at each point of `sequence`, in the background.
///
/// Spawns [`run_schedule`] onto the tokio runtime and returns immediately.
/// If the action fails, the error is logged and that run stops; the run
/// otherwise ends when the sequence is exhausted. There is no handle to
/// stop a run early — termination comes from the sequence itself or from
/// process exit.
pub fn schedule<S, F, Fut>(sequence: S, action: F)
where
    S: TimeSequence + Send + Sync + 'static,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(err) = run_schedule(sequence, action).await {
            error!("Scheduled action failed, stopping this run: {:#}", err);
        }
    });
}

/// Drives one scheduling run to completion.
///
/// Opens a single iterator over `sequence` and then loops: pull the next
/// point, sleep until it is due, await the action, repeat. The delay is
/// computed from "now" on every lap, and a point already in the past fires
/// as soon as the scheduler polls the task.
///
/// The action is always awaited to completion before the next timer is
/// armed, so two invocations of the same run never overlap: a slow action
/// delays, but never races, the following firing.
///
/// # Returns
/// `Ok(())` once the sequence reports completion. An action failure is
/// fatal to the run and is returned to the caller; no retry is attempted.
pub async fn run_schedule<S, F, Fut>(sequence: S, mut action: F) -> Result<()>
where
    S: TimeSequence,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut points = sequence.time_points();
    let mut fired: u64 = 0;

    while let Some(point) = points.next() {
        let wait = (point - Utc::now())
            .to_std()
            .unwrap_or(std::time::Duration::ZERO);
        trace!("Next point {} due in {:?}.", point, wait);
        tokio::time::sleep(wait).await;
        action().await?;
        fired += 1;
    }

    debug!("Sequence exhausted after {} firing(s); run complete.", fired);
    Ok(())
}
