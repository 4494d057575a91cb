//! Defines the configuration structures for declarative schedules.
//!
//! These structs are designed to be deserialized from a configuration file
//! (e.g. a TOML file) using `serde`, so an application can describe its
//! recurring jobs externally and build the matching sequences at startup.

use crate::error::ScheduleError;
use crate::every::every;
use crate::sequence::{Periodic, TimeSequence};
use crate::time::Unit;
use serde::Deserialize;

/// The top-level declarative schedule configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CadenceConfig {
    /// The recurring jobs to schedule at startup.
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

/// Describes one recurring job.
///
/// `count` and `unit` select the step ("every 2 seconds"); `at` anchors a
/// day-stepped job at a wall-clock time of day; `take` bounds the run to a
/// number of firings.
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    /// A human-readable label for logging purposes.
    pub label: String,

    /// The unit multiplier (1 = every, 2 = every other, ...).
    #[serde(default = "default_count")]
    pub count: u32,

    /// The step unit, in lowercase ("second", "day", ...).
    pub unit: Unit,

    /// Optional `H:MM`/`HH:MM` anchor; only valid for day-stepped jobs.
    #[serde(default)]
    pub at: Option<String>,

    /// Optional bound on the number of firings.
    #[serde(default)]
    pub take: Option<i64>,
}

fn default_count() -> u32 {
    1
}

impl JobConfig {
    /// Builds the time sequence this job describes.
    ///
    /// # Returns
    /// A boxed sequence, so jobs with different shapes share one type.
    /// Fails with [`ScheduleError::InvalidArgument`] when `count` is zero,
    /// when `at` is combined with a unit other than `day`, or when `take`
    /// is negative, and with [`ScheduleError::Parse`] when `at` does not
    /// name a valid time of day.
    pub fn build(&self) -> Result<Box<dyn TimeSequence + Send + Sync>, ScheduleError> {
        if self.count == 0 {
            return Err(ScheduleError::InvalidArgument(format!(
                "job {:?} has a zero count",
                self.label
            )));
        }

        let sequence: Box<dyn TimeSequence + Send + Sync> = match &self.at {
            Some(time_of_day) => {
                if self.unit != Unit::Day {
                    return Err(ScheduleError::InvalidArgument(format!(
                        "job {:?} anchors at a time of day but steps in {}s",
                        self.label, self.unit
                    )));
                }
                Box::new(every(self.count).days().at(time_of_day)?)
            }
            None => Box::new(Periodic::new(self.unit.duration(self.count))),
        };

        match self.take {
            Some(count) => Ok(Box::new(sequence.take(count)?)),
            None => Ok(sequence),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> CadenceConfig {
        config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn deserializes_lowercase_units_and_defaults() {
        let parsed = parse(
            r#"
            [[jobs]]
            label = "heartbeat"
            count = 5
            unit = "second"

            [[jobs]]
            label = "daily-report"
            unit = "day"
            at = "12:15"
            take = 3
            "#,
        );

        assert_eq!(parsed.jobs.len(), 2);
        assert_eq!(parsed.jobs[0].unit, Unit::Second);
        assert_eq!(parsed.jobs[0].count, 5);
        assert_eq!(parsed.jobs[0].at, None);
        assert_eq!(parsed.jobs[1].count, 1);
        assert_eq!(parsed.jobs[1].at.as_deref(), Some("12:15"));
        assert_eq!(parsed.jobs[1].take, Some(3));
    }

    #[test]
    fn an_empty_config_has_no_jobs() {
        assert!(parse("").jobs.is_empty());
    }

    #[test]
    fn builds_a_periodic_sequence() {
        let parsed = parse(
            r#"
            [[jobs]]
            label = "heartbeat"
            count = 2
            unit = "minute"
            "#,
        );
        let sequence = parsed.jobs[0].build().unwrap();
        let points: Vec<_> = sequence.time_points().take(2).collect();
        assert_eq!(points[1] - points[0], chrono::Duration::minutes(2));
    }

    #[test]
    fn build_validates_its_inputs() {
        let zero = JobConfig {
            label: "zero".to_string(),
            count: 0,
            unit: Unit::Second,
            at: None,
            take: None,
        };
        assert!(matches!(
            zero.build(),
            Err(ScheduleError::InvalidArgument(_))
        ));

        let anchored_minutes = JobConfig {
            label: "anchored-minutes".to_string(),
            count: 1,
            unit: Unit::Minute,
            at: Some("12:15".to_string()),
            take: None,
        };
        assert!(matches!(
            anchored_minutes.build(),
            Err(ScheduleError::InvalidArgument(_))
        ));

        let bad_time = JobConfig {
            label: "bad-time".to_string(),
            count: 1,
            unit: Unit::Day,
            at: Some("12:60".to_string()),
            take: None,
        };
        assert_eq!(
            bad_time.build().unwrap_err(),
            ScheduleError::Parse("12:60".to_string())
        );

        let negative_take = JobConfig {
            label: "negative-take".to_string(),
            count: 1,
            unit: Unit::Second,
            at: None,
            take: Some(-1),
        };
        assert!(matches!(
            negative_take.build(),
            Err(ScheduleError::InvalidArgument(_))
        ));
    }
}
