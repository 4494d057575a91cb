//! Time primitives: points, fixed-duration units, and time-of-day anchoring.

use crate::error::ScheduleError;
use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::Deserialize;
use std::fmt;

/// An absolute wall-clock instant.
///
/// Time points are plain `Copy` values; every "add a duration" operation
/// produces a new point and nothing is ever mutated in place, so two
/// traversals of the same sequence can never alias each other's state.
pub type TimePoint = DateTime<Utc>;

/// A unit of time, defined as a fixed number of milliseconds.
///
/// A `Day` is always exactly 86,400,000 ms and a `Week` exactly seven of
/// those. No unit is calendar-aware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
}

impl Unit {
    /// The unit's length in milliseconds.
    #[must_use]
    pub const fn millis(self) -> i64 {
        match self {
            Self::Millisecond => 1,
            Self::Second => 1_000,
            Self::Minute => 60_000,
            Self::Hour => 3_600_000,
            Self::Day => 86_400_000,
            Self::Week => 604_800_000,
        }
    }

    /// `count` of this unit as a concrete duration.
    #[must_use]
    pub fn duration(self, count: u32) -> Duration {
        Duration::milliseconds(self.millis() * i64::from(count))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Millisecond => "millisecond",
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
        };
        write!(f, "{name}")
    }
}

/// Parses a wall-clock time of day matching `H:MM` or `HH:MM`.
///
/// Hours run 0-23 and minutes 0-59; anything else, including extra
/// components or non-digit characters, is a [`ScheduleError::Parse`].
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, ScheduleError> {
    let parsed = input.split_once(':').and_then(|(hours, minutes)| {
        if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
            return None;
        }
        if !hours.bytes().all(|b| b.is_ascii_digit())
            || !minutes.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let hour: u32 = hours.parse().ok()?;
        let minute: u32 = minutes.parse().ok()?;
        NaiveTime::from_hms_opt(hour, minute, 0)
    });
    parsed.ok_or_else(|| ScheduleError::Parse(input.to_string()))
}

/// Computes the next absolute instant at which `time_of_day` occurs in the
/// given timezone: today if still in the future, otherwise tomorrow.
pub fn next_occurrence_in<Z: TimeZone>(tz: &Z, time_of_day: NaiveTime) -> TimePoint {
    let now = Utc::now().with_timezone(tz);
    next_occurrence_after(&now, time_of_day)
}

fn next_occurrence_after<Z: TimeZone>(now: &DateTime<Z>, time_of_day: NaiveTime) -> TimePoint {
    let tz = now.timezone();
    let today = now.date_naive();
    let candidate = resolve_wall_clock(&tz, today.and_time(time_of_day));
    if candidate > *now {
        return candidate.with_timezone(&Utc);
    }
    let tomorrow = today.succ_opt().unwrap_or(today);
    resolve_wall_clock(&tz, tomorrow.and_time(time_of_day)).with_timezone(&Utc)
}

/// Maps a naive wall-clock reading onto a real instant in `tz`.
///
/// A DST fold resolves to the earlier of the two instants. A spring-forward
/// gap slides to the first valid instant an hour later.
fn resolve_wall_clock<Z: TimeZone>(tz: &Z, wall: NaiveDateTime) -> DateTime<Z> {
    match tz.from_local_datetime(&wall) {
        LocalResult::Single(point) => point,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => match tz.from_local_datetime(&(wall + Duration::hours(1))) {
            LocalResult::Single(point) | LocalResult::Ambiguous(point, _) => point,
            LocalResult::None => tz.from_utc_datetime(&wall),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_are_fixed_millisecond_multiples() {
        assert_eq!(Unit::Millisecond.millis(), 1);
        assert_eq!(Unit::Second.duration(5), Duration::milliseconds(5_000));
        assert_eq!(Unit::Hour.millis(), 60 * Unit::Minute.millis());
        assert_eq!(Unit::Day.duration(1), Duration::milliseconds(86_400_000));
        assert_eq!(Unit::Week.millis(), 7 * Unit::Day.millis());
    }

    #[test]
    fn parses_single_and_double_digit_hours() {
        assert_eq!(
            parse_time_of_day("7:05"),
            Ok(NaiveTime::from_hms_opt(7, 5, 0).unwrap())
        );
        assert_eq!(
            parse_time_of_day("12:15"),
            Ok(NaiveTime::from_hms_opt(12, 15, 0).unwrap())
        );
        assert_eq!(
            parse_time_of_day("00:00"),
            Ok(NaiveTime::from_hms_opt(0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_time_of_day("23:59"),
            Ok(NaiveTime::from_hms_opt(23, 59, 0).unwrap())
        );
    }

    #[test]
    fn rejects_out_of_range_and_malformed_input() {
        for input in [
            "24:00", "12:60", "abc", "1215", "12:5", "12:155", ":15", "12:", "-1:30", "12:15:00",
            "12 :15",
        ] {
            assert_eq!(
                parse_time_of_day(input),
                Err(ScheduleError::Parse(input.to_string())),
                "input {input:?} should be rejected"
            );
        }
    }

    #[test]
    fn anchors_to_today_when_the_time_is_still_ahead() {
        let now = Utc.with_ymd_and_hms(2026, 3, 9, 10, 0, 0).unwrap();
        let at = next_occurrence_after(&now, NaiveTime::from_hms_opt(12, 15, 0).unwrap());
        assert_eq!(at, Utc.with_ymd_and_hms(2026, 3, 9, 12, 15, 0).unwrap());
    }

    #[test]
    fn anchors_to_tomorrow_when_the_time_has_passed() {
        let now = Utc.with_ymd_and_hms(2026, 3, 9, 13, 0, 0).unwrap();
        let at = next_occurrence_after(&now, NaiveTime::from_hms_opt(12, 15, 0).unwrap());
        assert_eq!(at, Utc.with_ymd_and_hms(2026, 3, 10, 12, 15, 0).unwrap());
    }

    #[test]
    fn an_exact_match_counts_as_already_passed() {
        let now = Utc.with_ymd_and_hms(2026, 3, 9, 12, 15, 0).unwrap();
        let at = next_occurrence_after(&now, NaiveTime::from_hms_opt(12, 15, 0).unwrap());
        assert_eq!(at, Utc.with_ymd_and_hms(2026, 3, 10, 12, 15, 0).unwrap());
    }

    #[test]
    fn anchoring_respects_the_timezone() {
        use chrono_tz::America::New_York;

        let now = New_York.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap();
        let at = next_occurrence_after(&now, NaiveTime::from_hms_opt(12, 15, 0).unwrap());
        assert_eq!(at, New_York.with_ymd_and_hms(2026, 6, 1, 12, 15, 0).unwrap());
    }
}
