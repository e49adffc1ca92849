//! Human-relative time phrases ("3 minutes ago", "2 days from now").

use crate::types::Timestamp;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Describe `then` relative to `now` using the largest whole unit.
///
/// The count never drops below one, so an instant equal to `now` reads
/// "1 second ago".
pub fn relative_phrase(then: Timestamp, now: Timestamp) -> String {
    let delta = now.signed_duration_since(then).num_seconds();
    let future = delta < 0;
    let secs = delta.abs();

    let (count, unit) = match secs {
        s if s >= YEAR => (s / YEAR, "year"),
        s if s >= MONTH => (s / MONTH, "month"),
        s if s >= WEEK => (s / WEEK, "week"),
        s if s >= DAY => (s / DAY, "day"),
        s if s >= HOUR => (s / HOUR, "hour"),
        s if s >= MINUTE => (s / MINUTE, "minute"),
        s => (s, "second"),
    };
    let count = count.max(1);
    let plural = if count == 1 { "" } else { "s" };
    let direction = if future { "from now" } else { "ago" };

    format!("{count} {unit}{plural} {direction}")
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2023, 4, 4, 15, 35, 31).unwrap()
    }

    #[test]
    fn same_instant_is_one_second_ago() {
        assert_eq!(relative_phrase(now(), now()), "1 second ago");
    }

    #[test]
    fn minutes_are_pluralised() {
        let then = now() - Duration::minutes(3);
        assert_eq!(relative_phrase(then, now()), "3 minutes ago");
    }

    #[test]
    fn partial_units_round_down() {
        let then = now() - Duration::minutes(119);
        assert_eq!(relative_phrase(then, now()), "1 hour ago");
    }

    #[test]
    fn larger_units() {
        assert_eq!(relative_phrase(now() - Duration::days(1), now()), "1 day ago");
        assert_eq!(relative_phrase(now() - Duration::days(14), now()), "2 weeks ago");
        assert_eq!(relative_phrase(now() - Duration::days(65), now()), "2 months ago");
        assert_eq!(relative_phrase(now() - Duration::days(800), now()), "2 years ago");
    }

    #[test]
    fn future_instants_read_from_now() {
        let then = now() + Duration::hours(5);
        assert_eq!(relative_phrase(then, now()), "5 hours from now");
    }
}
