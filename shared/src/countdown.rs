use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl CountdownParts {
    pub fn from_seconds(total_secs: i64) -> Self {
        let secs = total_secs.max(0);
        Self {
            days: secs / 86_400,
            hours: (secs % 86_400) / 3600,
            minutes: (secs % 3600) / 60,
            seconds: secs % 60,
        }
    }

    pub fn total_seconds(&self) -> i64 {
        self.days * 86_400 + self.hours * 3600 + self.minutes * 60 + self.seconds
    }

    /// `[days, hours, minutes, seconds]`, each zero-padded to at least two digits.
    pub fn padded(&self) -> [String; 4] {
        [self.days, self.hours, self.minutes, self.seconds].map(|n| format!("{n:02}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Remaining(CountdownParts),
    Departed,
}

/// Time left until `target`, floored to whole seconds. `Departed` once `now`
/// reaches the target, and on every later sample.
pub fn remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> Countdown {
    let diff_ms = (target - now).num_milliseconds();
    if diff_ms <= 0 {
        return Countdown::Departed;
    }
    Countdown::Remaining(CountdownParts::from_seconds(diff_ms / 1000))
}

/// Interpret a wall-clock departure in `tz`. Ambiguous times resolve to the
/// earlier instant; times skipped by a DST jump have no instant.
pub fn departure_instant<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, FixedOffset};

    use super::*;
    use crate::itinerary::default_departure;

    fn target() -> DateTime<Utc> {
        departure_instant(default_departure(), &Utc).unwrap()
    }

    #[test]
    fn splits_difference_into_units() {
        let now = target() - Duration::seconds(3 * 86_400 + 4 * 3600 + 5 * 60 + 6);
        assert_eq!(
            remaining(target(), now),
            Countdown::Remaining(CountdownParts {
                days: 3,
                hours: 4,
                minutes: 5,
                seconds: 6,
            })
        );
    }

    #[test]
    fn units_sum_to_total_within_a_second() {
        for offset_ms in [1_i64, 999, 1_000, 59_999, 3_600_000, 90_061_500, 2_000_000_123] {
            let now = target() - Duration::milliseconds(offset_ms);
            let Countdown::Remaining(parts) = remaining(target(), now) else {
                panic!("expected time remaining for offset {offset_ms}");
            };
            let diff = offset_ms as f64 / 1000.0 - parts.total_seconds() as f64;
            assert!((0.0..1.0).contains(&diff), "offset {offset_ms}: diff {diff}");
            assert!(parts.hours < 24 && parts.minutes < 60 && parts.seconds < 60);
        }
    }

    #[test]
    fn pads_to_two_digits() {
        let parts = CountdownParts::from_seconds(86_400 * 7 + 3600 + 60 + 1);
        assert_eq!(parts.padded(), ["07", "01", "01", "01"].map(String::from));
        let long = CountdownParts::from_seconds(86_400 * 123);
        assert_eq!(long.padded()[0], "123");
    }

    #[test]
    fn departed_at_and_after_target() {
        assert_eq!(remaining(target(), target()), Countdown::Departed);
        assert_eq!(
            remaining(target(), target() + Duration::days(3)),
            Countdown::Departed
        );
    }

    #[test]
    fn departure_respects_time_zone() {
        let nzdt = FixedOffset::east_opt(13 * 3600).unwrap();
        let instant = departure_instant(default_departure(), &nzdt).unwrap();
        assert_eq!(instant.to_rfc3339(), "2026-11-05T11:00:00+00:00");
    }
}
