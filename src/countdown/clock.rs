//! Remaining-time decomposition and digit formatting.

use chrono::{Local, NaiveDateTime, TimeZone};

use crate::constants::{TARGET_DATE, TARGET_DATE_FORMAT};

/// Milliseconds per second.
pub const MS_PER_SECOND: i64 = 1000;
/// Milliseconds per minute.
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
/// Milliseconds per hour.
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
/// Milliseconds per day.
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// The display units of the countdown, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// Whole days remaining
    Days,
    /// Hours within the current day (0-23)
    Hours,
    /// Minutes within the current hour (0-59)
    Minutes,
    /// Seconds within the current minute (0-59)
    Seconds,
}

impl TimeUnit {
    /// All units in render order.
    pub const ALL: [Self; 4] = [Self::Days, Self::Hours, Self::Minutes, Self::Seconds];

    /// Uppercase label rendered beneath the unit's panel group.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Days => "DAYS",
            Self::Hours => "HOURS",
            Self::Minutes => "MINUTES",
            Self::Seconds => "SECONDS",
        }
    }

    /// Number of digit cells the unit occupies: three for days, two for
    /// the clock units.
    #[must_use]
    pub const fn digit_count(self) -> usize {
        match self {
            Self::Days => 3,
            Self::Hours | Self::Minutes | Self::Seconds => 2,
        }
    }
}

/// One snapshot of the remaining time, decomposed into display units.
///
/// All four components derive from the same `remaining` value, so they are
/// always mutually consistent. Not stored anywhere; recomputed each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    /// Whole days remaining
    pub days: i64,
    /// Hours within the current day (0-23)
    pub hours: i64,
    /// Minutes within the current hour (0-59)
    pub minutes: i64,
    /// Seconds within the current minute (0-59)
    pub seconds: i64,
}

impl Countdown {
    /// The all-zero countdown displayed once the target has passed.
    pub const ZERO: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Decomposes a remaining-milliseconds value into display units.
    ///
    /// Negative inputs clamp to [`Countdown::ZERO`].
    #[must_use]
    pub const fn from_remaining_ms(remaining: i64) -> Self {
        if remaining < 0 {
            return Self::ZERO;
        }
        Self {
            days: remaining / MS_PER_DAY,
            hours: (remaining % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (remaining % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (remaining % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    /// Returns true when every component is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    /// Formats one unit as a fixed-minimum-width zero-padded decimal string.
    ///
    /// Days pad to three digits, the clock units to two. Values wider than
    /// the padding are never truncated; the width is a minimum only.
    #[must_use]
    pub fn unit_text(&self, unit: TimeUnit) -> String {
        match unit {
            TimeUnit::Days => format!("{:03}", self.days),
            TimeUnit::Hours => format!("{:02}", self.hours),
            TimeUnit::Minutes => format!("{:02}", self.minutes),
            TimeUnit::Seconds => format!("{:02}", self.seconds),
        }
    }
}

/// Epoch milliseconds of the compiled-in target instant, in local time.
///
/// Falls back to interpreting the constant as UTC if the local timezone
/// has no unambiguous mapping for it (DST gaps).
#[must_use]
pub fn target_millis() -> i64 {
    match NaiveDateTime::parse_from_str(TARGET_DATE, TARGET_DATE_FORMAT) {
        Ok(naive) => Local
            .from_local_datetime(&naive)
            .earliest()
            .map_or_else(|| naive.and_utc().timestamp_millis(), |dt| dt.timestamp_millis()),
        Err(err) => {
            tracing::error!(date = TARGET_DATE, %err, "invalid target date constant");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_one_of_each() {
        // 1 day, 1 hour, 1 minute, 1 second = 90_061 seconds
        let countdown = Countdown::from_remaining_ms(90_061 * MS_PER_SECOND);
        assert_eq!(countdown.days, 1);
        assert_eq!(countdown.hours, 1);
        assert_eq!(countdown.minutes, 1);
        assert_eq!(countdown.seconds, 1);
    }

    #[test]
    fn test_decompose_zero() {
        assert_eq!(Countdown::from_remaining_ms(0), Countdown::ZERO);
        assert!(Countdown::from_remaining_ms(0).is_zero());
    }

    #[test]
    fn test_decompose_sub_second() {
        let countdown = Countdown::from_remaining_ms(999);
        assert!(countdown.is_zero());
    }

    #[test]
    fn test_decompose_negative_clamps() {
        assert_eq!(Countdown::from_remaining_ms(-1), Countdown::ZERO);
        assert_eq!(Countdown::from_remaining_ms(i64::MIN), Countdown::ZERO);
    }

    #[test]
    fn test_decompose_reconstruction_bounds() {
        let samples = [
            0,
            1,
            999,
            1000,
            59_999,
            60_000,
            MS_PER_HOUR - 1,
            MS_PER_HOUR,
            MS_PER_DAY - 1,
            MS_PER_DAY,
            MS_PER_DAY + MS_PER_HOUR + MS_PER_MINUTE + MS_PER_SECOND,
            123 * MS_PER_DAY + 7 * MS_PER_HOUR + 500,
            1234 * MS_PER_DAY + 23 * MS_PER_HOUR + 59 * MS_PER_MINUTE + 59 * MS_PER_SECOND + 999,
        ];

        for remaining in samples {
            let c = Countdown::from_remaining_ms(remaining);
            let reconstructed = c.days * MS_PER_DAY
                + c.hours * MS_PER_HOUR
                + c.minutes * MS_PER_MINUTE
                + c.seconds * MS_PER_SECOND;

            assert!(reconstructed <= remaining, "remaining = {remaining}");
            assert!(remaining < reconstructed + MS_PER_SECOND, "remaining = {remaining}");
            assert!((0..24).contains(&c.hours), "remaining = {remaining}");
            assert!((0..60).contains(&c.minutes), "remaining = {remaining}");
            assert!((0..60).contains(&c.seconds), "remaining = {remaining}");
        }
    }

    #[test]
    fn test_unit_text_padding() {
        let countdown = Countdown {
            days: 7,
            hours: 5,
            minutes: 0,
            seconds: 42,
        };
        assert_eq!(countdown.unit_text(TimeUnit::Days), "007");
        assert_eq!(countdown.unit_text(TimeUnit::Hours), "05");
        assert_eq!(countdown.unit_text(TimeUnit::Minutes), "00");
        assert_eq!(countdown.unit_text(TimeUnit::Seconds), "42");
    }

    #[test]
    fn test_unit_text_no_truncation() {
        let countdown = Countdown {
            days: 1234,
            hours: 0,
            minutes: 0,
            seconds: 0,
        };
        assert_eq!(countdown.unit_text(TimeUnit::Days), "1234");
    }

    #[test]
    fn test_unit_metadata() {
        assert_eq!(TimeUnit::Days.digit_count(), 3);
        assert_eq!(TimeUnit::Hours.digit_count(), 2);
        assert_eq!(TimeUnit::Minutes.digit_count(), 2);
        assert_eq!(TimeUnit::Seconds.digit_count(), 2);
        assert_eq!(TimeUnit::Days.label(), "DAYS");
        assert_eq!(TimeUnit::ALL.len(), 4);
    }

    #[test]
    fn test_target_parses() {
        // The compiled-in constant must always parse; epoch 0 is the
        // logged fallback for a broken constant.
        assert_ne!(target_millis(), 0);
    }
}
