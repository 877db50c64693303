use chrono::{NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTimeError {
    #[error("empty time string")]
    Empty,
    #[error("'{0}' is not in H:MM AM/PM form")]
    Malformed(String),
    #[error("hour {0} is outside 1-12")]
    HourOutOfRange(u32),
    #[error("minute {0} is outside 0-59")]
    MinuteOutOfRange(u32),
}

/// A wall-clock time of day with minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Builds a time from minutes since midnight, wrapping in either direction.
    pub fn from_minutes(minutes: i64) -> Self {
        let m = minutes.rem_euclid(MINUTES_PER_DAY);
        Self {
            hour: (m / 60) as u8,
            minute: (m % 60) as u8,
        }
    }

    pub fn minutes_since_midnight(&self) -> i64 {
        self.hour as i64 * 60 + self.minute as i64
    }

    /// Adds a signed number of minutes. Crossing midnight wraps silently.
    pub fn add_minutes(&self, minutes: i64) -> Self {
        Self::from_minutes(self.minutes_since_midnight() + minutes)
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        // hour/minute are range-checked on construction
        NaiveTime::from_hms_opt(self.hour as u32, self.minute as u32, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(t: NaiveTime) -> Self {
        Self {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
        }
    }
}

/// Parses 12-hour clock strings such as `05:12 AM`, `5:12am` or `12:00 PM`.
impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseTimeError::Empty);
        }
        let malformed = || ParseTimeError::Malformed(s.to_string());

        let (clock, marker) = s
            .len()
            .checked_sub(2)
            .filter(|&i| s.is_char_boundary(i))
            .map(|i| s.split_at(i))
            .ok_or_else(malformed)?;
        let pm = match marker.to_ascii_uppercase().as_str() {
            "AM" => false,
            "PM" => true,
            _ => return Err(malformed()),
        };

        let (h, m) = clock.trim_end().split_once(':').ok_or_else(malformed)?;
        let digits = |part: &str| {
            (1..=2).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !digits(h) || !digits(m) {
            return Err(malformed());
        }
        let hour: u32 = h.parse().map_err(|_| malformed())?;
        let minute: u32 = m.parse().map_err(|_| malformed())?;

        if !(1..=12).contains(&hour) {
            return Err(ParseTimeError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ParseTimeError::MinuteOutOfRange(minute));
        }

        let hour = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }
}

/// Renders as `H:MM AM` with the hour unpadded.
impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let period = if self.hour >= 12 { "PM" } else { "AM" };
        let hour12 = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        write!(f, "{}:{:02} {}", hour12, self.minute, period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn converts_twelve_hour_markers() {
        assert_eq!(t("12:00 AM").minutes_since_midnight(), 0);
        assert_eq!(t("12:30 PM").minutes_since_midnight(), 12 * 60 + 30);
        assert_eq!(t("05:12 AM").minutes_since_midnight(), 5 * 60 + 12);
        assert_eq!(t("8:15 pm").minutes_since_midnight(), 20 * 60 + 15);
        assert_eq!(t("8:15PM"), t("8:15 PM"));
    }

    #[test]
    fn formats_without_hour_padding() {
        assert_eq!(t("05:00 AM").to_string(), "5:00 AM");
        assert_eq!(t("12:05 AM").to_string(), "12:05 AM");
        assert_eq!(t("12:45 PM").to_string(), "12:45 PM");
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!("".parse::<TimeOfDay>(), Err(ParseTimeError::Empty));
        assert_eq!("  ".parse::<TimeOfDay>(), Err(ParseTimeError::Empty));
        assert!(matches!("17:00".parse::<TimeOfDay>(), Err(ParseTimeError::Malformed(_))));
        assert!(matches!("5 AM".parse::<TimeOfDay>(), Err(ParseTimeError::Malformed(_))));
        assert!(matches!("--:--".parse::<TimeOfDay>(), Err(ParseTimeError::Malformed(_))));
        assert!(matches!("5:2x AM".parse::<TimeOfDay>(), Err(ParseTimeError::Malformed(_))));
        assert_eq!("13:00 PM".parse::<TimeOfDay>(), Err(ParseTimeError::HourOutOfRange(13)));
        assert_eq!("0:10 AM".parse::<TimeOfDay>(), Err(ParseTimeError::HourOutOfRange(0)));
        assert_eq!("5:60 AM".parse::<TimeOfDay>(), Err(ParseTimeError::MinuteOutOfRange(60)));
    }

    #[test]
    fn non_ascii_input_does_not_panic() {
        assert!("5:00 ÅM".parse::<TimeOfDay>().is_err());
        assert!("é".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn adding_minutes_wraps_past_midnight() {
        assert_eq!(t("11:50 PM").add_minutes(20).to_string(), "12:10 AM");
        assert_eq!(t("12:10 AM").add_minutes(-20).to_string(), "11:50 PM");
    }

    proptest! {
        #[test]
        fn parse_then_format_is_canonical(hour in 1u32..=12, minute in 0u32..60, pm in any::<bool>()) {
            let marker = if pm { "PM" } else { "AM" };
            let canonical = format!("{}:{:02} {}", hour, minute, marker);
            let padded = format!("{:02}:{:02} {}", hour, minute, marker);
            prop_assert_eq!(t(&canonical).add_minutes(0).to_string(), canonical.clone());
            prop_assert_eq!(t(&padded).to_string(), canonical);
        }

        #[test]
        fn a_full_day_is_the_identity(minutes in 0i64..MINUTES_PER_DAY, offset in -3000i64..3000) {
            let base = TimeOfDay::from_minutes(minutes);
            prop_assert_eq!(base.add_minutes(offset + MINUTES_PER_DAY), base.add_minutes(offset));
        }
    }
}
