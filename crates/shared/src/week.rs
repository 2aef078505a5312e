use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WeekIdError {
    #[error("week id must be a Monday, got {0}")]
    NotMonday(NaiveDate),

    #[error("invalid week id: {0}")]
    Invalid(String),
}

/// Canonical identifier for a calendar week: the ISO date of its Monday.
///
/// Serialized as `YYYY-MM-DD`, which is locale-independent and orders
/// lexicographically the same way the weeks order chronologically. Used as
/// the key into per-week override and accepted-quest maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekId(NaiveDate);

impl WeekId {
    /// Build a week id from a date already known to be a Monday.
    pub fn from_monday(date: NaiveDate) -> Result<Self, WeekIdError> {
        if date.weekday() == Weekday::Mon {
            Ok(WeekId(date))
        } else {
            Err(WeekIdError::NotMonday(date))
        }
    }

    /// The week containing `date`, snapped back to its Monday.
    pub fn containing(date: NaiveDate) -> Self {
        let back = date.weekday().num_days_from_monday() as i64;
        WeekId(date - Duration::days(back))
    }

    pub fn monday(&self) -> NaiveDate {
        self.0
    }

    pub fn next(&self) -> Self {
        WeekId(self.0 + Duration::days(7))
    }

    pub fn prev(&self) -> Self {
        WeekId(self.0 - Duration::days(7))
    }

    /// Calendar date of `day` within this week (0 = Monday).
    pub fn date_of_day(&self, day: u8) -> NaiveDate {
        self.0 + Duration::days(day as i64)
    }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for WeekId {
    type Err = WeekIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| WeekIdError::Invalid(s.to_string()))?;
        WeekId::from_monday(date)
    }
}

// Manual serde impls so a week id is always a string on the wire (including
// as a JSON map key) and so deserialization enforces the Monday invariant.
impl Serialize for WeekId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn containing_snaps_to_monday() {
        // 2026-08-27 is a Thursday; its week starts 2026-08-24.
        let week = WeekId::containing(date(2026, 8, 27));
        assert_eq!(week.monday(), date(2026, 8, 24));

        // A Monday maps to itself.
        let week = WeekId::containing(date(2026, 8, 24));
        assert_eq!(week.monday(), date(2026, 8, 24));
    }

    #[test]
    fn from_monday_rejects_other_days() {
        assert!(WeekId::from_monday(date(2026, 8, 24)).is_ok());
        assert_eq!(
            WeekId::from_monday(date(2026, 8, 25)),
            Err(WeekIdError::NotMonday(date(2026, 8, 25)))
        );
    }

    #[test]
    fn ordering_follows_calendar() {
        let a = WeekId::containing(date(2026, 1, 5));
        let b = WeekId::containing(date(2026, 1, 12));
        assert!(a < b);
        assert_eq!(a.next(), b);
        assert_eq!(b.prev(), a);
    }

    #[test]
    fn serde_round_trips_as_string() {
        let week = WeekId::containing(date(2026, 8, 24));
        let json = serde_json::to_string(&week).unwrap();
        assert_eq!(json, "\"2026-08-24\"");
        let back: WeekId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, week);

        // Non-Monday strings are rejected.
        assert!(serde_json::from_str::<WeekId>("\"2026-08-25\"").is_err());
    }
}
