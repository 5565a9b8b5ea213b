use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of day columns in a week
pub const DAYS_PER_WEEK: usize = 7;

/// Date format used for week keys
const KEY_FORMAT: &str = "%Y-%m-%d";

/// The Monday at or before `date` (Sunday maps to the Monday six days earlier)
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(offset)
}

/// Week key for the week containing `date`
pub fn week_key(date: NaiveDate) -> WeekKey {
    WeekKey(monday_of(date))
}

/// Identifies one Monday-to-Sunday week; displayed as the Monday's `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey(NaiveDate);

impl WeekKey {
    /// The Monday this key stands for
    pub fn monday(&self) -> NaiveDate {
        self.0
    }

    /// Calendar date of a day column (0 = Monday)
    pub fn day_date(&self, day_index: usize) -> NaiveDate {
        self.0 + Duration::days(day_index as i64)
    }

    /// Key of the week `weeks` away (negative goes back)
    pub fn shifted(&self, weeks: i64) -> Self {
        WeekKey(self.0 + Duration::weeks(weeks))
    }

    /// Short column label, e.g. "Mon 10"
    pub fn day_label(&self, day_index: usize) -> String {
        self.day_date(day_index).format("%a %-d").to_string()
    }

    /// Whether `date` falls inside this week
    pub fn contains(&self, date: NaiveDate) -> bool {
        monday_of(date) == self.0
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

impl FromStr for WeekKey {
    type Err = chrono::ParseError;

    /// Accepts any `YYYY-MM-DD` date and normalises it to its Monday
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s.trim(), KEY_FORMAT)?;
        Ok(week_key(date))
    }
}

impl Serialize for WeekKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_thursday_maps_to_monday() {
        assert_eq!(week_key(date("2024-06-13")).to_string(), "2024-06-10");
    }

    #[test]
    fn test_sunday_maps_to_previous_monday() {
        assert_eq!(monday_of(date("2024-06-16")), date("2024-06-10"));
        assert_eq!(monday_of(date("2024-06-17")), date("2024-06-17"));
    }

    #[test]
    fn test_whole_week_shares_one_key() {
        let monday = date("2023-12-25");
        for offset in 0..7 {
            let day = monday + Duration::days(offset);
            assert_eq!(week_key(day).monday(), monday);
            assert_eq!(monday_of(day).weekday(), chrono::Weekday::Mon);
        }
        assert_ne!(week_key(monday + Duration::days(7)).monday(), monday);
    }

    #[test]
    fn test_key_across_year_boundary() {
        // Wednesday 1 January 2025 belongs to the week starting 30 December 2024
        assert_eq!(week_key(date("2025-01-01")).to_string(), "2024-12-30");
    }

    #[test]
    fn test_parse_normalises_to_monday() {
        let key: WeekKey = "2024-06-13".parse().unwrap();
        assert_eq!(key.to_string(), "2024-06-10");
        assert!("13/06/2024".parse::<WeekKey>().is_err());
    }

    #[test]
    fn test_shift_and_day_dates() {
        let key = week_key(date("2024-06-13"));
        assert_eq!(key.shifted(-1).to_string(), "2024-06-03");
        assert_eq!(key.shifted(1).to_string(), "2024-06-17");
        assert_eq!(key.day_date(6), date("2024-06-16"));
        assert_eq!(key.day_label(0), "Mon 10");
        assert!(key.contains(date("2024-06-16")));
        assert!(!key.contains(date("2024-06-17")));
    }

    #[test]
    fn test_serde_as_string() {
        let key = week_key(date("2024-06-13"));
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-06-10\"");
        let back: WeekKey = serde_json::from_str("\"2024-06-10\"").unwrap();
        assert_eq!(back, key);
    }
}
