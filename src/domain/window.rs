use crate::domain::policy::TimeWindowPolicy;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Time-of-day eligibility window, both ends `HH:MM:SS` and inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableTime {
    pub start: String,
    pub end: String,
}

/// Offset from midnight described by an `HH:MM:SS` string.
///
/// Parsing is lenient: blank components count as zero, `0x`/`0o`/`0b`
/// integer literals are read in their radix, out-of-range values roll over
/// into the next unit (`24:00:00` is the following midnight) and only
/// non-numeric or missing components make the value unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay(TimeDelta);

impl TimeOfDay {
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split(':');
        let hours = parse_component(parts.next()?)?;
        let minutes = parse_component(parts.next()?)?;
        let seconds = parse_component(parts.next()?)?;

        let offset = TimeDelta::try_hours(hours)?
            .checked_add(&TimeDelta::try_minutes(minutes)?)?
            .checked_add(&TimeDelta::try_seconds(seconds)?)?;
        Some(Self(offset))
    }

    pub fn offset(&self) -> TimeDelta {
        self.0
    }

    /// The instant this time of day falls on for the given calendar date.
    pub fn on(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        date.and_hms_opt(0, 0, 0)?.checked_add_signed(self.0)
    }
}

fn parse_component(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    if let Some((digits, radix)) = radix_literal(trimmed) {
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        return i64::from_str_radix(digits, radix).ok();
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value.abs() < i64::MAX as f64 => {
            Some(value.trunc() as i64)
        }
        _ => None,
    }
}

/// `0x`, `0o` and `0b` prefixed integers, unsigned only.
fn radix_literal(value: &str) -> Option<(&str, u32)> {
    [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| value.strip_prefix(prefix).map(|digits| (digits, radix)))
}

impl AvailableTime {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Whether `reference` falls inside the window built on its own date.
    ///
    /// A boundary that cannot be parsed never rejects.
    pub fn admits(&self, reference: NaiveDateTime, policy: TimeWindowPolicy) -> bool {
        let date = reference.date();
        let start = self.boundary(&self.start, date);
        let end = self.boundary(&self.end, date);

        match (start, end, policy) {
            (Some(start), Some(end), TimeWindowPolicy::WrapOvernight) if end < start => {
                reference >= start || reference <= end
            }
            _ => {
                let after_start = start.map_or(true, |start| reference >= start);
                let before_end = end.map_or(true, |end| reference <= end);
                after_start && before_end
            }
        }
    }

    fn boundary(&self, raw: &str, date: NaiveDate) -> Option<NaiveDateTime> {
        let boundary = TimeOfDay::parse(raw).and_then(|time| time.on(date));
        if boundary.is_none() {
            tracing::warn!(
                "⚠️ Ignoring unusable time boundary '{}' in window {}-{}",
                raw,
                self.start,
                self.end
            );
        }
        boundary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("2025-03-14T{}", time), "%Y-%m-%dT%H:%M:%S")
            .unwrap()
    }

    #[test]
    fn test_parse_time_of_day() {
        let time = TimeOfDay::parse("09:30:15").unwrap();
        assert_eq!(time.offset().num_seconds(), 9 * 3600 + 30 * 60 + 15);
    }

    #[test]
    fn test_parse_rolls_over_out_of_range_values() {
        let midnight = TimeOfDay::parse("24:00:00").unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(
            midnight.on(date).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert_eq!(
            TimeOfDay::parse("10:75:00").unwrap(),
            TimeOfDay::parse("11:15:00").unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_non_numeric_or_missing_components() {
        assert!(TimeOfDay::parse("ab:00:00").is_none());
        assert!(TimeOfDay::parse("09:00").is_none());
        assert!(TimeOfDay::parse("").is_none());
        assert_eq!(
            TimeOfDay::parse("9::").unwrap(),
            TimeOfDay::parse("09:00:00").unwrap()
        );
    }

    #[test]
    fn test_parse_accepts_radix_literals() {
        assert_eq!(
            TimeOfDay::parse("0x0A:00:00").unwrap(),
            TimeOfDay::parse("10:00:00").unwrap()
        );
        assert_eq!(
            TimeOfDay::parse("0b1001:0o36:0X0f").unwrap(),
            TimeOfDay::parse("09:30:15").unwrap()
        );
        assert!(TimeOfDay::parse("0x:00:00").is_none());
        assert!(TimeOfDay::parse("0xZZ:00:00").is_none());
        assert!(TimeOfDay::parse("0x-5:00:00").is_none());
    }

    #[test]
    fn test_hex_start_boundary_still_rejects_early_times() {
        let window = AvailableTime::new("0x0A:00:00", "18:00:00");
        assert!(!window.admits(at("09:00:00"), TimeWindowPolicy::SameDay));
        assert!(window.admits(at("10:00:00"), TimeWindowPolicy::SameDay));
    }

    #[test]
    fn test_window_is_inclusive() {
        let window = AvailableTime::new("09:00:00", "18:00:00");
        let policy = TimeWindowPolicy::SameDay;
        assert!(!window.admits(at("08:59:59"), policy));
        assert!(window.admits(at("09:00:00"), policy));
        assert!(window.admits(at("18:00:00"), policy));
        assert!(!window.admits(at("18:00:01"), policy));
    }

    #[test]
    fn test_overnight_window_same_day_admits_nothing() {
        let window = AvailableTime::new("22:00:00", "06:00:00");
        for time in ["00:00:00", "05:00:00", "12:00:00", "23:00:00"] {
            assert!(!window.admits(at(time), TimeWindowPolicy::SameDay), "{}", time);
        }
    }

    #[test]
    fn test_overnight_window_wraps_when_enabled() {
        let window = AvailableTime::new("22:00:00", "06:00:00");
        let policy = TimeWindowPolicy::WrapOvernight;
        assert!(window.admits(at("23:30:00"), policy));
        assert!(window.admits(at("06:00:00"), policy));
        assert!(window.admits(at("22:00:00"), policy));
        assert!(!window.admits(at("06:00:01"), policy));
        assert!(!window.admits(at("12:00:00"), policy));
    }

    #[test]
    fn test_unusable_boundary_never_rejects() {
        let window = AvailableTime::new("nine", "18:00:00");
        assert!(window.admits(at("03:00:00"), TimeWindowPolicy::SameDay));
        assert!(!window.admits(at("19:00:00"), TimeWindowPolicy::SameDay));

        let broken = AvailableTime::new("xx", "yy");
        assert!(broken.admits(at("23:59:59"), TimeWindowPolicy::SameDay));
    }
}
