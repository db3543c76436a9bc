//! Time utilities: HH:MM values and quarter-hour rounding.

use anyhow::{Result, bail};
use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;

/// A zero-padded "HH:MM" value backed by a whole-minute count.
///
/// Doubles as a duration (hours may exceed 23, "26:00" is a valid two-day
/// hike) and as a time of day inside opening hours. Serializes as the
/// formatted string, so parse and format round-trip exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HhMm(u32);

impl HhMm {
    pub fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Saturates at `u32::MAX` minutes; upstream components are untrusted.
    pub fn from_hours_minutes(hours: u32, minutes: u32) -> Self {
        Self(hours.saturating_mul(60).saturating_add(minutes))
    }

    /// Total minutes this value stands for.
    pub fn minutes(&self) -> u32 {
        self.0
    }

    /// Parse a "HH:MM" string. Hours are unbounded, minutes must be 0-59.
    pub fn parse(s: &str) -> Result<Self> {
        let Some((h, m)) = s.split_once(':') else {
            bail!("invalid HH:MM value '{s}': missing ':'");
        };
        let hours: u32 = h
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid hours in '{s}'"))?;
        let mins: u32 = m
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid minutes in '{s}'"))?;
        if mins >= 60 {
            bail!("minutes out of range in '{s}'");
        }
        Ok(Self::from_hours_minutes(hours, mins))
    }
}

impl fmt::Display for HhMm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for HhMm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HhMm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        HhMm::parse(&s).map_err(de::Error::custom)
    }
}

/// Round to the nearest 15-minute boundary, ties rounding up.
pub fn round_to_quarter_hour(dt: NaiveDateTime) -> NaiveDateTime {
    let dt = zero_seconds(dt);
    let r = dt.minute() % 15;
    if r < 8 {
        dt - Duration::minutes(r.into())
    } else {
        dt + Duration::minutes((15 - r).into())
    }
}

/// Round up to the next 15-minute boundary.
pub fn ceil_to_quarter_hour(dt: NaiveDateTime) -> NaiveDateTime {
    let dt = zero_seconds(dt);
    let add = match dt.minute() % 15 {
        0 => 0,
        r => 15 - r,
    };
    dt + Duration::minutes(add.into())
}

/// Round a minute count up to the next multiple of 15. Exact multiples stay.
pub fn ceil_minutes_to_quarter(minutes: f64) -> i64 {
    ((minutes / 15.0).ceil() * 15.0) as i64
}

fn zero_seconds(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_second(0).unwrap().with_nanosecond(0).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_format_round_trip() {
        for s in ["00:00", "09:05", "10:30", "26:00"] {
            assert_eq!(HhMm::parse(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(HhMm::parse("930").is_err());
        assert!(HhMm::parse("9:75").is_err());
        assert!(HhMm::parse("x:30").is_err());
    }

    #[test]
    fn test_display_zero_pads() {
        assert_eq!(HhMm::from_hours_minutes(9, 5).to_string(), "09:05");
        assert_eq!(HhMm::from_minutes(150).to_string(), "02:30");
    }

    #[test]
    fn test_huge_components_saturate() {
        assert_eq!(HhMm::from_hours_minutes(u32::MAX, 59).minutes(), u32::MAX);
        // parse routes through the same saturating constructor
        assert_eq!(HhMm::parse("4294967295:59").unwrap().minutes(), u32::MAX);
    }

    #[test]
    fn test_serde_as_string() {
        let v = HhMm::from_hours_minutes(1, 30);
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"01:30\"");
        let back: HhMm = serde_json::from_str("\"01:30\"").unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_round_nearest() {
        assert_eq!(round_to_quarter_hour(at(10, 7)), at(10, 0));
        assert_eq!(round_to_quarter_hour(at(10, 8)), at(10, 15));
        assert_eq!(round_to_quarter_hour(at(10, 22)), at(10, 15));
        // past the midpoint rounds up
        assert_eq!(round_to_quarter_hour(at(10, 23)), at(10, 30));
        assert_eq!(round_to_quarter_hour(at(10, 45)), at(10, 45));
    }

    #[test]
    fn test_ceil_to_quarter() {
        assert_eq!(ceil_to_quarter_hour(at(10, 0)), at(10, 0));
        assert_eq!(ceil_to_quarter_hour(at(10, 1)), at(10, 15));
        assert_eq!(ceil_to_quarter_hour(at(10, 52)), at(11, 0));
    }

    #[test]
    fn test_ceil_minutes() {
        assert_eq!(ceil_minutes_to_quarter(0.0), 0);
        assert_eq!(ceil_minutes_to_quarter(30.0), 30);
        assert_eq!(ceil_minutes_to_quarter(31.0), 45);
        assert_eq!(ceil_minutes_to_quarter(44.9), 45);
    }
}
