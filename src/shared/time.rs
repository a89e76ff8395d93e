use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::shared::geo::{Distance, Speed};

/// Whole minutes, the unit every ETA is shown in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Minutes(u32);

impl From<u32> for Minutes {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Display for Minutes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{} mins", self.0))
    }
}

impl Minutes {
    pub const fn new(minutes: u32) -> Self {
        Self(minutes)
    }

    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Straight-line travel time, rounded to the nearest minute.
    /// Returns `None` if the speed is zero, negative or not finite.
    pub fn from_travel(distance: Distance, speed: Speed) -> Option<Self> {
        if !speed.is_usable() {
            return None;
        }
        let minutes = (distance.as_kilometers() / speed.as_kmh() * 60.0).round();
        if minutes.is_finite() && minutes >= 0.0 {
            Some(Self(minutes.min(u32::MAX as f64) as u32))
        } else {
            None
        }
    }
}

/// Point in time a snapshot was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Timestamp(DateTime<Utc>);

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn seconds_since(&self, now: Timestamp) -> i64 {
        (now.0 - self.0).num_seconds()
    }

    pub fn elapsed_seconds(&self) -> i64 {
        self.seconds_since(Self::now())
    }
}

#[test]
fn travel_minutes_test() {
    let minutes = Minutes::from_travel(Distance::from_kilometers(5.0), Speed::from_kmh(50.0));
    assert_eq!(minutes, Some(Minutes::new(6)));
}

#[test]
fn travel_minutes_zero_speed_test() {
    let minutes = Minutes::from_travel(Distance::from_kilometers(5.0), Speed::from_kmh(0.0));
    assert_eq!(minutes, None);
}

#[test]
fn minutes_display_test() {
    assert_eq!(Minutes::new(12).to_string(), "12 mins");
}
