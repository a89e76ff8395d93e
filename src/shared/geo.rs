use std::{cmp, fmt::Display};

use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS: Distance = Distance::from_kilometers(6371.0);

#[derive(Debug, Clone, Copy, Default)]
pub struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:.2} km", self.as_kilometers()))
    }
}

impl Serialize for Distance {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_kilometers())
    }
}

impl Distance {
    pub const fn from_meters(distance: f64) -> Self {
        Self(distance)
    }

    pub const fn from_kilometers(distance: f64) -> Self {
        Self(distance * 1000.0)
    }

    pub const fn as_meters(&self) -> f64 {
        self.0
    }

    pub const fn as_kilometers(&self) -> f64 {
        self.0 / 1000.0
    }
}

/// Average travel speed of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Speed(f64);

impl Speed {
    pub const fn from_kmh(speed: f64) -> Self {
        Self(speed)
    }

    pub const fn as_kmh(&self) -> f64 {
        self.0
    }

    /// A speed we can divide by: finite and strictly positive.
    pub fn is_usable(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        (value.latitude, value.longitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Coordinate {
    /// Written for buses that never reported a position.
    pub const SENTINEL: Coordinate = Coordinate {
        latitude: 0.0,
        longitude: 0.0,
    };

    pub fn is_known(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite() && *self != Self::SENTINEL
    }

    /// Returns `None` for the sentinel and for non-finite coordinates.
    pub fn known(self) -> Option<Self> {
        self.is_known().then_some(self)
    }

    /// Raw great-circle distance. Does not look at the sentinel, use
    /// [`Coordinate::distance`] for reported positions.
    pub fn haversine(&self, coord: &Self) -> Distance {
        let dist_lat = f64::to_radians(coord.latitude - self.latitude);
        let dist_lon = f64::to_radians(coord.longitude - self.longitude);
        let a = f64::powi(f64::sin(dist_lat / 2.0), 2)
            + f64::cos(f64::to_radians(self.latitude))
                * f64::cos(f64::to_radians(coord.latitude))
                * f64::sin(dist_lon / 2.0)
                * f64::sin(dist_lon / 2.0);
        let c = 2.0 * f64::atan2(f64::sqrt(a), f64::sqrt(1.0 - a));
        Distance::from_meters(EARTH_RADIUS.as_meters() * c)
    }

    /// Distance to another reported position, `None` if either side is unknown.
    pub fn distance(&self, coord: &Self) -> Option<Distance> {
        if self.is_known() && coord.is_known() {
            Some(self.haversine(coord))
        } else {
            None
        }
    }
}

/// Great-circle distance in kilometers between two optional positions.
pub fn distance_km(a: Option<&Coordinate>, b: Option<&Coordinate>) -> Option<f64> {
    let distance = a?.distance(b?)?;
    Some(distance.as_kilometers())
}

#[test]
fn distance_test() {
    let coord_a = Coordinate {
        latitude: 48.85800943005911,
        longitude: 2.3514350059357927,
    };

    let coord_b = Coordinate {
        latitude: 51.5052389927712,
        longitude: -0.12495407345099824,
    };
    let d = coord_a.distance(&coord_b).unwrap();
    assert!((d.as_kilometers() - 343.5).abs() < 1.0);
}

#[test]
fn distance_eq_test() {
    let dist_a = Distance::from_meters(1000.0);
    let dist_b = Distance::from_kilometers(1.0);
    assert_eq!(dist_a, dist_b)
}

#[test]
fn distance_cmp_test() {
    let dist_a = Distance::from_meters(1000.0);
    let dist_b = Distance::from_kilometers(0.5);
    assert!(dist_a > dist_b)
}

#[test]
fn distance_display_test() {
    assert_eq!(Distance::from_meters(1234.5).to_string(), "1.23 km");
}

#[test]
fn sentinel_is_unknown_test() {
    assert!(!Coordinate::SENTINEL.is_known());
    assert!(!Coordinate::from((f64::NAN, 10.0)).is_known());
    assert!(Coordinate::from((0.0, 10.0)).is_known());
}
