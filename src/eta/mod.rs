pub mod alert;
pub mod ranking;

pub use alert::*;
pub use ranking::*;

use serde::Serialize;

use crate::shared::{
    geo::{Distance, Speed},
    time::Minutes,
};

/// Estimated arrival of a bus at the device position.
/// `Arrived` orders before any number of minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "status", content = "minutes", rename_all = "snake_case")]
pub enum Eta {
    Arrived,
    Minutes(Minutes),
}

impl Eta {
    pub fn minutes(&self) -> Option<Minutes> {
        match self {
            Eta::Arrived => None,
            Eta::Minutes(minutes) => Some(*minutes),
        }
    }

    pub fn is_arrived(&self) -> bool {
        matches!(self, Eta::Arrived)
    }
}

/// Distance bands used to turn a straight-line distance into an ETA.
///
/// Below `arrived_within` the bus has arrived. Up to `short_range_within`
/// the linear estimate is too noisy and `short_range_eta` is reported instead.
/// Further out the distance is divided by the bus speed, falling back to
/// `default_speed` when the bus reports none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EtaPolicy {
    pub arrived_within: Distance,
    pub short_range_within: Distance,
    pub short_range_eta: Minutes,
    pub default_speed: Speed,
    /// Radius that triggers the one-shot proximity alert while tracking a bus.
    pub alert_within: Distance,
}

impl Default for EtaPolicy {
    fn default() -> Self {
        Self {
            arrived_within: Distance::from_meters(100.0),
            short_range_within: Distance::from_kilometers(1.0),
            short_range_eta: Minutes::new(2),
            default_speed: Speed::from_kmh(50.0),
            alert_within: Distance::from_meters(200.0),
        }
    }
}

impl EtaPolicy {
    pub fn estimate(&self, distance: Option<Distance>, speed: Option<Speed>) -> Option<Eta> {
        let distance = distance?;
        if !distance.as_meters().is_finite() || distance.as_meters() < 0.0 {
            return None;
        }
        if distance <= self.arrived_within {
            return Some(Eta::Arrived);
        }
        if distance <= self.short_range_within {
            return Some(Eta::Minutes(self.short_range_eta));
        }
        let speed = speed
            .filter(Speed::is_usable)
            .unwrap_or(self.default_speed);
        Minutes::from_travel(distance, speed).map(Eta::Minutes)
    }

    pub fn within_alert(&self, distance: Option<Distance>) -> bool {
        distance.is_some_and(|distance| distance <= self.alert_within)
    }
}

/// Estimate with the default bands. A non-positive speed falls back to the
/// default speed.
pub fn estimate_eta(distance_km: Option<f64>, avg_speed_kmh: f64) -> Option<Eta> {
    EtaPolicy::default().estimate(
        distance_km.map(Distance::from_kilometers),
        Some(Speed::from_kmh(avg_speed_kmh)),
    )
}
