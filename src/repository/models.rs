use std::{collections::HashMap, sync::Arc};

use serde::Serialize;

use crate::{
    shared::{
        DeclaredRoute, Routed,
        geo::{Coordinate, Distance, Speed},
    },
    store::{self, BusDocument, SeatDocument, StopDocument},
};

/// Seats on a bus that does not declare its own capacity.
pub const DEFAULT_CAPACITY: u32 = 50;

/// Running state set from the staff app.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BusStatus {
    #[default]
    Running,
    NotRunning,
}

impl BusStatus {
    /// Accepts the spellings written by the staff app and the admin console.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "running" => Some(Self::Running),
            "not running" | "not_running" | "notrunning" | "breakdown" => Some(Self::NotRunning),
            _ => None,
        }
    }
}

/// A bus and its last reported state.
#[derive(Debug, Default, Clone)]
pub struct Bus {
    /// Position in [`crate::repository::Repository::buses`].
    pub index: u32,
    /// Document id in the store.
    pub id: Arc<str>,
    pub name: Arc<str>,
    /// Fleet number the staff app signs in with.
    pub number: Option<Arc<str>>,
    /// Free-text route label, e.g. "12A".
    pub route: Option<Arc<str>>,
    pub starting_point: Option<Arc<str>>,
    pub ending_point: Option<Arc<str>>,
    pub departure_time: Option<Arc<str>>,
    /// Cities the bus passes through, matched against the device locality.
    pub declared_route: DeclaredRoute,
    /// `None` until the bus reports a real position.
    pub coordinate: Option<Coordinate>,
    pub status: BusStatus,
    /// Crowding label set by staff, e.g. "Standing room".
    pub occupancy: Option<Arc<str>>,
    pub speed: Option<Speed>,
    pub capacity: Option<u32>,
}

impl Routed for Bus {
    fn declared_route(&self) -> &DeclaredRoute {
        &self.declared_route
    }
}

impl TryFrom<BusDocument> for Bus {
    type Error = store::Error;

    fn try_from(value: BusDocument) -> Result<Self, Self::Error> {
        let id = value.id.trim();
        if id.is_empty() {
            return Err(store::Error::MalformedDocument {
                collection: "buses".into(),
                id: String::new(),
                reason: "missing id".into(),
            });
        }
        let coordinate = value
            .current_location
            .and_then(|location| location.coordinate())
            .and_then(Coordinate::known);
        let name = value
            .bus_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| value.bus_number.clone())
            .unwrap_or_else(|| id.to_string());
        let status = value
            .bus_status
            .as_deref()
            .or(value.status.as_deref())
            .and_then(BusStatus::parse)
            .unwrap_or_default();

        Ok(Self {
            index: 0,
            id: id.into(),
            name: name.into(),
            number: non_empty(value.bus_number),
            route: non_empty(value.route),
            starting_point: non_empty(value.starting_point),
            ending_point: non_empty(value.ending_point),
            departure_time: non_empty(value.departure_time),
            declared_route: value.major_cities,
            coordinate,
            status,
            occupancy: non_empty(value.occupancy),
            speed: value
                .speed
                .and_then(|speed| speed.as_f64())
                .map(Speed::from_kmh)
                .filter(Speed::is_usable),
            capacity: value
                .capacity
                .and_then(|capacity| capacity.as_f64())
                .filter(|capacity| capacity.is_finite() && *capacity >= 0.0)
                .map(|capacity| capacity as u32),
        })
    }
}

/// A bus stop placed from the admin console.
#[derive(Debug, Default, Clone)]
pub struct Stop {
    pub index: u32,
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub city: Option<Arc<str>>,
    pub district: Option<Arc<str>>,
    /// `None` when the stored latitude/longitude could not be read.
    pub coordinate: Option<Coordinate>,
}

impl TryFrom<StopDocument> for Stop {
    type Error = store::Error;

    fn try_from(value: StopDocument) -> Result<Self, Self::Error> {
        let id = value.id.trim();
        if id.is_empty() {
            return Err(store::Error::MalformedDocument {
                collection: "busStops".into(),
                id: String::new(),
                reason: "missing id".into(),
            });
        }
        let coordinate = match (
            value.latitude.and_then(|lat| lat.as_f64()),
            value.longitude.and_then(|lon| lon.as_f64()),
        ) {
            (Some(latitude), Some(longitude)) => Coordinate {
                latitude,
                longitude,
            }
            .known(),
            _ => None,
        };
        let name = value
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| id.to_string());
        Ok(Self {
            index: 0,
            id: id.into(),
            name: name.into(),
            city: non_empty(value.city),
            district: non_empty(value.district),
            coordinate,
        })
    }
}

/// A stop together with its distance from the device.
#[derive(Debug, Clone, Copy)]
pub struct NearbyStop<'a> {
    pub stop: &'a Stop,
    pub distance: Option<Distance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "seats", rename_all = "snake_case")]
pub enum SeatAvailability {
    Unknown,
    Available(u32),
}

/// Occupant counts per bus id, as published by the seat counter feed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SeatCounts {
    counts: HashMap<Arc<str>, u32>,
}

impl FromIterator<(Arc<str>, u32)> for SeatCounts {
    fn from_iter<I: IntoIterator<Item = (Arc<str>, u32)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<SeatDocument> for (Arc<str>, u32) {
    type Error = store::Error;

    fn try_from(value: SeatDocument) -> Result<Self, Self::Error> {
        let malformed = |reason: &str| store::Error::MalformedDocument {
            collection: "buses_seat".into(),
            id: value.id.clone(),
            reason: reason.into(),
        };
        if value.id.trim().is_empty() {
            return Err(malformed("missing id"));
        }
        let count = value
            .count
            .as_ref()
            .and_then(|count| count.as_f64())
            .ok_or_else(|| malformed("missing count"))?;
        if !count.is_finite() || count < 0.0 {
            return Err(malformed("count is not a positive number"));
        }
        Ok((value.id.trim().into(), count as u32))
    }
}

impl SeatCounts {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn insert(&mut self, bus_id: &str, count: u32) {
        self.counts.insert(bus_id.into(), count);
    }

    pub fn count_by_bus_id(&self, bus_id: &str) -> Option<u32> {
        self.counts.get(bus_id).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Free seats on the bus. Capacity falls back to [`DEFAULT_CAPACITY`].
    pub fn availability(&self, bus: &Bus) -> SeatAvailability {
        match self.count_by_bus_id(&bus.id) {
            Some(count) => {
                let capacity = bus.capacity.unwrap_or(DEFAULT_CAPACITY);
                SeatAvailability::Available(capacity.saturating_sub(count))
            }
            None => SeatAvailability::Unknown,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<Arc<str>> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(Into::into)
}
