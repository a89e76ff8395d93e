use serde::{Deserialize, Serialize};

use crate::shared::{DeclaredRoute, geo::Coordinate};

/// A number that may have been stored as text, as the admin console does for
/// stop coordinates.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum LenientNumber {
    Number(f64),
    Text(String),
}

impl LenientNumber {
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            LenientNumber::Number(value) => *value,
            LenientNumber::Text(text) => text.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LocationDocument {
    pub latitude: Option<LenientNumber>,
    pub longitude: Option<LenientNumber>,
}

impl LocationDocument {
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate {
            latitude: self.latitude.as_ref()?.as_f64()?,
            longitude: self.longitude.as_ref()?.as_f64()?,
        })
    }
}

/// Document of the `buses` collection.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct BusDocument {
    pub id: String,
    pub bus_name: Option<String>,
    pub bus_number: Option<String>,
    pub staff_name: Option<String>,
    pub departure_time: Option<String>,
    pub route: Option<String>,
    pub starting_point: Option<String>,
    pub ending_point: Option<String>,
    #[serde(default)]
    pub major_cities: DeclaredRoute,
    pub current_location: Option<LocationDocument>,
    pub bus_status: Option<String>,
    pub status: Option<String>,
    pub occupancy: Option<String>,
    pub speed: Option<LenientNumber>,
    pub capacity: Option<LenientNumber>,
}

/// Document of the `busStops` collection.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct StopDocument {
    pub id: String,
    pub name: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub latitude: Option<LenientNumber>,
    pub longitude: Option<LenientNumber>,
}

/// Document of the `buses_seat` collection, keyed by bus id.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SeatDocument {
    pub id: String,
    pub count: Option<LenientNumber>,
}
