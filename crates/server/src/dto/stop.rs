use busline::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StopDto {
    pub id: String,
    pub name: String,
    pub city: Option<String>,
    pub district: Option<String>,
    pub coordinate: Option<Coordinate>,
    pub distance_km: Option<f64>,
    pub distance_label: Option<String>,
}

impl StopDto {
    pub fn from(nearby: &NearbyStop) -> Self {
        let stop = nearby.stop;
        Self {
            id: stop.id.to_string(),
            name: stop.name.to_string(),
            city: stop.city.as_deref().map(str::to_string),
            district: stop.district.as_deref().map(str::to_string),
            coordinate: stop.coordinate,
            distance_km: nearby.distance.map(|d| d.as_kilometers()),
            distance_label: nearby.distance.map(|d| d.to_string()),
        }
    }
}
