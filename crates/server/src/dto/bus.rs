use busline::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BusDto {
    pub id: String,
    pub name: String,
    pub number: Option<String>,
    pub route: Option<String>,
    pub starting_point: Option<String>,
    pub ending_point: Option<String>,
    pub departure_time: Option<String>,
    pub status: BusStatus,
    pub occupancy: Option<String>,
    pub coordinate: Option<Coordinate>,
    pub distance_km: Option<f64>,
    pub eta: Option<Eta>,
    pub eta_label: String,
    pub seats: SeatAvailability,
}

impl BusDto {
    pub fn from(ranked: &RankedBus) -> Self {
        let bus = ranked.bus;
        Self {
            id: bus.id.to_string(),
            name: bus.name.to_string(),
            number: bus.number.as_deref().map(str::to_string),
            route: bus.route.as_deref().map(str::to_string),
            starting_point: bus.starting_point.as_deref().map(str::to_string),
            ending_point: bus.ending_point.as_deref().map(str::to_string),
            departure_time: bus.departure_time.as_deref().map(str::to_string),
            status: bus.status,
            occupancy: bus.occupancy.as_deref().map(str::to_string),
            coordinate: bus.coordinate,
            distance_km: ranked.distance.map(|d| d.as_kilometers()),
            eta: ranked.eta,
            eta_label: ranked.label().to_string(),
            seats: ranked.seats,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeparturesDto {
    /// Set when no device position was available.
    pub degraded: bool,
    pub location_error: Option<String>,
    pub buses: Vec<BusDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackingDto {
    pub id: String,
    pub name: String,
    pub coordinate: Option<Coordinate>,
    pub distance_km: Option<f64>,
    pub distance_label: Option<String>,
    pub eta: Option<Eta>,
    pub eta_label: String,
    /// Bus is inside the alert radius on this request. Requests are
    /// stateless, firing the alert once per trip is left to the client.
    pub within_alert_radius: bool,
}

impl TrackingDto {
    pub fn from(tracking: &Tracking) -> Self {
        Self {
            id: tracking.bus_id.to_string(),
            name: tracking.bus_name.to_string(),
            coordinate: tracking.coordinate,
            distance_km: tracking.distance.map(|d| d.as_kilometers()),
            distance_label: tracking.distance.map(|d| d.to_string()),
            eta: tracking.eta,
            eta_label: EtaLabel(tracking.eta).to_string(),
            within_alert_radius: tracking.alert,
        }
    }
}

#[test]
fn tracking_reports_alert_radius_test() {
    let tracking = Tracking {
        bus_id: "bus-1".into(),
        bus_name: "Express".into(),
        coordinate: Some(Coordinate::from((40.0, -74.0))),
        distance: Some(Distance::from_meters(150.0)),
        eta: Some(Eta::Minutes(2.into())),
        alert: true,
    };
    let value = serde_json::to_value(TrackingDto::from(&tracking)).unwrap();
    assert_eq!(value["within_alert_radius"], serde_json::Value::Bool(true));
    assert_eq!(value["distance_label"], "0.15 km");
    assert_eq!(value["eta_label"], "ETA: 2 mins");
    assert!(value.get("alert").is_none());
}
