mod age;
mod buses;
mod stops;

pub use age::*;
pub use buses::*;
pub use stops::*;

use axum::http::StatusCode;
use busline::prelude::*;
use std::collections::HashMap;

/// Builds the device location sent with a request.
///
/// `lat` and `lon` carry the position, `address` the reverse geocoded
/// components separated by `|`, and `denied=true` reports that the user
/// refused location access. A request without a position is served degraded.
fn location_from_params(params: &HashMap<String, String>) -> Result<FixedLocation, StatusCode> {
    if params.get("denied").is_some_and(|value| value == "true") {
        return Ok(FixedLocation::denied());
    }
    let (latitude, longitude) = match (params.get("lat"), params.get("lon")) {
        (Some(lat), Some(lon)) => (parse_degrees(lat)?, parse_degrees(lon)?),
        (None, None) => return Ok(FixedLocation::unavailable("no position in request")),
        _ => return Err(StatusCode::BAD_REQUEST),
    };
    let location = FixedLocation::new(Coordinate {
        latitude,
        longitude,
    });
    Ok(match params.get("address") {
        Some(address) => location.with_locality(address.split('|').collect()),
        None => location,
    })
}

fn parse_degrees(value: &str) -> Result<f64, StatusCode> {
    let value: f64 = value.trim().parse().map_err(|_| StatusCode::BAD_REQUEST)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatusCode::BAD_REQUEST)
    }
}
