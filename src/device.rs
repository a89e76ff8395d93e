use thiserror::Error;

use crate::shared::{LocalityDescriptor, geo::Coordinate};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

/// Source of the device position and its address.
pub trait LocationProvider {
    fn current(&self) -> Result<Coordinate, self::Error>;
    fn reverse_geocode(&self, coordinate: &Coordinate) -> Result<LocalityDescriptor, self::Error>;
}

/// A position known up front, such as one sent along with a request.
#[derive(Debug, Clone)]
pub struct FixedLocation {
    coordinate: Result<Coordinate, self::Error>,
    locality: Option<LocalityDescriptor>,
}

impl FixedLocation {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate: Ok(coordinate),
            locality: None,
        }
    }

    pub fn denied() -> Self {
        Self {
            coordinate: Err(self::Error::PermissionDenied),
            locality: None,
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            coordinate: Err(self::Error::Unavailable(reason.to_string())),
            locality: None,
        }
    }

    pub fn with_locality(mut self, locality: LocalityDescriptor) -> Self {
        self.locality = Some(locality);
        self
    }
}

impl LocationProvider for FixedLocation {
    fn current(&self) -> Result<Coordinate, self::Error> {
        let coordinate = self.coordinate.clone()?;
        coordinate
            .known()
            .ok_or_else(|| self::Error::Unavailable("no position fix".into()))
    }

    fn reverse_geocode(&self, _: &Coordinate) -> Result<LocalityDescriptor, self::Error> {
        self.locality
            .clone()
            .ok_or_else(|| self::Error::Unavailable("no address for position".into()))
    }
}
