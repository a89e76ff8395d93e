use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    device::{self, LocationProvider},
    eta::{EtaPolicy, RankedBus, Tracking},
    repository::{NearbyStop, Repository, SeatCounts},
    shared::{LocalityDescriptor, geo::Coordinate},
};

/// Everything one passenger view shows, derived from the latest snapshots and
/// the latest device position.
///
/// Snapshots are swapped whole, so a view never sees half of a refresh. The
/// device position is kept across failed reads, except when permission is
/// denied, which clears it and puts the board in a degraded state.
#[derive(Debug, Clone)]
pub struct Board {
    repository: Arc<Repository>,
    seats: Arc<SeatCounts>,
    policy: EtaPolicy,
    user: Option<Coordinate>,
    locality: Option<LocalityDescriptor>,
    location_error: Option<device::Error>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Arc::default(), Arc::default())
    }
}

impl Board {
    pub fn new(repository: Arc<Repository>, seats: Arc<SeatCounts>) -> Self {
        Self {
            repository,
            seats,
            policy: EtaPolicy::default(),
            user: None,
            locality: None,
            location_error: None,
        }
    }

    pub fn with_policy(mut self, policy: EtaPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_repository(&mut self, repository: Arc<Repository>) {
        self.repository = repository;
    }

    pub fn set_seats(&mut self, seats: Arc<SeatCounts>) {
        self.seats = seats;
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn user(&self) -> Option<&Coordinate> {
        self.user.as_ref()
    }

    pub fn locality(&self) -> Option<&LocalityDescriptor> {
        self.locality.as_ref()
    }

    pub fn location_error(&self) -> Option<&device::Error> {
        self.location_error.as_ref()
    }

    /// No position to measure from, results carry no distances.
    pub fn is_degraded(&self) -> bool {
        self.user.is_none()
    }

    /// Reads the device position and its address.
    pub fn locate<P>(&mut self, provider: &P)
    where
        P: LocationProvider + ?Sized,
    {
        match provider.current() {
            Ok(coordinate) => {
                self.user = Some(coordinate);
                self.location_error = None;
                match provider.reverse_geocode(&coordinate) {
                    Ok(locality) if !locality.is_empty() => self.locality = Some(locality),
                    Ok(_) => debug!("Empty address for {coordinate}"),
                    Err(err) => warn!("Reverse geocoding failed: {err}"),
                }
            }
            Err(device::Error::PermissionDenied) => {
                warn!("Location permission denied");
                self.user = None;
                self.locality = None;
                self.location_error = Some(device::Error::PermissionDenied);
            }
            Err(err) => {
                warn!("Keeping last known position: {err}");
                self.location_error = Some(err);
            }
        }
    }

    /// Buses serving the current locality, earliest arrival first.
    pub fn departures(&self) -> Vec<RankedBus<'_>> {
        self.repository.departures(
            self.user.as_ref(),
            self.locality.as_ref(),
            &self.policy,
            &self.seats,
        )
    }

    pub fn nearby_stops(&self) -> Vec<NearbyStop<'_>> {
        self.repository.stops_by_distance(self.user.as_ref())
    }

    pub fn track(&self, bus_id: &str) -> Option<Tracking> {
        self.repository.track(bus_id, self.user.as_ref(), &self.policy)
    }
}
