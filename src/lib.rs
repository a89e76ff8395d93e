//! Proximity and ETA engine for live bus tracking.
//!
//! Buses report their position to a document store. Every refresh the
//! [`repository::Repository`] is rebuilt from the store, and a passenger view
//! ([`board::Board`]) ranks the buses serving the device locality by arrival
//! time and sorts the stops by distance.

pub mod board;
pub mod device;
pub mod eta;
pub mod repository;
pub mod shared;
pub mod store;

pub mod prelude {
    pub use crate::board::Board;
    pub use crate::device::{FixedLocation, LocationProvider};
    pub use crate::eta::{
        Eta, EtaLabel, EtaPolicy, RankedBus, Tracker, Tracking, estimate_eta, rank_by_eta,
    };
    pub use crate::repository::{
        Bus, BusStatus, NearbyStop, Repository, SeatAvailability, SeatCounts, Stop,
        seat_counts_from_store,
    };
    pub use crate::shared::{
        LocalityDescriptor, distance_km, filter_by_locality,
        geo::{Coordinate, Distance, Speed},
        time::{Minutes, Timestamp},
    };
    pub use crate::store::{DocumentStore, FileStore, MemoryStore};
}
