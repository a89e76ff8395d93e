use std::{cmp::Ordering, collections::HashMap, sync::Arc};

mod models;
pub use models::*;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    eta::{EtaPolicy, RankedBus, Tracking, rank_buses},
    shared::{self, LocalityDescriptor, geo::Coordinate, time::Timestamp},
    store::{self, BusDocument, DocumentStore, SeatDocument, StopDocument},
};

type IdToIndex = HashMap<Arc<str>, usize>;

/// One refresh worth of buses and stops. Built once, then only read.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    pub buses: Box<[Bus]>,
    pub stops: Box<[Stop]>,

    bus_lookup: Arc<IdToIndex>,
    bus_number_lookup: Arc<IdToIndex>,
    stop_lookup: Arc<IdToIndex>,
    fetched_at: Option<Timestamp>,
}

impl Repository {
    pub fn new() -> Self {
        Default::default()
    }

    /// Reads buses and stops from the store.
    /// Documents that can not be decoded are logged and left out.
    pub fn with_store<S>(self, store: &S, config: &store::Config) -> Result<Self, store::Error>
    where
        S: DocumentStore + ?Sized,
    {
        let buses = load::<BusDocument, Bus, S>(store, &config.buses_collection)?;
        let stops = load::<StopDocument, Stop, S>(store, &config.stops_collection)?;
        debug!("Loaded {} buses and {} stops", buses.len(), stops.len());
        Ok(self
            .with_buses(buses)
            .with_stops(stops)
            .fetched_at(Timestamp::now()))
    }

    pub fn with_buses(mut self, buses: Vec<Bus>) -> Self {
        let mut bus_lookup: IdToIndex = HashMap::new();
        let mut bus_number_lookup: IdToIndex = HashMap::new();
        let mut values: Vec<Bus> = Vec::with_capacity(buses.len());
        for mut bus in buses {
            if bus_lookup.contains_key(&bus.id) {
                warn!("Skipping duplicate bus {}", bus.id);
                continue;
            }
            let i = values.len();
            bus.index = i as u32;
            bus_lookup.insert(bus.id.clone(), i);
            if let Some(number) = &bus.number {
                bus_number_lookup.entry(number.clone()).or_insert(i);
            }
            values.push(bus);
        }
        self.buses = values.into();
        self.bus_lookup = bus_lookup.into();
        self.bus_number_lookup = bus_number_lookup.into();
        self
    }

    pub fn with_stops(mut self, stops: Vec<Stop>) -> Self {
        let mut stop_lookup: IdToIndex = HashMap::new();
        let mut values: Vec<Stop> = Vec::with_capacity(stops.len());
        for mut stop in stops {
            if stop_lookup.contains_key(&stop.id) {
                warn!("Skipping duplicate stop {}", stop.id);
                continue;
            }
            let i = values.len();
            stop.index = i as u32;
            stop_lookup.insert(stop.id.clone(), i);
            values.push(stop);
        }
        self.stops = values.into();
        self.stop_lookup = stop_lookup.into();
        self
    }

    pub fn fetched_at(mut self, timestamp: Timestamp) -> Self {
        self.fetched_at = Some(timestamp);
        self
    }

    /// When the data was read from the store, `None` for a repository built by hand.
    pub fn timestamp(&self) -> Option<Timestamp> {
        self.fetched_at
    }

    /// Get a bus with the given document id.
    pub fn bus_by_id(&self, id: &str) -> Option<&Bus> {
        let index = self.bus_lookup.get(id)?;
        Some(&self.buses[*index])
    }

    /// Get the bus registered under a fleet number.
    /// If several buses share the number the first one loaded is returned.
    pub fn bus_by_number(&self, number: &str) -> Option<&Bus> {
        let index = self.bus_number_lookup.get(number.trim())?;
        Some(&self.buses[*index])
    }

    pub fn stop_by_id(&self, id: &str) -> Option<&Stop> {
        let index = self.stop_lookup.get(id)?;
        Some(&self.stops[*index])
    }

    /// Buses whose declared route passes through the locality.
    pub fn buses_by_locality(&self, locality: &LocalityDescriptor) -> Vec<&Bus> {
        shared::filter_by_locality(&self.buses, locality)
    }

    /// Buses ordered by arrival at `user`. With a locality only the buses
    /// serving it are kept, without one every bus is ranked.
    pub fn departures(
        &self,
        user: Option<&Coordinate>,
        locality: Option<&LocalityDescriptor>,
        policy: &EtaPolicy,
        seats: &SeatCounts,
    ) -> Vec<RankedBus<'_>> {
        let buses = match locality {
            Some(locality) => self.buses_by_locality(locality),
            None => self.buses.iter().collect(),
        };
        rank_buses(&buses, user, policy, seats)
    }

    /// Every stop by distance from `user`, closest first.
    /// Stops without a usable position come last in their stored order.
    pub fn stops_by_distance(&self, user: Option<&Coordinate>) -> Vec<NearbyStop<'_>> {
        let mut stops: Vec<NearbyStop> = self
            .stops
            .par_iter()
            .map(|stop| NearbyStop {
                stop,
                distance: user
                    .zip(stop.coordinate.as_ref())
                    .and_then(|(a, b)| a.distance(b)),
            })
            .collect();
        stops.par_sort_by(|a, b| match (a.distance, b.distance) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        stops
    }

    /// Distance and ETA of a single bus.
    pub fn track(
        &self,
        bus_id: &str,
        user: Option<&Coordinate>,
        policy: &EtaPolicy,
    ) -> Option<Tracking> {
        let bus = self.bus_by_id(bus_id)?;
        let distance = user
            .zip(bus.coordinate.as_ref())
            .and_then(|(a, b)| a.distance(b));
        Some(Tracking {
            bus_id: bus.id.clone(),
            bus_name: bus.name.clone(),
            coordinate: bus.coordinate,
            distance,
            eta: policy.estimate(distance, bus.speed),
            alert: policy.within_alert(distance),
        })
    }
}

/// Reads the `buses_seat` collection.
/// Documents that can not be decoded are logged and left out.
pub fn seat_counts_from_store<S>(
    store: &S,
    config: &store::Config,
) -> Result<SeatCounts, store::Error>
where
    S: DocumentStore + ?Sized,
{
    let entries: Vec<(Arc<str>, u32)> =
        load::<SeatDocument, (Arc<str>, u32), S>(store, &config.seats_collection)?;
    Ok(entries.into_iter().collect())
}

fn load<D, T, S>(store: &S, collection: &str) -> Result<Vec<T>, store::Error>
where
    D: serde::de::DeserializeOwned,
    T: TryFrom<D, Error = store::Error>,
    S: DocumentStore + ?Sized,
{
    let docs = store.collection(collection)?;
    Ok(docs
        .into_iter()
        .filter_map(|doc| {
            match store::decode::<D>(collection, doc).and_then(T::try_from) {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!("Skipping document: {err}");
                    None
                }
            }
        })
        .collect())
}
