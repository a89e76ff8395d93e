use std::{cmp::Ordering, fmt::Display};

use rayon::prelude::*;

use crate::{
    eta::{Eta, EtaPolicy},
    repository::{Bus, SeatAvailability, SeatCounts},
    shared::geo::{Coordinate, Distance},
};

/// Anything that can be ordered by arrival time.
pub trait Ranked {
    fn eta(&self) -> Option<Eta>;
}

impl Ranked for Option<Eta> {
    fn eta(&self) -> Option<Eta> {
        *self
    }
}

/// A bus with its distance and arrival estimate for the current refresh.
#[derive(Debug, Clone, Copy)]
pub struct RankedBus<'a> {
    pub bus: &'a Bus,
    pub distance: Option<Distance>,
    pub eta: Option<Eta>,
    pub seats: SeatAvailability,
}

impl Ranked for RankedBus<'_> {
    fn eta(&self) -> Option<Eta> {
        self.eta
    }
}

impl RankedBus<'_> {
    pub fn label(&self) -> EtaLabel {
        EtaLabel(self.eta)
    }
}

/// The ETA line shown under a bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EtaLabel(pub Option<Eta>);

impl Display for EtaLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(Eta::Arrived) => f.write_str("Bus Arrived"),
            Some(Eta::Minutes(minutes)) => f.write_fmt(format_args!("ETA: {minutes}")),
            None => f.write_str("ETA: Not available"),
        }
    }
}

/// Earliest arrival first. Entities without an ETA go last, and equal keys
/// keep their input order.
pub fn rank_by_eta<T>(mut entities: Vec<T>) -> Vec<T>
where
    T: Ranked + Send,
{
    entities.par_sort_by(|a, b| compare_eta(a.eta(), b.eta()));
    entities
}

fn compare_eta(a: Option<Eta>, b: Option<Eta>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Computes distance, ETA and free seats for every bus, then ranks them.
/// Without a device position every ETA is absent and the input order is kept.
pub fn rank_buses<'a>(
    buses: &[&'a Bus],
    user: Option<&Coordinate>,
    policy: &EtaPolicy,
    seats: &SeatCounts,
) -> Vec<RankedBus<'a>> {
    let ranked: Vec<RankedBus<'a>> = buses
        .par_iter()
        .map(|&bus| {
            let distance = user
                .zip(bus.coordinate.as_ref())
                .and_then(|(a, b)| a.distance(b));
            RankedBus {
                bus,
                distance,
                eta: policy.estimate(distance, bus.speed),
                seats: seats.availability(bus),
            }
        })
        .collect();
    rank_by_eta(ranked)
}

#[test]
fn absent_eta_sorts_last_test() {
    let ranked = rank_by_eta(vec![
        None,
        Some(Eta::Minutes(9.into())),
        Some(Eta::Arrived),
    ]);
    assert_eq!(
        ranked,
        vec![Some(Eta::Arrived), Some(Eta::Minutes(9.into())), None]
    );
}

#[test]
fn label_test() {
    assert_eq!(EtaLabel(Some(Eta::Arrived)).to_string(), "Bus Arrived");
    assert_eq!(
        EtaLabel(Some(Eta::Minutes(6.into()))).to_string(),
        "ETA: 6 mins"
    );
    assert_eq!(EtaLabel(None).to_string(), "ETA: Not available");
}
