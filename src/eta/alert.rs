use std::sync::Arc;

use crate::{
    eta::{Eta, EtaPolicy},
    repository::Repository,
    shared::geo::{Coordinate, Distance},
};

/// Position of one bus relative to the device.
#[derive(Debug, Clone, PartialEq)]
pub struct Tracking {
    pub bus_id: Arc<str>,
    pub bus_name: Arc<str>,
    pub coordinate: Option<Coordinate>,
    pub distance: Option<Distance>,
    pub eta: Option<Eta>,
    /// Bus is inside the alert radius.
    pub alert: bool,
}

/// Fires the first time a bus comes inside the alert radius, then stays quiet.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProximityAlert {
    fired: bool,
}

impl ProximityAlert {
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns `true` only on the first observation inside the radius.
    pub fn observe(&mut self, within: bool) -> bool {
        if within && !self.fired {
            self.fired = true;
            true
        } else {
            false
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Follows a single bus across refreshes.
#[derive(Debug, Clone)]
pub struct Tracker {
    bus_id: Arc<str>,
    policy: EtaPolicy,
    alert: ProximityAlert,
}

impl Tracker {
    pub fn new(bus_id: &str) -> Self {
        Self {
            bus_id: bus_id.into(),
            policy: EtaPolicy::default(),
            alert: ProximityAlert::new(),
        }
    }

    pub fn with_policy(mut self, policy: EtaPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn bus_id(&self) -> &str {
        &self.bus_id
    }

    /// Recomputes against a fresh snapshot. `alert` is set on the refresh
    /// where the bus first comes close and cleared afterwards.
    /// `None` when the bus is no longer in the snapshot.
    pub fn update(
        &mut self,
        repository: &Repository,
        user: Option<&Coordinate>,
    ) -> Option<Tracking> {
        let mut tracking = repository.track(&self.bus_id, user, &self.policy)?;
        tracking.alert = self.alert.observe(tracking.alert);
        Some(tracking)
    }
}

#[test]
fn alert_fires_once_test() {
    let mut alert = ProximityAlert::new();
    assert!(!alert.observe(false));
    assert!(alert.observe(true));
    assert!(!alert.observe(true));
    assert!(!alert.observe(false));
    assert!(!alert.observe(true));
    assert!(alert.has_fired());
}
