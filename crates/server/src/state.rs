use crate::feed::Feed;
use busline::prelude::*;

pub struct AppState {
    pub fleet: Feed<Repository>,
    pub seats: Feed<SeatCounts>,
    pub policy: EtaPolicy,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            fleet: Feed::new(Repository::new()),
            seats: Feed::new(SeatCounts::new()),
            policy: EtaPolicy::default(),
        }
    }

    /// A board over the latest snapshots, for one request.
    pub fn board(&self) -> Board {
        Board::new(self.fleet.latest(), self.seats.latest()).with_policy(self.policy)
    }
}
