/// Names of the collections the engine reads.
#[derive(Debug, Clone)]
pub struct Config {
    pub buses_collection: String,
    pub stops_collection: String,
    pub seats_collection: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buses_collection: "buses".into(),
            stops_collection: "busStops".into(),
            seats_collection: "buses_seat".into(),
        }
    }
}
