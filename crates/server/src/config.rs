use std::{env, str::FromStr, time::Duration};
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FLEET_POLL_SECS: u64 = 60;
const DEFAULT_SEATS_POLL_SECS: u64 = 5;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing store location, pass a directory, a zip or a url")]
    MissingStore,
    #[error("Invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory, `.zip` export or `http(s)://` base url.
    pub store: String,
    pub port: u16,
    pub fleet_interval: Duration,
    pub seats_interval: Duration,
}

impl Config {
    /// Store location from the first argument or `BUSLINE_STORE`, the rest
    /// from `PORT`, `FLEET_POLL_SECS` and `SEATS_POLL_SECS`.
    pub fn from_env() -> Result<Self, self::Error> {
        let store = env::args()
            .nth(1)
            .or_else(|| env::var("BUSLINE_STORE").ok())
            .ok_or(self::Error::MissingStore)?;
        Ok(Self {
            store,
            port: var_or("PORT", DEFAULT_PORT)?,
            fleet_interval: interval_or("FLEET_POLL_SECS", DEFAULT_FLEET_POLL_SECS)?,
            seats_interval: interval_or("SEATS_POLL_SECS", DEFAULT_SEATS_POLL_SECS)?,
        })
    }
}

fn var_or<T: FromStr>(name: &'static str, default: T) -> Result<T, self::Error> {
    parse_or(name, env::var(name).ok(), default)
}

fn interval_or(name: &'static str, default: u64) -> Result<Duration, self::Error> {
    parse_interval(name, env::var(name).ok(), default)
}

fn parse_or<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, self::Error> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| self::Error::Invalid { name, value }),
        None => Ok(default),
    }
}

/// Whole seconds between refreshes. Zero is rejected, a refresh loop needs a
/// non-zero period.
fn parse_interval(
    name: &'static str,
    value: Option<String>,
    default: u64,
) -> Result<Duration, self::Error> {
    match parse_or(name, value.clone(), default)? {
        0 => Err(self::Error::Invalid {
            name,
            value: value.unwrap_or_default(),
        }),
        secs => Ok(Duration::from_secs(secs)),
    }
}
