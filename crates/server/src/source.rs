use busline::{
    prelude::*,
    store::{self, Document},
};
use reqwest::header::ACCEPT_ENCODING;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Store error: {0}")]
    Store(#[from] store::Error),
    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Fetch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Where the fleet documents come from.
#[derive(Clone)]
pub enum Source {
    /// Exported collections on disk, read on the blocking pool.
    Files(Arc<FileStore>),
    /// A REST gateway answering `GET {base_url}/{collection}` with a JSON array.
    Remote {
        client: reqwest::Client,
        base_url: Arc<str>,
    },
}

impl Source {
    pub fn open(location: &str) -> Result<Self, store::Error> {
        if location.starts_with("http://") || location.starts_with("https://") {
            Ok(Self::Remote {
                client: reqwest::Client::new(),
                base_url: location.trim_end_matches('/').into(),
            })
        } else {
            let path = std::path::Path::new(location).canonicalize()?;
            Ok(Self::Files(Arc::new(FileStore::open(path)?)))
        }
    }

    pub async fn repository(&self, config: Arc<store::Config>) -> Result<Repository, FetchError> {
        match self {
            Source::Files(store) => {
                let store = store.clone();
                let task = tokio::task::spawn_blocking(move || {
                    Repository::new().with_store(store.as_ref(), &config)
                });
                Ok(task.await??)
            }
            Source::Remote { client, base_url } => {
                let (buses, stops) = futures_util::try_join!(
                    fetch_collection(client, base_url, &config.buses_collection),
                    fetch_collection(client, base_url, &config.stops_collection),
                )?;
                let store = MemoryStore::new()
                    .with_collection(&config.buses_collection, buses)
                    .with_collection(&config.stops_collection, stops);
                Ok(Repository::new().with_store(&store, &config)?)
            }
        }
    }

    pub async fn seat_counts(&self, config: Arc<store::Config>) -> Result<SeatCounts, FetchError> {
        match self {
            Source::Files(store) => {
                let store = store.clone();
                let task = tokio::task::spawn_blocking(move || {
                    seat_counts_from_store(store.as_ref(), &config)
                });
                Ok(task.await??)
            }
            Source::Remote { client, base_url } => {
                let seats = fetch_collection(client, base_url, &config.seats_collection).await?;
                let store = MemoryStore::new().with_collection(&config.seats_collection, seats);
                Ok(seat_counts_from_store(&store, &config)?)
            }
        }
    }
}

async fn fetch_collection(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
) -> Result<Vec<Document>, FetchError> {
    let docs = client
        .get(format!("{base_url}/{name}"))
        .header(ACCEPT_ENCODING, "gzip, deflate")
        .send()
        .await?
        .error_for_status()?
        .json::<Vec<Document>>()
        .await?;
    Ok(docs)
}
