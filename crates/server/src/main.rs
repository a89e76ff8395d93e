mod api;
mod config;
mod dto;
mod feed;
mod poller;
mod source;
mod state;

use crate::{config::Config, poller::PeriodicTask, source::Source, state::AppState};
use axum::routing::get;
use busline::store;
use std::{sync::Arc, time::Instant};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };
    let source = match Source::open(&config.store) {
        Ok(source) => source,
        Err(err) => {
            error!("Could not open store {}: {err}", config.store);
            std::process::exit(1);
        }
    };
    let collections = Arc::new(store::Config::default());
    let state = Arc::new(AppState::new());

    info!("Loading data...");
    let now = Instant::now();
    match source.repository(collections.clone()).await {
        Ok(repository) => {
            info!(
                "Loaded {} buses and {} stops",
                repository.buses.len(),
                repository.stops.len()
            );
            state.fleet.publish(repository);
        }
        Err(err) => error!("Initial load failed, serving empty fleet: {err}"),
    }
    info!("Loading data took {:?}", now.elapsed());

    let fleet = {
        let source = source.clone();
        let collections = collections.clone();
        PeriodicTask::start(
            "fleet",
            config.fleet_interval,
            state.fleet.clone(),
            move || {
                let source = source.clone();
                let collections = collections.clone();
                async move { source.repository(collections).await }
            },
        )
    };
    let seats = {
        let source = source.clone();
        let collections = collections.clone();
        PeriodicTask::start(
            "seats",
            config.seats_interval,
            state.seats.clone(),
            move || {
                let source = source.clone();
                let collections = collections.clone();
                async move { source.seat_counts(collections).await }
            },
        )
    };

    let app = axum::Router::new()
        .route("/buses", get(api::buses))
        .route("/buses/{id}", get(api::bus))
        .route("/stops", get(api::stops))
        .route("/age", get(api::age))
        .with_state(state);
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Could not bind port {}: {err}", config.port);
            std::process::exit(1);
        }
    };
    info!("Listening to port {}", config.port);
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {err}");
    }

    info!("Shutting down...");
    fleet.stop().await;
    seats.stop().await;
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Could not listen for shutdown signal: {err}");
    }
}
