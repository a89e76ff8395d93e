use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::error;

/// Seconds since the fleet was last refreshed.
pub async fn age(State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    match state.fleet.updated_at() {
        Some(updated_at) => Ok(updated_at.elapsed_seconds().to_string().into_response()),
        None => {
            error!("Fleet has not been loaded yet");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
