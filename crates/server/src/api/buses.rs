use crate::{
    api::location_from_params,
    dto::{BusDto, DeparturesDto, TrackingDto},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::{collections::HashMap, sync::Arc};

pub async fn buses(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let location = location_from_params(&params)?;
    let mut board = state.board();
    board.locate(&location);

    let count: usize = match params.get("count") {
        Some(value) => value.parse().map_err(|_| StatusCode::BAD_REQUEST)?,
        None => usize::MAX,
    };
    let buses: Vec<_> = board
        .departures()
        .iter()
        .take(count)
        .map(BusDto::from)
        .collect();
    Ok(Json(DeparturesDto {
        degraded: board.is_degraded(),
        location_error: board.location_error().map(|err| err.to_string()),
        buses,
    })
    .into_response())
}

pub async fn bus(
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let location = location_from_params(&params)?;
    let mut board = state.board();
    board.locate(&location);

    let tracking = board.track(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(TrackingDto::from(&tracking)).into_response())
}
