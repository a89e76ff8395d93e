use crate::{api::location_from_params, dto::StopDto, state::AppState};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::{collections::HashMap, sync::Arc};

pub async fn stops(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let location = location_from_params(&params)?;
    let mut board = state.board();
    board.locate(&location);

    let result: Vec<_> = board.nearby_stops().iter().map(StopDto::from).collect();
    Ok(Json(result).into_response())
}
