//! Operator clock control (spec.md §6, C1).

use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SetDayRequest {
    pub day: i64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DayResponse {
    pub day: i64,
}

/// Sets the virtual current day. Overwrites; no history (spec.md §4.1).
#[utoipa::path(
    post,
    path = "/clock",
    tag = "Clock",
    request_body = SetDayRequest,
    responses((status = 200, description = "New current day", body = DayResponse))
)]
pub async fn set_day(State(state): State<AppState>, Json(req): Json<SetDayRequest>) -> Json<DayResponse> {
    state.catalog.clock.set(req.day);
    tracing::info!(day = req.day, "virtual day advanced");
    Json(DayResponse { day: req.day })
}

#[utoipa::path(
    get,
    path = "/clock",
    tag = "Clock",
    responses((status = 200, description = "Current day", body = DayResponse))
)]
pub async fn get_day(State(state): State<AppState>) -> Json<DayResponse> {
    Json(DayResponse {
        day: state.catalog.clock.get(),
    })
}
