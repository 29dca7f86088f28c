//! Campaign and advertiser statistics endpoints (spec.md §6, §4.6).

use crate::error::{ApiError, ErrorBody};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use campaign_reporting::{stats, DailyTotals, Totals};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/campaigns/{id}/stats",
    tag = "Stats",
    params(("id" = Uuid, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "Campaign totals", body = Totals),
        (status = 404, description = "Missing or soft-deleted", body = ErrorBody),
    )
)]
pub async fn campaign_totals(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Totals>, ApiError> {
    let totals = stats::campaign_totals(&state.catalog, &state.events, id)?;
    Ok(Json(totals))
}

#[utoipa::path(
    get,
    path = "/campaigns/{id}/stats/daily",
    tag = "Stats",
    params(("id" = Uuid, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "Per-day campaign totals, ascending", body = Vec<DailyTotals>),
        (status = 404, description = "Missing or soft-deleted", body = ErrorBody),
    )
)]
pub async fn campaign_daily(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<DailyTotals>>, ApiError> {
    let daily = stats::campaign_daily(&state.catalog, &state.events, id)?;
    Ok(Json(daily))
}

#[utoipa::path(
    get,
    path = "/advertisers/{id}/stats",
    tag = "Stats",
    params(("id" = Uuid, Path, description = "Advertiser id")),
    responses(
        (status = 200, description = "Advertiser totals, including soft-deleted campaigns", body = Totals),
        (status = 404, description = "Advertiser not found", body = ErrorBody),
    )
)]
pub async fn advertiser_totals(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Totals>, ApiError> {
    let totals = stats::advertiser_totals(&state.catalog, &state.events, id)?;
    Ok(Json(totals))
}

#[utoipa::path(
    get,
    path = "/advertisers/{id}/stats/daily",
    tag = "Stats",
    params(("id" = Uuid, Path, description = "Advertiser id")),
    responses(
        (status = 200, description = "Per-day advertiser totals, ascending", body = Vec<DailyTotals>),
        (status = 404, description = "Advertiser not found", body = ErrorBody),
    )
)]
pub async fn advertiser_daily(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<DailyTotals>>, ApiError> {
    let daily = stats::advertiser_daily(&state.catalog, &state.events, id)?;
    Ok(Json(daily))
}
