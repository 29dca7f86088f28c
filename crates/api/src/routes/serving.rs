//! The core serve/click endpoints (spec.md §6, §4.4, §4.5).

use crate::error::{ApiError, ErrorBody};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campaign_core::types::Ad;
use uuid::Uuid;

/// `select_ad`. Records an impression on first serve; the transport never
/// writes state itself.
#[utoipa::path(
    get,
    path = "/clients/{client_id}/ad",
    tag = "Serving",
    params(("client_id" = Uuid, Path, description = "Client to serve")),
    responses(
        (status = 200, description = "Winning ad", body = Ad),
        (status = 404, description = "Unknown client or no eligible campaign", body = ErrorBody),
    )
)]
pub async fn get_ad(State(state): State<AppState>, Path(client_id): Path<Uuid>) -> Result<Json<Ad>, ApiError> {
    let ad = state.serving.select_ad(client_id).await?;
    metrics::counter!("api.ads.served").increment(1);
    Ok(Json(ad))
}

#[utoipa::path(
    post,
    path = "/campaigns/{campaign_id}/clicks/{client_id}",
    tag = "Serving",
    params(
        ("campaign_id" = Uuid, Path, description = "Campaign clicked"),
        ("client_id" = Uuid, Path, description = "Client who clicked"),
    ),
    responses(
        (status = 204, description = "Click recorded"),
        (status = 409, description = "Recorder refused: no prior impression, cap reached, or outside validity window", body = ErrorBody),
    )
)]
pub async fn record_click(
    State(state): State<AppState>,
    Path((campaign_id, client_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    state.serving.record_click(campaign_id, client_id).await?;
    metrics::counter!("api.clicks.recorded").increment(1);
    Ok(StatusCode::NO_CONTENT)
}
