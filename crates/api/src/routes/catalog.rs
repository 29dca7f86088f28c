//! Client, advertiser, and ML-score endpoints (spec.md §6).

use crate::error::{ApiError, ErrorBody};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campaign_core::error::EngineError;
use campaign_core::types::{Advertiser, Client, MlScore};
use uuid::Uuid;

/// Idempotent bulk upsert by `id`.
#[utoipa::path(
    post,
    path = "/clients",
    tag = "Catalog",
    request_body = Vec<Client>,
    responses((status = 201, description = "Upserted clients", body = Vec<Client>))
)]
pub async fn bulk_upsert_clients(
    State(state): State<AppState>,
    Json(clients): Json<Vec<Client>>,
) -> (StatusCode, Json<Vec<Client>>) {
    let upserted = state.catalog.clients.bulk_upsert(clients);
    metrics::counter!("api.clients.upserted").increment(upserted.len() as u64);
    (StatusCode::CREATED, Json(upserted))
}

#[utoipa::path(
    get,
    path = "/clients/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Client id")),
    responses(
        (status = 200, description = "Client found", body = Client),
        (status = 404, description = "No client with this id", body = ErrorBody),
    )
)]
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Client>, ApiError> {
    state
        .catalog
        .clients
        .get(id)
        .map(Json)
        .ok_or_else(|| ApiError(EngineError::ClientNotFound(id)))
}

/// Idempotent bulk upsert by `advertiser_id`.
#[utoipa::path(
    post,
    path = "/advertisers",
    tag = "Catalog",
    request_body = Vec<Advertiser>,
    responses((status = 201, description = "Upserted advertisers", body = Vec<Advertiser>))
)]
pub async fn bulk_upsert_advertisers(
    State(state): State<AppState>,
    Json(advertisers): Json<Vec<Advertiser>>,
) -> (StatusCode, Json<Vec<Advertiser>>) {
    let upserted = state.catalog.advertisers.bulk_upsert(advertisers);
    metrics::counter!("api.advertisers.upserted").increment(upserted.len() as u64);
    (StatusCode::CREATED, Json(upserted))
}

#[utoipa::path(
    get,
    path = "/advertisers/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Advertiser id")),
    responses(
        (status = 200, description = "Advertiser found", body = Advertiser),
        (status = 404, description = "No advertiser with this id", body = ErrorBody),
    )
)]
pub async fn get_advertiser(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Advertiser>, ApiError> {
    state
        .catalog
        .advertisers
        .get(id)
        .map(Json)
        .ok_or_else(|| ApiError(EngineError::AdvertiserNotFound(id)))
}

/// Creates or replaces the score for (client, advertiser).
#[utoipa::path(
    post,
    path = "/ml-scores",
    tag = "Catalog",
    request_body = MlScore,
    responses(
        (status = 201, description = "Score recorded", body = MlScore),
        (status = 404, description = "Client or advertiser FK missing", body = ErrorBody),
    )
)]
pub async fn upsert_ml_score(
    State(state): State<AppState>,
    Json(score): Json<MlScore>,
) -> Result<(StatusCode, Json<MlScore>), ApiError> {
    let score = state.catalog.upsert_ml_score(score)?;
    metrics::counter!("api.ml_scores.upserted").increment(1);
    Ok((StatusCode::CREATED, Json(score)))
}
