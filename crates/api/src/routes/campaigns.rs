//! Campaign CRUD and listing endpoints (spec.md §6).

use crate::error::{ApiError, ErrorBody};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use campaign_catalog::{CampaignPatch, NewCampaign};
use campaign_core::error::EngineError;
use campaign_core::types::Campaign;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
}

fn default_page() -> u32 {
    1
}
fn default_size() -> u32 {
    20
}

#[utoipa::path(
    post,
    path = "/advertisers/{advertiser_id}/campaigns",
    tag = "Campaigns",
    params(("advertiser_id" = Uuid, Path, description = "Owning advertiser")),
    request_body = NewCampaign,
    responses(
        (status = 201, description = "Campaign created", body = Campaign),
        (status = 404, description = "Advertiser not found", body = ErrorBody),
        (status = 422, description = "Invariant violation", body = ErrorBody),
    )
)]
pub async fn create_campaign(
    State(state): State<AppState>,
    Path(advertiser_id): Path<Uuid>,
    Json(new): Json<NewCampaign>,
) -> Result<(StatusCode, Json<Campaign>), ApiError> {
    let mut new = new;
    new.advertiser_id = advertiser_id;
    let campaign = state.catalog.create_campaign(advertiser_id, new)?;
    metrics::counter!("api.campaigns.created").increment(1);
    Ok((StatusCode::CREATED, Json(campaign)))
}

/// Descending by `create_date`; soft-deleted campaigns excluded (spec.md §6).
#[utoipa::path(
    get,
    path = "/advertisers/{advertiser_id}/campaigns",
    tag = "Campaigns",
    params(("advertiser_id" = Uuid, Path, description = "Owning advertiser"), PageQuery),
    responses(
        (status = 200, description = "Page of campaigns", body = Vec<Campaign>),
        (status = 404, description = "Advertiser not found", body = ErrorBody),
    )
)]
pub async fn list_campaigns(
    State(state): State<AppState>,
    Path(advertiser_id): Path<Uuid>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Campaign>>, ApiError> {
    if !state.catalog.advertisers.exists(advertiser_id) {
        return Err(ApiError(EngineError::AdvertiserNotFound(advertiser_id)));
    }
    let campaigns = state
        .catalog
        .campaigns
        .list_visible_by_advertiser(advertiser_id, page.page, page.size);
    Ok(Json(campaigns))
}

#[utoipa::path(
    get,
    path = "/campaigns/{id}",
    tag = "Campaigns",
    params(("id" = Uuid, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "Campaign found", body = Campaign),
        (status = 404, description = "Missing or soft-deleted", body = ErrorBody),
    )
)]
pub async fn get_campaign(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Campaign>, ApiError> {
    state
        .catalog
        .campaigns
        .get_visible(id)
        .map(Json)
        .ok_or_else(|| ApiError(EngineError::CampaignNotFound(id)))
}

#[utoipa::path(
    put,
    path = "/campaigns/{id}",
    tag = "Campaigns",
    params(("id" = Uuid, Path, description = "Campaign id")),
    request_body = CampaignPatch,
    responses(
        (status = 200, description = "Campaign updated", body = Campaign),
        (status = 404, description = "Missing or soft-deleted", body = ErrorBody),
        (status = 422, description = "Invariant violation", body = ErrorBody),
    )
)]
pub async fn update_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<CampaignPatch>,
) -> Result<Json<Campaign>, ApiError> {
    let campaign = state.catalog.campaigns.update(id, patch)?;
    Ok(Json(campaign))
}

#[utoipa::path(
    delete,
    path = "/campaigns/{id}",
    tag = "Campaigns",
    params(("id" = Uuid, Path, description = "Campaign id")),
    responses(
        (status = 204, description = "Campaign soft-deleted"),
        (status = 404, description = "Missing or already deleted", body = ErrorBody),
    )
)]
pub async fn delete_campaign(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    state.catalog.campaigns.soft_delete(id)?;
    metrics::counter!("api.campaigns.deleted").increment(1);
    Ok(StatusCode::NO_CONTENT)
}
