//! Shared entities for the ad-serving engine: clients, advertisers, ML
//! affinity scores, campaigns, and the ad-event log.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An integer "virtual day" — the operator-controlled clock value, and the
/// unit campaign validity windows and event days are measured in.
pub type Day = i64;

/// A registered end user that ads can be served to.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Client {
    pub id: Uuid,
    pub login: String,
    pub age: Option<u32>,
    pub location: Option<String>,
    pub gender: Option<ClientGender>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClientGender {
    Male,
    Female,
}

/// The owner of one or more campaigns.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Advertiser {
    pub advertiser_id: Uuid,
    pub name: String,
}

/// Predicted affinity of a client for an advertiser, at most one per
/// (client, advertiser) pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MlScore {
    pub client_id: Uuid,
    pub advertiser_id: Uuid,
    pub score: u32,
}

/// Gender a campaign targets. `All` and the absence of a value are
/// equivalent at match time (both mean "untargeted").
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetGender {
    Male,
    Female,
    All,
}

/// Optional demographic/geographic targeting predicate for a campaign.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Targeting {
    #[serde(default)]
    pub gender: Option<TargetGender>,
    #[serde(default)]
    pub age_from: Option<u32>,
    #[serde(default)]
    pub age_to: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
}

/// An advertising campaign: budget caps, prices, creative, validity window,
/// and optional targeting.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Campaign {
    pub campaign_id: Uuid,
    pub advertiser_id: Uuid,
    pub impressions_limit: u64,
    pub clicks_limit: u64,
    pub cost_per_impression: f64,
    pub cost_per_click: f64,
    pub ad_title: String,
    pub ad_text: String,
    pub ad_photo_url: Option<String>,
    pub start_date: Day,
    pub end_date: Day,
    #[serde(default)]
    pub targeting: Targeting,
    pub is_deleted: bool,
    pub create_date: chrono::DateTime<chrono::Utc>,
}

impl Campaign {
    /// `true` once both budget caps have been fully consumed — spec.md §4.4
    /// filter 2.
    pub fn is_exhausted(&self, unique_impressions: u64, unique_clicks: u64) -> bool {
        unique_impressions >= self.impressions_limit && unique_clicks >= self.clicks_limit
    }
}

/// The kind of ad event recorded against a (campaign, client) pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, utoipa::ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    Impression,
    Click,
}

/// A single recorded impression or click. Append-only; see spec.md §3 I1–I4.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AdEvent {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub client_id: Uuid,
    pub event_type: EventType,
    pub event_day: Day,
    pub event_timestamp: chrono::DateTime<chrono::Utc>,
}

/// Payload returned by a successful ad serve.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Ad {
    pub ad_id: Uuid,
    pub ad_title: String,
    pub ad_text: String,
    pub ad_photo_url: Option<String>,
    pub advertiser_id: Uuid,
}
