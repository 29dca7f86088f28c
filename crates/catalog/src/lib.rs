#![warn(clippy::unwrap_used)]

pub mod advertisers;
pub mod campaigns;
pub mod clients;
pub mod clock;
pub mod ml_scores;

pub use advertisers::AdvertiserStore;
pub use campaigns::{CampaignPatch, CampaignStore, NewCampaign};
pub use clients::ClientStore;
pub use clock::ClockStore;
pub use ml_scores::MlScoreStore;

use campaign_core::error::{EngineError, EngineResult};
use campaign_core::types::MlScore;
use uuid::Uuid;

/// Bundles the clock and the four catalog sub-stores (C1 + C2) and adds the
/// cross-entity validation (FK checks spanning more than one store) that a
/// single sub-store cannot perform on its own. Mirrors the teacher's
/// `ManagementStore`, which likewise owns every domain `DashMap` behind one
/// facade.
#[derive(Default)]
pub struct Catalog {
    pub clock: ClockStore,
    pub clients: ClientStore,
    pub advertisers: AdvertiserStore,
    pub ml_scores: MlScoreStore,
    pub campaigns: CampaignStore,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts an ML score, rejecting it (spec.md §6) if either FK is
    /// unknown.
    pub fn upsert_ml_score(&self, score: MlScore) -> EngineResult<MlScore> {
        if !self.clients.exists(score.client_id) {
            return Err(EngineError::ClientNotFound(score.client_id));
        }
        if !self.advertisers.exists(score.advertiser_id) {
            return Err(EngineError::AdvertiserNotFound(score.advertiser_id));
        }
        self.ml_scores.upsert(score);
        Ok(score)
    }

    /// Creates a campaign after checking the advertiser FK (spec.md §6
    /// "Create campaign ... 404 on advertiser").
    pub fn create_campaign(
        &self,
        advertiser_id: Uuid,
        new: NewCampaign,
    ) -> EngineResult<campaign_core::types::Campaign> {
        if !self.advertisers.exists(advertiser_id) {
            return Err(EngineError::AdvertiserNotFound(advertiser_id));
        }
        self.campaigns.create(new)
    }
}
