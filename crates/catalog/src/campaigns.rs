//! Campaign half of the catalog store (C2): validated create/update,
//! soft delete, listing, and the per-campaign row lock the event recorder
//! (C5) serializes writers on (spec.md §4.5, §5).

use campaign_core::error::{EngineError, EngineResult};
use campaign_core::types::{Campaign, Day, Targeting};
use chrono::Utc;
use dashmap::DashMap;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Fields accepted when creating a campaign. `advertiser_id` FK existence
/// is validated by the caller (`Catalog::create_campaign`).
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct NewCampaign {
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
    pub targeting: Targeting,
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct CampaignPatch {
    pub impressions_limit: Option<u64>,
    pub clicks_limit: Option<u64>,
    pub cost_per_impression: Option<f64>,
    pub cost_per_click: Option<f64>,
    pub ad_title: Option<String>,
    pub ad_text: Option<String>,
    pub ad_photo_url: Option<Option<String>>,
    pub start_date: Option<Day>,
    pub end_date: Option<Day>,
    pub targeting: Option<Targeting>,
}

#[derive(Default)]
pub struct CampaignStore {
    campaigns: DashMap<Uuid, Campaign>,
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl CampaignStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, new: NewCampaign) -> EngineResult<Campaign> {
        validate_caps(new.impressions_limit, new.clicks_limit, new.cost_per_impression, new.cost_per_click)?;
        validate_dates(new.start_date, new.end_date)?;
        validate_content(&new.ad_title, &new.ad_text, new.ad_photo_url.as_deref())?;
        validate_targeting(&new.targeting)?;

        let campaign = Campaign {
            campaign_id: Uuid::new_v4(),
            advertiser_id: new.advertiser_id,
            impressions_limit: new.impressions_limit,
            clicks_limit: new.clicks_limit,
            cost_per_impression: new.cost_per_impression,
            cost_per_click: new.cost_per_click,
            ad_title: new.ad_title,
            ad_text: new.ad_text,
            ad_photo_url: new.ad_photo_url,
            start_date: new.start_date,
            end_date: new.end_date,
            targeting: new.targeting,
            is_deleted: false,
            create_date: Utc::now(),
        };
        self.campaigns.insert(campaign.campaign_id, campaign.clone());
        Ok(campaign)
    }

    pub fn update(&self, id: Uuid, patch: CampaignPatch) -> EngineResult<Campaign> {
        let mut entry = self
            .campaigns
            .get_mut(&id)
            .ok_or(EngineError::CampaignNotFound(id))?;
        let campaign = entry.value_mut();
        if campaign.is_deleted {
            return Err(EngineError::CampaignNotFound(id));
        }

        if let Some(v) = patch.impressions_limit {
            campaign.impressions_limit = v;
        }
        if let Some(v) = patch.clicks_limit {
            campaign.clicks_limit = v;
        }
        if let Some(v) = patch.cost_per_impression {
            campaign.cost_per_impression = v;
        }
        if let Some(v) = patch.cost_per_click {
            campaign.cost_per_click = v;
        }
        if let Some(v) = patch.ad_title {
            campaign.ad_title = v;
        }
        if let Some(v) = patch.ad_text {
            campaign.ad_text = v;
        }
        if let Some(v) = patch.ad_photo_url {
            campaign.ad_photo_url = v;
        }
        if let Some(v) = patch.start_date {
            campaign.start_date = v;
        }
        if let Some(v) = patch.end_date {
            campaign.end_date = v;
        }
        if let Some(v) = patch.targeting {
            campaign.targeting = v;
        }

        validate_caps(
            campaign.impressions_limit,
            campaign.clicks_limit,
            campaign.cost_per_impression,
            campaign.cost_per_click,
        )?;
        validate_dates(campaign.start_date, campaign.end_date)?;
        validate_content(&campaign.ad_title, &campaign.ad_text, campaign.ad_photo_url.as_deref())?;
        validate_targeting(&campaign.targeting)?;

        Ok(campaign.clone())
    }

    pub fn soft_delete(&self, id: Uuid) -> EngineResult<()> {
        let mut entry = self
            .campaigns
            .get_mut(&id)
            .ok_or(EngineError::CampaignNotFound(id))?;
        if entry.is_deleted {
            return Err(EngineError::CampaignNotFound(id));
        }
        entry.is_deleted = true;
        Ok(())
    }

    /// Raw lookup, ignores the tombstone flag. Used by the recorder, which
    /// must itself observe `is_deleted` as a transaction step (spec.md §4.5),
    /// and by advertiser-scoped reporting, which includes soft-deleted
    /// campaigns' history (spec.md §9).
    pub fn get_raw(&self, id: Uuid) -> Option<Campaign> {
        self.campaigns.get(&id).map(|r| r.value().clone())
    }

    /// Lookup that hides soft-deleted campaigns (spec.md §3 I6).
    pub fn get_visible(&self, id: Uuid) -> Option<Campaign> {
        self.get_raw(id).filter(|c| !c.is_deleted)
    }

    /// All non-deleted campaigns, for the ranking engine's candidate set.
    pub fn list_active(&self) -> Vec<Campaign> {
        self.campaigns
            .iter()
            .filter(|r| !r.value().is_deleted)
            .map(|r| r.value().clone())
            .collect()
    }

    /// Visible campaigns for one advertiser, newest-first, paginated
    /// (spec.md §6 `List campaigns`).
    pub fn list_visible_by_advertiser(
        &self,
        advertiser_id: Uuid,
        page: u32,
        size: u32,
    ) -> Vec<Campaign> {
        let mut campaigns: Vec<Campaign> = self
            .campaigns
            .iter()
            .filter(|r| r.value().advertiser_id == advertiser_id && !r.value().is_deleted)
            .map(|r| r.value().clone())
            .collect();
        campaigns.sort_by(|a, b| b.create_date.cmp(&a.create_date));
        let offset = (page.saturating_sub(1) as usize) * size as usize;
        campaigns.into_iter().skip(offset).take(size as usize).collect()
    }

    /// All campaigns (including soft-deleted) for one advertiser — the
    /// asymmetric reporting scope spec.md §9 documents and preserves.
    pub fn list_all_by_advertiser(&self, advertiser_id: Uuid) -> Vec<Campaign> {
        self.campaigns
            .iter()
            .filter(|r| r.value().advertiser_id == advertiser_id)
            .map(|r| r.value().clone())
            .collect()
    }

    /// The exclusive per-campaign lock used to linearize impression/click
    /// writers (spec.md §4.5 step 1, §5).
    pub fn lock_for(&self, id: Uuid) -> Arc<Mutex<()>> {
        self.locks.entry(id).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
    }
}

fn validate_caps(impressions_limit: u64, clicks_limit: u64, cpi: f64, cpc: f64) -> EngineResult<()> {
    if impressions_limit == 0 {
        return Err(EngineError::InvariantViolation(
            "impressions_limit must be positive".into(),
        ));
    }
    if clicks_limit == 0 {
        return Err(EngineError::InvariantViolation("clicks_limit must be positive".into()));
    }
    if !(cpi > 0.0) {
        return Err(EngineError::InvariantViolation(
            "cost_per_impression must be positive".into(),
        ));
    }
    if !(cpc > 0.0) {
        return Err(EngineError::InvariantViolation("cost_per_click must be positive".into()));
    }
    Ok(())
}

fn validate_dates(start_date: Day, end_date: Day) -> EngineResult<()> {
    if end_date < start_date {
        return Err(EngineError::InvariantViolation(
            "end_date must be greater than or equal to start_date".into(),
        ));
    }
    Ok(())
}

fn validate_content(ad_title: &str, ad_text: &str, ad_photo_url: Option<&str>) -> EngineResult<()> {
    if ad_title.trim().is_empty() {
        return Err(EngineError::InvariantViolation("ad_title must not be empty".into()));
    }
    if ad_text.trim().is_empty() {
        return Err(EngineError::InvariantViolation("ad_text must not be empty".into()));
    }
    if let Some(url) = ad_photo_url {
        if !url.is_empty() && url::Url::parse(url).is_err() {
            return Err(EngineError::InvariantViolation("ad_photo_url is not a valid URL".into()));
        }
    }
    Ok(())
}

fn validate_targeting(targeting: &Targeting) -> EngineResult<()> {
    if let (Some(from), Some(to)) = (targeting.age_from, targeting.age_to) {
        if from > to {
            return Err(EngineError::InvariantViolation(
                "target age_from must be less than or equal to age_to".into(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_new(advertiser_id: Uuid) -> NewCampaign {
        NewCampaign {
            advertiser_id,
            impressions_limit: 100,
            clicks_limit: 10,
            cost_per_impression: 1.0,
            cost_per_click: 5.0,
            ad_title: "Title".into(),
            ad_text: "Text".into(),
            ad_photo_url: None,
            start_date: 0,
            end_date: 10,
            targeting: Targeting::default(),
        }
    }

    #[test]
    fn create_rejects_zero_caps() {
        let store = CampaignStore::new();
        let mut new = valid_new(Uuid::new_v4());
        new.impressions_limit = 0;
        assert!(store.create(new).is_err());
    }

    #[test]
    fn create_rejects_inverted_dates() {
        let store = CampaignStore::new();
        let mut new = valid_new(Uuid::new_v4());
        new.start_date = 10;
        new.end_date = 5;
        assert!(store.create(new).is_err());
    }

    #[test]
    fn create_rejects_inverted_age_targeting() {
        let store = CampaignStore::new();
        let mut new = valid_new(Uuid::new_v4());
        new.targeting.age_from = Some(40);
        new.targeting.age_to = Some(20);
        assert!(store.create(new).is_err());
    }

    #[test]
    fn soft_delete_hides_from_visible_lookup() {
        let store = CampaignStore::new();
        let campaign = store.create(valid_new(Uuid::new_v4())).unwrap();
        store.soft_delete(campaign.campaign_id).unwrap();
        assert!(store.get_visible(campaign.campaign_id).is_none());
        assert!(store.get_raw(campaign.campaign_id).is_some());
    }

    #[test]
    fn double_delete_fails() {
        let store = CampaignStore::new();
        let campaign = store.create(valid_new(Uuid::new_v4())).unwrap();
        store.soft_delete(campaign.campaign_id).unwrap();
        assert!(store.soft_delete(campaign.campaign_id).is_err());
    }

    #[test]
    fn lock_for_same_id_returns_same_mutex() {
        let store = CampaignStore::new();
        let id = Uuid::new_v4();
        let a = store.lock_for(id);
        let b = store.lock_for(id);
        assert!(Arc::ptr_eq(&a, &b));
    }
}
