#![warn(clippy::unwrap_used)]

//! Eligibility, ranking, and transactional recording (C4 + C5): the
//! component the rest of the system calls "ad serving".

pub mod ranking;
pub mod recorder;

use campaign_catalog::Catalog;
use campaign_core::error::{EngineError, EngineResult};
use campaign_core::types::{Ad, EventType};
use campaign_events::EventLog;
use std::sync::Arc;
use uuid::Uuid;

/// Owns no state itself; wraps shared handles to the catalog and event log
/// so it can be cloned cheaply into request-handling tasks.
#[derive(Clone)]
pub struct ServingEngine {
    catalog: Arc<Catalog>,
    events: Arc<EventLog>,
}

impl ServingEngine {
    pub fn new(catalog: Arc<Catalog>, events: Arc<EventLog>) -> Self {
        Self { catalog, events }
    }

    /// `select_ad` from spec.md §4.4: picks the best eligible campaign for
    /// `client_id` and, on a fresh winner, records the impression before
    /// returning.
    pub async fn select_ad(&self, client_id: Uuid) -> EngineResult<Ad> {
        let client = self
            .catalog
            .clients
            .get(client_id)
            .ok_or(EngineError::ClientNotFound(client_id))?;
        let current_day = self.catalog.clock.get();

        let candidates: Vec<ranking::Candidate> = self
            .catalog
            .campaigns
            .list_active()
            .into_iter()
            .filter_map(|campaign| {
                let (unique_impressions, unique_clicks) = self.events.unique_counts(campaign.campaign_id);
                let (has_impression, has_click) = self.events.client_flags(campaign.campaign_id, client_id);
                let ml_score = self
                    .catalog
                    .ml_scores
                    .score_or_zero(client_id, campaign.advertiser_id);
                ranking::evaluate(
                    &campaign,
                    &client,
                    current_day,
                    unique_impressions,
                    unique_clicks,
                    has_impression,
                    has_click,
                    ml_score,
                )
            })
            .collect();

        let winner = ranking::rank(candidates).ok_or(EngineError::NoAdAvailable)?;

        if !winner.has_impression {
            let recorded = recorder::record(
                &self.catalog,
                &self.events,
                winner.campaign.campaign_id,
                client_id,
                EventType::Impression,
            )
            .await;
            if !recorded {
                // The cap was consumed by a concurrent writer between
                // selection and recording; the caller should re-query.
                return Err(EngineError::NoAdAvailable);
            }
        }

        Ok(Ad {
            ad_id: winner.campaign.campaign_id,
            ad_title: winner.campaign.ad_title,
            ad_text: winner.campaign.ad_text,
            ad_photo_url: winner.campaign.ad_photo_url,
            advertiser_id: winner.campaign.advertiser_id,
        })
    }

    /// `POST ad click` from spec.md §6: records a click, requiring a prior
    /// impression by the same client on the same campaign (spec.md §4.5).
    pub async fn record_click(&self, campaign_id: Uuid, client_id: Uuid) -> EngineResult<()> {
        let recorded = recorder::record(&self.catalog, &self.events, campaign_id, client_id, EventType::Click).await;
        if recorded {
            Ok(())
        } else {
            Err(EngineError::RecorderRefused)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_catalog::NewCampaign;
    use campaign_core::types::{Advertiser, Client, ClientGender, Targeting};

    fn engine_with_campaign(cpi: f64, cpc: f64) -> (ServingEngine, Uuid, Uuid) {
        let catalog = Arc::new(Catalog::new());
        let events = Arc::new(EventLog::new());
        let client_id = Uuid::new_v4();
        let advertiser_id = Uuid::new_v4();

        catalog.clients.bulk_upsert(vec![Client {
            id: client_id,
            login: "alice".into(),
            age: Some(30),
            location: Some("Paris".into()),
            gender: Some(ClientGender::Female),
        }]);
        catalog.advertisers.bulk_upsert(vec![Advertiser {
            advertiser_id,
            name: "Acme".into(),
        }]);
        let campaign = catalog
            .create_campaign(
                advertiser_id,
                NewCampaign {
                    advertiser_id,
                    impressions_limit: 1,
                    clicks_limit: 1,
                    cost_per_impression: cpi,
                    cost_per_click: cpc,
                    ad_title: "t".into(),
                    ad_text: "x".into(),
                    ad_photo_url: None,
                    start_date: 0,
                    end_date: 10,
                    targeting: Targeting::default(),
                },
            )
            .unwrap();

        (ServingEngine::new(catalog, events), client_id, campaign.campaign_id)
    }

    #[tokio::test]
    async fn select_ad_fails_for_unknown_client() {
        let (engine, _client_id, _campaign_id) = engine_with_campaign(1.0, 1.0);
        let result = engine.select_ad(Uuid::new_v4()).await;
        assert!(matches!(result, Err(EngineError::ClientNotFound(_))));
    }

    #[tokio::test]
    async fn select_ad_records_impression_on_first_serve() {
        let (engine, client_id, campaign_id) = engine_with_campaign(1.0, 1.0);
        let ad = engine.select_ad(client_id).await.unwrap();
        assert_eq!(ad.ad_id, campaign_id);
        assert!(engine.events.has_event(campaign_id, client_id, EventType::Impression));
    }

    #[tokio::test]
    async fn select_ad_then_click_round_trip() {
        let (engine, client_id, campaign_id) = engine_with_campaign(1.0, 1.0);
        engine.select_ad(client_id).await.unwrap();
        engine.record_click(campaign_id, client_id).await.unwrap();
        assert!(engine.events.has_event(campaign_id, client_id, EventType::Click));
    }

    #[tokio::test]
    async fn click_before_impression_is_refused() {
        let (engine, client_id, campaign_id) = engine_with_campaign(1.0, 1.0);
        let result = engine.record_click(campaign_id, client_id).await;
        assert!(matches!(result, Err(EngineError::RecorderRefused)));
    }

    #[tokio::test]
    async fn exhausted_campaign_yields_no_ad_available() {
        let (engine, client_id, _campaign_id) = engine_with_campaign(1.0, 1.0);
        engine.select_ad(client_id).await.unwrap();

        let other_client = Uuid::new_v4();
        engine.catalog.clients.bulk_upsert(vec![Client {
            id: other_client,
            login: "bob".into(),
            age: Some(30),
            location: Some("Paris".into()),
            gender: Some(ClientGender::Male),
        }]);
        // impressions_limit is 1 and already consumed by a fresh viewer.
        let result = engine.select_ad(other_client).await;
        assert!(matches!(result, Err(EngineError::NoAdAvailable)));
    }
}
