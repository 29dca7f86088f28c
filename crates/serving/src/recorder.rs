//! Transactional impression/click recorder (C5). Both operations run under
//! the campaign's exclusive row lock so the count-then-insert sequence is
//! serializable per campaign (spec.md §4.5, §5).

use campaign_catalog::Catalog;
use campaign_core::types::EventType;
use campaign_events::EventLog;
use uuid::Uuid;

/// Runs the nine-step procedure from spec.md §4.5. Returns `true` once an
/// event equivalent to the request is durably recorded — either inserted by
/// this call or already present; `false` means the write was refused and
/// MUST NOT be treated as success.
pub async fn record(
    catalog: &Catalog,
    events: &EventLog,
    campaign_id: Uuid,
    client_id: Uuid,
    event_type: EventType,
) -> bool {
    let lock = catalog.campaigns.lock_for(campaign_id);
    let _guard = lock.lock().await;

    // Steps 1-2: lock held above; campaign must exist and be live.
    let Some(campaign) = catalog.campaigns.get_raw(campaign_id) else {
        return false;
    };
    if campaign.is_deleted {
        return false;
    }

    // Step 3: validity window.
    let current_day = catalog.clock.get();
    if current_day < campaign.start_date || current_day > campaign.end_date {
        return false;
    }

    // Step 4: unique counts over the campaign.
    let (unique_impressions, unique_clicks) = events.unique_counts(campaign_id);

    // Step 5: a click requires a prior impression by this client.
    if event_type == EventType::Click {
        let (has_impression, _) = events.client_flags(campaign_id, client_id);
        if !has_impression {
            return false;
        }
    }

    // Step 6: cap check. Deliberately precedes the idempotence check below,
    // matching the source's ordering — a second call that lands exactly on
    // an already-reached cap refuses even though no new event is written.
    let cap_reached = match event_type {
        EventType::Impression => unique_impressions >= campaign.impressions_limit,
        EventType::Click => unique_clicks >= campaign.clicks_limit,
    };
    if cap_reached {
        return false;
    }

    // Step 7: idempotent no-op if this event already exists.
    if events.has_event(campaign_id, client_id, event_type) {
        return true;
    }

    // Steps 8-9: insert and commit.
    events.record_if_absent(campaign_id, client_id, event_type, current_day);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_catalog::{Catalog, NewCampaign};
    use campaign_core::types::{Advertiser, Targeting};

    fn seeded_campaign(catalog: &Catalog, impressions_limit: u64, clicks_limit: u64) -> Uuid {
        let advertiser_id = Uuid::new_v4();
        catalog.advertisers.bulk_upsert(vec![Advertiser {
            advertiser_id,
            name: "Acme".into(),
        }]);
        let campaign = catalog
            .create_campaign(
                advertiser_id,
                NewCampaign {
                    advertiser_id,
                    impressions_limit,
                    clicks_limit,
                    cost_per_impression: 1.0,
                    cost_per_click: 1.0,
                    ad_title: "t".into(),
                    ad_text: "x".into(),
                    ad_photo_url: None,
                    start_date: 0,
                    end_date: 10,
                    targeting: Targeting::default(),
                },
            )
            .unwrap();
        campaign.campaign_id
    }

    #[tokio::test]
    async fn click_without_impression_is_refused() {
        let catalog = Catalog::new();
        let events = EventLog::new();
        let campaign_id = seeded_campaign(&catalog, 10, 10);
        let client_id = Uuid::new_v4();

        let ok = record(&catalog, &events, campaign_id, client_id, EventType::Click).await;
        assert!(!ok);
    }

    #[tokio::test]
    async fn impression_then_click_succeeds() {
        let catalog = Catalog::new();
        let events = EventLog::new();
        let campaign_id = seeded_campaign(&catalog, 10, 10);
        let client_id = Uuid::new_v4();

        assert!(record(&catalog, &events, campaign_id, client_id, EventType::Impression).await);
        assert!(record(&catalog, &events, campaign_id, client_id, EventType::Click).await);
    }

    #[tokio::test]
    async fn impression_cap_enforced_across_clients() {
        let catalog = Catalog::new();
        let events = EventLog::new();
        let campaign_id = seeded_campaign(&catalog, 1, 10);

        let client_a = Uuid::new_v4();
        let client_b = Uuid::new_v4();
        assert!(record(&catalog, &events, campaign_id, client_a, EventType::Impression).await);
        assert!(!record(&catalog, &events, campaign_id, client_b, EventType::Impression).await);
    }

    #[tokio::test]
    async fn refuses_outside_validity_window() {
        let catalog = Catalog::new();
        let events = EventLog::new();
        let campaign_id = seeded_campaign(&catalog, 10, 10);
        catalog.clock.set(50);

        let ok = record(&catalog, &events, campaign_id, Uuid::new_v4(), EventType::Impression).await;
        assert!(!ok);
    }

    #[tokio::test]
    async fn soft_deleted_campaign_refuses_writes() {
        let catalog = Catalog::new();
        let events = EventLog::new();
        let campaign_id = seeded_campaign(&catalog, 10, 10);
        catalog.campaigns.soft_delete(campaign_id).unwrap();

        let ok = record(&catalog, &events, campaign_id, Uuid::new_v4(), EventType::Impression).await;
        assert!(!ok);
    }
}
