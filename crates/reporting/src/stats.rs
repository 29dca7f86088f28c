//! Statistics aggregator (C6): unique-viewer totals, spend, conversion, and
//! daily breakdowns (spec.md §4.6).

use campaign_catalog::Catalog;
use campaign_core::error::{EngineError, EngineResult};
use campaign_core::types::Day;
use campaign_events::EventLog;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Aggregate totals for one campaign or one advertiser.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct Totals {
    pub impressions: u64,
    pub clicks: u64,
    pub spend: f64,
    /// `100 * clicks / impressions`, or 0.0 when there were no impressions.
    pub conversion_percent: f64,
}

/// One day's totals within a daily breakdown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct DailyTotals {
    pub day: Day,
    pub impressions: u64,
    pub clicks: u64,
    pub spend: f64,
    pub conversion_percent: f64,
}

fn conversion_percent(impressions: u64, clicks: u64) -> f64 {
    if impressions > 0 {
        100.0 * clicks as f64 / impressions as f64
    } else {
        0.0
    }
}

fn totals(impressions: u64, clicks: u64, cost_per_impression: f64, cost_per_click: f64) -> Totals {
    Totals {
        impressions,
        clicks,
        spend: impressions as f64 * cost_per_impression + clicks as f64 * cost_per_click,
        conversion_percent: conversion_percent(impressions, clicks),
    }
}

/// `campaign_totals` — spec.md §4.6. Rejects if the campaign is missing or
/// soft-deleted (spec.md §9 preserves this asymmetry with advertiser-scoped
/// reporting).
pub fn campaign_totals(catalog: &Catalog, events: &EventLog, campaign_id: Uuid) -> EngineResult<Totals> {
    let campaign = catalog
        .campaigns
        .get_visible(campaign_id)
        .ok_or(EngineError::CampaignNotFound(campaign_id))?;
    let (impressions, clicks) = events.unique_counts(campaign_id);
    Ok(totals(
        impressions,
        clicks,
        campaign.cost_per_impression,
        campaign.cost_per_click,
    ))
}

/// `advertiser_totals` — sums over every campaign owned by the advertiser,
/// soft-deleted or not, since their past events remain in the log (spec.md
/// §9 open question, preserved as-is).
pub fn advertiser_totals(catalog: &Catalog, events: &EventLog, advertiser_id: Uuid) -> EngineResult<Totals> {
    if !catalog.advertisers.exists(advertiser_id) {
        return Err(EngineError::AdvertiserNotFound(advertiser_id));
    }
    let campaigns = catalog.campaigns.list_all_by_advertiser(advertiser_id);
    let mut impressions = 0u64;
    let mut clicks = 0u64;
    let mut spend = 0.0f64;
    for campaign in &campaigns {
        let (impr, click) = events.unique_counts(campaign.campaign_id);
        impressions += impr;
        clicks += click;
        spend += impr as f64 * campaign.cost_per_impression + click as f64 * campaign.cost_per_click;
    }
    Ok(Totals {
        impressions,
        clicks,
        spend,
        conversion_percent: conversion_percent(impressions, clicks),
    })
}

/// `campaign_daily` — per-day records ascending by day; days with no events
/// do not appear (spec.md §4.6).
pub fn campaign_daily(catalog: &Catalog, events: &EventLog, campaign_id: Uuid) -> EngineResult<Vec<DailyTotals>> {
    let campaign = catalog
        .campaigns
        .get_visible(campaign_id)
        .ok_or(EngineError::CampaignNotFound(campaign_id))?;
    let daily = events.daily_unique_counts(campaign_id);
    Ok(daily
        .into_iter()
        .map(|(day, (impressions, clicks))| DailyTotals {
            day,
            impressions,
            clicks,
            spend: impressions as f64 * campaign.cost_per_impression + clicks as f64 * campaign.cost_per_click,
            conversion_percent: conversion_percent(impressions, clicks),
        })
        .collect())
}

/// `advertiser_daily` — per-day records aggregating across the advertiser's
/// campaigns (soft-deleted included, matching `advertiser_totals`),
/// ascending by day.
pub fn advertiser_daily(catalog: &Catalog, events: &EventLog, advertiser_id: Uuid) -> EngineResult<Vec<DailyTotals>> {
    if !catalog.advertisers.exists(advertiser_id) {
        return Err(EngineError::AdvertiserNotFound(advertiser_id));
    }
    let campaigns = catalog.campaigns.list_all_by_advertiser(advertiser_id);

    let mut by_day: std::collections::BTreeMap<Day, (u64, u64, f64)> = std::collections::BTreeMap::new();
    for campaign in &campaigns {
        for (day, (impressions, clicks)) in events.daily_unique_counts(campaign.campaign_id) {
            let entry = by_day.entry(day).or_insert((0, 0, 0.0));
            entry.0 += impressions;
            entry.1 += clicks;
            entry.2 += impressions as f64 * campaign.cost_per_impression + clicks as f64 * campaign.cost_per_click;
        }
    }

    Ok(by_day
        .into_iter()
        .map(|(day, (impressions, clicks, spend))| DailyTotals {
            day,
            impressions,
            clicks,
            spend,
            conversion_percent: conversion_percent(impressions, clicks),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_catalog::NewCampaign;
    use campaign_core::types::{Advertiser, EventType, Targeting};

    fn setup() -> (Catalog, EventLog, Uuid, Uuid) {
        let catalog = Catalog::new();
        let events = EventLog::new();
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
                    impressions_limit: 10,
                    clicks_limit: 10,
                    cost_per_impression: 1.0,
                    cost_per_click: 5.0,
                    ad_title: "t".into(),
                    ad_text: "x".into(),
                    ad_photo_url: None,
                    start_date: 0,
                    end_date: 10,
                    targeting: Targeting::default(),
                },
            )
            .unwrap();
        (catalog, events, advertiser_id, campaign.campaign_id)
    }

    #[test]
    fn campaign_totals_matches_s6_scenario() {
        let (catalog, events, _advertiser_id, campaign_id) = setup();
        let client_id = Uuid::new_v4();
        events.record_if_absent(campaign_id, client_id, EventType::Impression, 3);
        events.record_if_absent(campaign_id, client_id, EventType::Click, 3);

        let result = campaign_totals(&catalog, &events, campaign_id).unwrap();
        assert_eq!(result.impressions, 1);
        assert_eq!(result.clicks, 1);
        assert_eq!(result.conversion_percent, 100.0);
        assert_eq!(result.spend, 1.0 + 5.0);
    }

    #[test]
    fn campaign_totals_rejects_soft_deleted() {
        let (catalog, events, _advertiser_id, campaign_id) = setup();
        catalog.campaigns.soft_delete(campaign_id).unwrap();
        let result = campaign_totals(&catalog, &events, campaign_id);
        assert!(matches!(result, Err(EngineError::CampaignNotFound(_))));
    }

    #[test]
    fn advertiser_totals_includes_soft_deleted_campaigns() {
        let (catalog, events, advertiser_id, campaign_id) = setup();
        let client_id = Uuid::new_v4();
        events.record_if_absent(campaign_id, client_id, EventType::Impression, 1);
        catalog.campaigns.soft_delete(campaign_id).unwrap();

        let result = advertiser_totals(&catalog, &events, advertiser_id).unwrap();
        assert_eq!(result.impressions, 1);
    }

    #[test]
    fn campaign_daily_omits_days_without_events() {
        let (catalog, events, _advertiser_id, campaign_id) = setup();
        let client_id = Uuid::new_v4();
        events.record_if_absent(campaign_id, client_id, EventType::Impression, 2);

        let daily = campaign_daily(&catalog, &events, campaign_id).unwrap();
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].day, 2);
    }
}
