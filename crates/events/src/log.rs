//! The append-only ad-event log (C3). Provides the read primitives other
//! components compose into the ranking filters, the recorder's cap checks,
//! and the statistics aggregator (spec.md §4.3).

use campaign_core::types::{AdEvent, Day, EventType};
use dashmap::DashMap;
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

#[derive(Default)]
pub struct EventLog {
    /// All events for a campaign, in write order. Never mutated in place,
    /// only appended to.
    by_campaign: DashMap<Uuid, Vec<AdEvent>>,
    /// Fast existence check for (campaign, client, type) — backs both the
    /// idempotent-write check (spec.md §4.5 step 7) and the per-client
    /// eligibility flags (spec.md §4.4 filters 3–4).
    index: DashMap<(Uuid, Uuid, EventType), Uuid>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if an event of this type already exists for (campaign, client).
    pub fn has_event(&self, campaign_id: Uuid, client_id: Uuid, event_type: EventType) -> bool {
        self.index.contains_key(&(campaign_id, client_id, event_type))
    }

    /// Per-client flags used by ranking and the recorder: does this client
    /// already have an impression / click on this campaign?
    pub fn client_flags(&self, campaign_id: Uuid, client_id: Uuid) -> (bool, bool) {
        (
            self.has_event(campaign_id, client_id, EventType::Impression),
            self.has_event(campaign_id, client_id, EventType::Click),
        )
    }

    /// `count(distinct client_id)` over all events of `event_type` for a
    /// campaign (spec.md §4.3).
    pub fn unique_count(&self, campaign_id: Uuid, event_type: EventType) -> u64 {
        let Some(events) = self.by_campaign.get(&campaign_id) else {
            return 0;
        };
        events
            .iter()
            .filter(|e| e.event_type == event_type)
            .map(|e| e.client_id)
            .collect::<HashSet<_>>()
            .len() as u64
    }

    /// Unique impression and click counts in one pass.
    pub fn unique_counts(&self, campaign_id: Uuid) -> (u64, u64) {
        (
            self.unique_count(campaign_id, EventType::Impression),
            self.unique_count(campaign_id, EventType::Click),
        )
    }

    /// Per-day unique counts for both event types, ascending by day
    /// (spec.md §4.3, §4.6).
    pub fn daily_unique_counts(&self, campaign_id: Uuid) -> BTreeMap<Day, (u64, u64)> {
        let Some(events) = self.by_campaign.get(&campaign_id) else {
            return BTreeMap::new();
        };
        let mut impressions: BTreeMap<Day, HashSet<Uuid>> = BTreeMap::new();
        let mut clicks: BTreeMap<Day, HashSet<Uuid>> = BTreeMap::new();
        for event in events.iter() {
            let bucket = match event.event_type {
                EventType::Impression => impressions.entry(event.event_day).or_default(),
                EventType::Click => clicks.entry(event.event_day).or_default(),
            };
            bucket.insert(event.client_id);
        }
        let mut days: Vec<Day> = impressions.keys().chain(clicks.keys()).copied().collect();
        days.sort_unstable();
        days.dedup();

        let mut result = BTreeMap::new();
        for day in days {
            let impr = impressions.get(&day).map(HashSet::len).unwrap_or(0) as u64;
            let click = clicks.get(&day).map(HashSet::len).unwrap_or(0) as u64;
            result.insert(day, (impr, click));
        }
        result
    }

    /// Appends a new event for (campaign, client, event_type) unless one
    /// already exists, in which case it is a no-op and the existing event's
    /// id is returned (spec.md §4.5 step 7 / §8 property 5, idempotence).
    /// Returns `(event_id, newly_inserted)`.
    pub fn record_if_absent(
        &self,
        campaign_id: Uuid,
        client_id: Uuid,
        event_type: EventType,
        event_day: Day,
    ) -> (Uuid, bool) {
        if let Some(existing) = self.index.get(&(campaign_id, client_id, event_type)) {
            return (*existing, false);
        }

        let event = AdEvent {
            id: Uuid::new_v4(),
            campaign_id,
            client_id,
            event_type,
            event_day,
            event_timestamp: chrono::Utc::now(),
        };
        let id = event.id;
        self.index.insert((campaign_id, client_id, event_type), id);
        self.by_campaign.entry(campaign_id).or_default().push(event);
        (id, true)
    }
}
