//! Advertiser half of the catalog store (C2) — upserted, never deleted.

use campaign_core::types::Advertiser;
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Default)]
pub struct AdvertiserStore {
    advertisers: DashMap<Uuid, Advertiser>,
}

impl AdvertiserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: Uuid) -> Option<Advertiser> {
        self.advertisers.get(&id).map(|r| r.value().clone())
    }

    pub fn exists(&self, id: Uuid) -> bool {
        self.advertisers.contains_key(&id)
    }

    pub fn bulk_upsert(&self, advertisers: Vec<Advertiser>) -> Vec<Advertiser> {
        for advertiser in &advertisers {
            self.advertisers
                .insert(advertiser.advertiser_id, advertiser.clone());
        }
        advertisers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_then_get() {
        let store = AdvertiserStore::new();
        let id = Uuid::new_v4();
        store.bulk_upsert(vec![Advertiser {
            advertiser_id: id,
            name: "Acme".into(),
        }]);
        assert_eq!(store.get(id).unwrap().name, "Acme");
    }

    #[test]
    fn missing_advertiser_is_none() {
        let store = AdvertiserStore::new();
        assert!(store.get(Uuid::new_v4()).is_none());
    }
}
