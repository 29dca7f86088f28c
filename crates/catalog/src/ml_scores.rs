//! ML-affinity-score half of the catalog store (C2) — at most one score per
//! (client, advertiser) pair (spec.md §3).

use campaign_core::types::MlScore;
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Default)]
pub struct MlScoreStore {
    scores: DashMap<(Uuid, Uuid), MlScore>,
}

impl MlScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, client_id: Uuid, advertiser_id: Uuid) -> Option<MlScore> {
        self.scores.get(&(client_id, advertiser_id)).map(|r| *r.value())
    }

    /// Score for a (client, advertiser) pair, treated as 0 when absent
    /// (spec.md §4.4, §9).
    pub fn score_or_zero(&self, client_id: Uuid, advertiser_id: Uuid) -> u32 {
        self.get(client_id, advertiser_id).map(|s| s.score).unwrap_or(0)
    }

    /// Replaces (or creates) the score for (client_id, advertiser_id).
    /// FK existence is validated by the caller (see `Catalog::upsert_ml_score`).
    pub fn upsert(&self, score: MlScore) {
        self.scores
            .insert((score.client_id, score.advertiser_id), score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_score_defaults_to_zero() {
        let store = MlScoreStore::new();
        assert_eq!(store.score_or_zero(Uuid::new_v4(), Uuid::new_v4()), 0);
    }

    #[test]
    fn upsert_replaces() {
        let store = MlScoreStore::new();
        let client_id = Uuid::new_v4();
        let advertiser_id = Uuid::new_v4();
        store.upsert(MlScore {
            client_id,
            advertiser_id,
            score: 100,
        });
        store.upsert(MlScore {
            client_id,
            advertiser_id,
            score: 200,
        });
        assert_eq!(store.score_or_zero(client_id, advertiser_id), 200);
    }
}
