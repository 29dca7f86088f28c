//! Eligibility filtering and expected-profit scoring (C4). Pure functions
//! over already-fetched data; the orchestration that gathers clock, catalog,
//! and event-log state lives in [`crate::engine`].

use campaign_core::types::{Campaign, Client, ClientGender, Day, TargetGender};

const K: f64 = 0.001;
const M0: f64 = 5000.0;

fn p_click(score: u32) -> f64 {
    1.0 / (1.0 + (-K * (score as f64 - M0)).exp())
}

/// A campaign that cleared all seven hard filters for one client, along
/// with the inputs needed to rank it.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub campaign: Campaign,
    pub has_impression: bool,
    pub expected_profit: f64,
    pub ml_score: u32,
}

/// Evaluates the seven hard filters (spec.md §4.4) for one campaign against
/// one client on `current_day`, given pre-counted unique totals and this
/// client's per-campaign event flags. Returns `None` if any filter rejects.
#[allow(clippy::too_many_arguments)]
pub fn evaluate(
    campaign: &Campaign,
    client: &Client,
    current_day: Day,
    unique_impressions: u64,
    unique_clicks: u64,
    has_impression: bool,
    has_click: bool,
    ml_score: u32,
) -> Option<Candidate> {
    // 1. Validity window.
    if current_day < campaign.start_date || current_day > campaign.end_date {
        return None;
    }
    // 2. Not exhausted.
    if campaign.is_exhausted(unique_impressions, unique_clicks) {
        return None;
    }
    // 3. Impression-cap gate: a new viewer only if the cap has room.
    if !has_impression && unique_impressions >= campaign.impressions_limit {
        return None;
    }
    // 4. Click-cap gate, analogous to (3).
    if !has_click && unique_clicks >= campaign.clicks_limit {
        return None;
    }
    // 5. Targeting — gender.
    if let Some(target_gender) = campaign.targeting.gender {
        if target_gender != TargetGender::All && !gender_matches(target_gender, client.gender) {
            return None;
        }
    }
    // 6. Targeting — age. Missing client age is treated as 0.
    let client_age = client.age.unwrap_or(0);
    if campaign.targeting.age_from.is_some_and(|from| client_age < from) {
        return None;
    }
    if campaign.targeting.age_to.is_some_and(|to| client_age > to) {
        return None;
    }
    // 7. Targeting — location. Missing client location treated as "".
    if let Some(target_location) = campaign.targeting.location.as_deref() {
        if !target_location.is_empty() {
            let client_location = client.location.as_deref().unwrap_or("");
            if client_location != target_location {
                return None;
            }
        }
    }

    Some(Candidate {
        expected_profit: expected_profit(has_impression, has_click, campaign, ml_score),
        has_impression,
        ml_score,
        campaign: campaign.clone(),
    })
}

fn gender_matches(target: TargetGender, client: Option<ClientGender>) -> bool {
    matches!(
        (target, client),
        (TargetGender::Male, Some(ClientGender::Male)) | (TargetGender::Female, Some(ClientGender::Female))
    )
}

/// The expected-profit formula from spec.md §4.4: a fresh impression earns
/// both revenues, a re-shown impression only the click expectation, and an
/// already-clicked pair nothing further.
fn expected_profit(has_impression: bool, has_click: bool, campaign: &Campaign, ml_score: u32) -> f64 {
    let p = p_click(ml_score);
    if !has_impression {
        campaign.cost_per_impression + campaign.cost_per_click * p
    } else if has_click {
        0.0
    } else {
        campaign.cost_per_click * p
    }
}

/// Picks the winner: `E` descending, then raw ML score descending, then
/// `campaign_id` ascending as a deterministic final tie-break (spec.md
/// §4.4, §8 property 7).
pub fn rank(mut candidates: Vec<Candidate>) -> Option<Candidate> {
    candidates.sort_by(|a, b| {
        b.expected_profit
            .partial_cmp(&a.expected_profit)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.ml_score.cmp(&a.ml_score))
            .then_with(|| a.campaign.campaign_id.cmp(&b.campaign.campaign_id))
    });
    candidates.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_core::types::Targeting;
    use chrono::Utc;
    use uuid::Uuid;

    fn campaign() -> Campaign {
        Campaign {
            campaign_id: Uuid::new_v4(),
            advertiser_id: Uuid::new_v4(),
            impressions_limit: 100,
            clicks_limit: 10,
            cost_per_impression: 1.0,
            cost_per_click: 10.0,
            ad_title: "t".into(),
            ad_text: "x".into(),
            ad_photo_url: None,
            start_date: 0,
            end_date: 10,
            targeting: Targeting::default(),
            is_deleted: false,
            create_date: Utc::now(),
        }
    }

    fn client() -> Client {
        Client {
            id: Uuid::new_v4(),
            login: "alice".into(),
            age: Some(30),
            location: Some("Paris".into()),
            gender: Some(ClientGender::Female),
        }
    }

    #[test]
    fn rejects_outside_validity_window() {
        let c = campaign();
        let result = evaluate(&c, &client(), 11, 0, 0, false, false, 0);
        assert!(result.is_none());
    }

    #[test]
    fn rejects_opposite_gender_target() {
        let mut c = campaign();
        c.targeting.gender = Some(TargetGender::Male);
        let result = evaluate(&c, &client(), 5, 0, 0, false, false, 0);
        assert!(result.is_none());
    }

    #[test]
    fn accepts_all_gender_target() {
        let mut c = campaign();
        c.targeting.gender = Some(TargetGender::All);
        let result = evaluate(&c, &client(), 5, 0, 0, false, false, 0);
        assert!(result.is_some());
    }

    #[test]
    fn rejects_inverted_age_window() {
        let mut c = campaign();
        c.targeting.age_from = Some(40);
        let result = evaluate(&c, &client(), 5, 0, 0, false, false, 0);
        assert!(result.is_none());
    }

    #[test]
    fn expected_profit_matches_s3_scenario() {
        // spec.md §8 S3: two campaigns, equal ML score of 8000.
        let mut a = campaign();
        a.cost_per_impression = 1.0;
        a.cost_per_click = 10.0;
        let mut b = campaign();
        b.cost_per_impression = 2.0;
        b.cost_per_click = 2.0;

        let candidate_a = evaluate(&a, &client(), 5, 0, 0, false, false, 8000).unwrap();
        let candidate_b = evaluate(&b, &client(), 5, 0, 0, false, false, 8000).unwrap();

        assert!(candidate_a.expected_profit > candidate_b.expected_profit);
        assert!((candidate_a.expected_profit - 10.53).abs() < 0.01);
        assert!((candidate_b.expected_profit - 3.906).abs() < 0.01);
    }

    #[test]
    fn rank_breaks_ties_by_campaign_id() {
        let mut a = campaign();
        let mut b = campaign();
        a.campaign_id = Uuid::from_u128(1);
        b.campaign_id = Uuid::from_u128(2);
        let ca = Candidate { campaign: a.clone(), has_impression: false, expected_profit: 5.0, ml_score: 0 };
        let cb = Candidate { campaign: b, has_impression: false, expected_profit: 5.0, ml_score: 0 };
        let winner = rank(vec![ca, cb]).unwrap();
        assert_eq!(winner.campaign.campaign_id, a.campaign_id);
    }
}
