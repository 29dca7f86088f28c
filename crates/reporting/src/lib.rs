#![warn(clippy::unwrap_used)]

//! Statistics aggregation over the catalog and event log (C6).

pub mod stats;

pub use stats::{advertiser_daily, advertiser_totals, campaign_daily, campaign_totals, DailyTotals, Totals};
