//! OpenAPI specification and Swagger UI configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ad Serving Engine API",
        version = "0.1.0",
        description = "Catalog, event log, eligibility/ranking, transactional recorder, and statistics for an ad-serving core.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Catalog", description = "Clients, advertisers, and ML affinity scores"),
        (name = "Campaigns", description = "Campaign create/update/delete/list"),
        (name = "Serving", description = "Ad selection and click recording"),
        (name = "Clock", description = "Operator-controlled virtual day"),
        (name = "Stats", description = "Per-campaign and per-advertiser reporting"),
        (name = "Operations", description = "Health and readiness probes"),
    ),
    paths(
        crate::routes::catalog::bulk_upsert_clients,
        crate::routes::catalog::get_client,
        crate::routes::catalog::bulk_upsert_advertisers,
        crate::routes::catalog::get_advertiser,
        crate::routes::catalog::upsert_ml_score,
        crate::routes::campaigns::create_campaign,
        crate::routes::campaigns::list_campaigns,
        crate::routes::campaigns::get_campaign,
        crate::routes::campaigns::update_campaign,
        crate::routes::campaigns::delete_campaign,
        crate::routes::serving::get_ad,
        crate::routes::serving::record_click,
        crate::routes::clock::set_day,
        crate::routes::clock::get_day,
        crate::routes::stats::campaign_totals,
        crate::routes::stats::campaign_daily,
        crate::routes::stats::advertiser_totals,
        crate::routes::stats::advertiser_daily,
        crate::routes::health::health_check,
        crate::routes::health::readiness,
    ),
    components(schemas(
        campaign_core::types::Client,
        campaign_core::types::ClientGender,
        campaign_core::types::Advertiser,
        campaign_core::types::MlScore,
        campaign_core::types::Campaign,
        campaign_core::types::Targeting,
        campaign_core::types::TargetGender,
        campaign_core::types::Ad,
        campaign_catalog::NewCampaign,
        campaign_catalog::CampaignPatch,
        campaign_reporting::Totals,
        campaign_reporting::DailyTotals,
        crate::error::ErrorBody,
        crate::routes::clock::SetDayRequest,
        crate::routes::clock::DayResponse,
        crate::routes::health::HealthResponse,
    ))
)]
pub struct ApiDoc;
