//! HTTP transport: builds the axum `Router` and drives the listen loop.

use crate::routes;
use crate::state::AppState;
use crate::swagger::ApiDoc;
use axum::routing::{get, post};
use axum::Router;
use campaign_core::config::AppConfig;
use std::net::SocketAddr;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub struct ApiServer {
    config: AppConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: AppConfig, state: AppState) -> Self {
        Self { config, state }
    }

    pub fn router(&self) -> Router {
        let catalog_routes = Router::new()
            .route("/clients", post(routes::catalog::bulk_upsert_clients))
            .route("/clients/{id}", get(routes::catalog::get_client))
            .route("/advertisers", post(routes::catalog::bulk_upsert_advertisers))
            .route("/advertisers/{id}", get(routes::catalog::get_advertiser))
            .route("/ml-scores", post(routes::catalog::upsert_ml_score));

        let campaign_routes = Router::new()
            .route(
                "/advertisers/{advertiser_id}/campaigns",
                post(routes::campaigns::create_campaign).get(routes::campaigns::list_campaigns),
            )
            .route(
                "/campaigns/{id}",
                get(routes::campaigns::get_campaign)
                    .put(routes::campaigns::update_campaign)
                    .delete(routes::campaigns::delete_campaign),
            );

        let serving_routes = Router::new()
            .route("/clients/{client_id}/ad", get(routes::serving::get_ad))
            .route(
                "/campaigns/{campaign_id}/clicks/{client_id}",
                post(routes::serving::record_click),
            );

        let clock_routes = Router::new().route(
            "/clock",
            get(routes::clock::get_day).post(routes::clock::set_day),
        );

        let stats_routes = Router::new()
            .route("/campaigns/{id}/stats", get(routes::stats::campaign_totals))
            .route("/campaigns/{id}/stats/daily", get(routes::stats::campaign_daily))
            .route("/advertisers/{id}/stats", get(routes::stats::advertiser_totals))
            .route(
                "/advertisers/{id}/stats/daily",
                get(routes::stats::advertiser_daily),
            );

        let ops_routes = Router::new()
            .route("/health", get(routes::health::health_check))
            .route("/ready", get(routes::health::readiness));

        Router::new()
            .merge(catalog_routes)
            .merge(campaign_routes)
            .merge(serving_routes)
            .merge(clock_routes)
            .merge(stats_routes)
            .merge(ops_routes)
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    pub async fn serve(&self) -> anyhow::Result<()> {
        let addr = SocketAddr::new(self.host()?, self.port());
        info!(addr = %addr, "Starting HTTP server");
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await?;
        Ok(())
    }

    /// The configured bind address, for callers that drive their own
    /// listener/shutdown loop instead of calling [`ApiServer::serve`].
    pub fn host(&self) -> anyhow::Result<std::net::IpAddr> {
        Ok(self.config.api.host.parse()?)
    }

    pub fn port(&self) -> u16 {
        self.config.api.http_port
    }

    /// Starts the Prometheus metrics exporter on its own port.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
        let handle = builder
            .with_http_listener(SocketAddr::new(self.config.api.host.parse()?, self.config.metrics.port))
            .install_recorder()?;
        info!(port = self.config.metrics.port, "Metrics exporter started");
        std::mem::forget(handle);
        Ok(())
    }
}
