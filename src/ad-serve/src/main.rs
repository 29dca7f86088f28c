//! ad-serve — binary entry point for the ad-serving engine.
//!
//! Loads configuration, wires the catalog/event-log/serving/reporting
//! crates behind the `campaign-api` transport, and serves HTTP until
//! shutdown.

use campaign_api::{AppState, ApiServer};
use campaign_core::config::AppConfig;
use clap::Parser;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "ad-serve")]
#[command(about = "Ad-serving engine: selection, impression/click recording, and reporting")]
#[command(version)]
struct Cli {
    /// Node identifier (overrides config)
    #[arg(long, env = "ADSERVE__NODE_ID")]
    node_id: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "ADSERVE__API__HTTP_PORT")]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ad_serve=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("ad-serve starting up");

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "failed to load config, using defaults");
        AppConfig::default()
    });

    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }

    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        "configuration loaded"
    );

    let state = AppState::new(config.node_id.clone());
    let server = ApiServer::new(config, state);

    if let Err(e) = server.start_metrics().await {
        error!(error = %e, "failed to start metrics exporter");
    }

    let shutdown = async {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            let mut sigterm =
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                    .expect("failed to register SIGTERM handler");
            tokio::select! {
                _ = ctrl_c => info!("received SIGINT, shutting down"),
                _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
            }
        }

        #[cfg(not(unix))]
        {
            ctrl_c.await.ok();
            info!("received SIGINT, shutting down");
        }
    };

    info!("ad-serve is ready to serve traffic");

    let addr = std::net::SocketAddr::new(server.host()?, server.port());
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "starting HTTP server");
    axum::serve(listener, server.router())
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("ad-serve shut down cleanly");
    Ok(())
}
