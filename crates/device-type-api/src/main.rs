use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use device_type_api::{api, setup_app_state, setup_repository};
use infrastructure::{ServerConfig, StorageBackend};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding default.toml and <RUN_MODE>.toml
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// API Port (overrides api.port)
    #[arg(long)]
    port: Option<u16>,

    /// Storage backend: memory or database (overrides storage.backend)
    #[arg(long)]
    storage: Option<String>,

    /// Database URL (overrides storage.database_url)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let mut config = ServerConfig::load(&args.config_dir)?;
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if let Some(backend) = args.storage {
        config.storage.backend = backend.parse::<StorageBackend>()?;
    }
    if let Some(url) = args.database_url {
        config.storage.database_url = Some(url);
    }
    config.validate()?;

    // Initialize tracing, RUST_LOG wins over the configured filter
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🗂️ Device Type API Starting...");

    let repository = setup_repository(&config).await?;
    let state = setup_app_state(&config, repository)?;
    info!(
        role_header = %config.auth.role_header,
        backend = ?config.storage.backend,
        "✅ Service initialized"
    );

    let app = api::create_router(state);
    let addr = format!("{}:{}", config.api.host, config.api.port);
    info!("🚀 API Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Device Type API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
