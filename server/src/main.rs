use std::{fs::OpenOptions, net::SocketAddr, sync::Arc};

use anyhow::Context;
use server::{
    config::{log_directives, Config, DEFAULT_LOG_FILTER},
    routes,
    server_state::ServerState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use volunteer_atlas_data_management::{
    sheets::{Credential, GoogleSheetsClient},
    DataManager,
};

const LOG_DIR: &str = "server/log";
const LOG_FILE: &str = "server/log/server.log";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` may carry RUST_LOG, so it has to be loaded before the subscriber.
    let _ = dotenv::dotenv();

    std::fs::create_dir_all(LOG_DIR).context("Failed to create log directory")?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)
        .context("Failed to open log file")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(log_directives(|name| dotenv::var(name).ok()))
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into())
        )
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file))
        .init();

    tracing::info!("Starting server...");

    let config = Config::from_env().context("Invalid configuration")?;

    // A bad credential is fatal, there is nothing to serve without the sheet.
    let credential = Credential::load().context("Failed to load sheet credential")?;
    let client = GoogleSheetsClient::new(config.sheet_key.clone(), credential)?;
    let data_manager = DataManager::new(client).with_jitter(config.jitter);

    let server_state = Arc::new(ServerState::new(data_manager, config.site.clone()));
    let app = routes::router(server_state, &config.assets_dir);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
    }
}
