use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use volunteer_atlas_data_management::{
    sheets::{Credential, GoogleSheetsClient},
    DataManager,
};

// CLI for checking the upstream sheet by hand: fetches both worksheets once and
// reports every row that would be left off the map.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let _ = dotenv::dotenv();
    let sheet_key = match std::env::args().nth(1) {
        Some(key) => key,
        None => dotenv::var("VOLUNTEER_ATLAS_SHEET_KEY").context("Pass a sheet key or set VOLUNTEER_ATLAS_SHEET_KEY")?,
    };

    let credential = Credential::load()?;
    let data_manager = DataManager::new(GoogleSheetsClient::new(sheet_key, credential)?);
    let atlas = data_manager.fetch_atlas().await?;

    let unplaced_volunteers = atlas.volunteers.records.iter().filter(|v| v.location.position.is_none()).count();
    let unplaced_requests = atlas.requests.records.iter().filter(|r| r.location.position.is_none()).count();
    let ineligible = atlas.volunteers.records.iter().filter(|v| !v.is_eligible()).count();

    tracing::info!("Volunteers: {} read, {} without coordinates, {} not healthy/available", atlas.volunteers.records.len(), unplaced_volunteers, ineligible);
    tracing::info!("Requests: {} read, {} without coordinates", atlas.requests.records.len(), unplaced_requests);

    for err in atlas.volunteers.rejected.iter().chain(atlas.requests.rejected.iter()) {
        tracing::warn!("{err}");
    }

    Ok(())
}
