use anyhow::Result;
use postsync_api::{telemetry, AppState, Settings};
use postsync_store::StoreConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let settings = Settings::load()?;

    // Initialize tracing
    telemetry::init_tracing(
        "postsync_api=debug,postsync_store=debug,tower_http=debug",
        settings.log_format,
    );

    let store_config = StoreConfig::from_env();
    if store_config.project_id.is_none() {
        tracing::warn!("FIRESTORE_PROJECT is not set, every request will fail to save");
    }

    let state = AppState::new(settings.posts_url, store_config);

    postsync_api::serve(settings.port, state).await
}
