use anyhow::{Context, Result};

use crate::cli::Commands;
use postsync_api::{handlers::sync::SUCCESS_MESSAGE, AppState};
use postsync_core::POSTS_COLLECTION;
use postsync_fetcher::PostsClient;
use postsync_store::{
    write_records, DocumentStore, FirestoreSession, MemoryStore, StoreConfig, Writer,
};

pub async fn execute(command: Commands, posts_url: String, store_config: StoreConfig) -> Result<()> {
    match command {
        Commands::Serve { port } => {
            let state = AppState::new(posts_url, store_config);
            postsync_api::serve(port, state).await?;
        }

        Commands::Sync { dry_run } => {
            println!("Fetching posts from {}...", posts_url);
            let records = PostsClient::with_url(posts_url)
                .fetch()
                .await
                .context("Failed to fetch data")?;
            println!("✓ Fetched {} posts", records.len());

            if dry_run {
                let store = MemoryStore::new();
                write_records(&store, &records).await?;
                println!(
                    "Dry run: {} documents would be written to `{}`",
                    store.len().await,
                    POSTS_COLLECTION
                );
            } else {
                Writer::new(store_config)
                    .save(&records)
                    .await
                    .context("Failed to save data")?;
                println!("✓ {}", SUCCESS_MESSAGE);
            }
        }

        Commands::Fetch { limit } => {
            let mut records = PostsClient::with_url(posts_url)
                .fetch()
                .await
                .context("Failed to fetch data")?;

            if let Some(limit) = limit {
                records.truncate(limit);
            }

            println!("{}", serde_json::to_string_pretty(&records)?);
        }

        Commands::Get { id } => {
            let session = FirestoreSession::open(&store_config).await?;

            let record = session
                .get(POSTS_COLLECTION, &id.to_string())
                .await?
                .ok_or_else(|| anyhow::anyhow!("Post {} not found", id))?;

            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(())
}
