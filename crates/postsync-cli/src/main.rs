use anyhow::Result;
use clap::Parser;
use postsync_api::telemetry;

mod cli;
mod commands;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    telemetry::init_tracing("postsync=info,postsync_store=info", cli.log_format.into());

    let store_config = cli.store_config();
    commands::execute(cli.command, cli.posts_url, store_config).await
}
