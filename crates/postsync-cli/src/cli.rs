use clap::{Parser, Subcommand, ValueEnum};
use postsync_api::{settings::DEFAULT_PORT, LogFormat};
use postsync_fetcher::DEFAULT_POSTS_URL;
use postsync_store::StoreConfig;

#[derive(Parser)]
#[command(name = "postsync")]
#[command(about = "PostSync - copy posts from the public API into Firestore", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Posts endpoint to fetch from
    #[arg(long, env = "POSTSYNC_POSTS_URL", default_value = DEFAULT_POSTS_URL)]
    pub posts_url: String,

    /// Firestore project id
    #[arg(long, env = "FIRESTORE_PROJECT")]
    pub project: Option<String>,

    /// Firestore emulator host:port
    #[arg(long, env = "FIRESTORE_EMULATOR_HOST")]
    pub emulator_host: Option<String>,

    /// OAuth access token for Firestore (metadata server is used otherwise)
    #[arg(long, env = "FIRESTORE_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Log output format
    #[arg(long, env = "POSTSYNC_LOG_FORMAT", value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP entry point
    Serve {
        /// Port to listen on
        #[arg(long, env = "POSTSYNC_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Fetch all posts and store them once
    Sync {
        /// Write into an in-memory store instead of Firestore
        #[arg(long)]
        dry_run: bool,
    },

    /// Fetch posts and print them as JSON
    Fetch {
        /// Print at most this many posts
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Read a stored post back from Firestore
    Get {
        /// Post id
        id: i64,
    },
}

impl Cli {
    /// Environment-derived store settings with command-line overrides applied.
    pub fn store_config(&self) -> StoreConfig {
        let mut config = StoreConfig::from_env();

        if let Some(project) = non_empty(&self.project) {
            config.project_id = Some(project);
        }
        if let Some(host) = non_empty(&self.emulator_host) {
            config.emulator_host = Some(host);
        }
        if let Some(token) = non_empty(&self.access_token) {
            config.access_token = Some(token);
        }

        config
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}
