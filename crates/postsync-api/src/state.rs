use postsync_fetcher::PostsClient;
use postsync_store::{StoreConfig, Writer};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<PostsClient>,
    pub writer: Arc<Writer>,
}

impl AppState {
    pub fn new(posts_url: impl Into<String>, store_config: StoreConfig) -> Self {
        Self {
            fetcher: Arc::new(PostsClient::with_url(posts_url)),
            writer: Arc::new(Writer::new(store_config)),
        }
    }
}
