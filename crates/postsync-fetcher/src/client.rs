use crate::{FetchError, Result};
use postsync_core::Record;
use reqwest::{Client, StatusCode};

/// Upstream source of posts.
pub const DEFAULT_POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Fetches the full list of posts with a single GET.
#[derive(Clone)]
pub struct PostsClient {
    client: Client,
    url: String,
}

impl PostsClient {
    pub fn new() -> Self {
        Self::with_url(DEFAULT_POSTS_URL)
    }

    /// Point the client at a different posts endpoint (mirrors, local mocks).
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch every post.
    ///
    /// Anything other than `200 OK` is an error, as is a body that is not a
    /// JSON array of post objects. No retries.
    pub async fn fetch(&self) -> Result<Vec<Record>> {
        tracing::debug!("Fetching posts from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::UnexpectedStatus(status));
        }

        let bytes = response.bytes().await?;
        let records: Vec<Record> = serde_json::from_slice(&bytes)?;

        tracing::debug!("Fetched {} posts", records.len());

        Ok(records)
    }
}

impl Default for PostsClient {
    fn default() -> Self {
        Self::new()
    }
}
