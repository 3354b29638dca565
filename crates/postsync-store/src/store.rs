use crate::Result;
use async_trait::async_trait;
use postsync_core::Record;

/// Key-addressed document storage with point upserts.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Replace (or create) the document `key` in `collection` with `record`.
    async fn set(&self, collection: &str, key: &str, record: &Record) -> Result<()>;

    /// Read back the document `key`, `None` when it does not exist.
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Record>>;
}
