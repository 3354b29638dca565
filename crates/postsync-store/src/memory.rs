use crate::{store::DocumentStore, Result};
use async_trait::async_trait;
use postsync_core::Record;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process [`DocumentStore`], used for dry runs and tests.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<(String, String), Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn set(&self, collection: &str, key: &str, record: &Record) -> Result<()> {
        self.documents
            .write()
            .await
            .insert((collection.to_string(), key.to_string()), record.clone());
        Ok(())
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Record>> {
        Ok(self
            .documents
            .read()
            .await
            .get(&(collection.to_string(), key.to_string()))
            .cloned())
    }
}
