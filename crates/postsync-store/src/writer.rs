use crate::{
    config::StoreConfig,
    firestore::FirestoreSession,
    store::DocumentStore,
    Error, Result,
};
use postsync_core::{Record, POSTS_COLLECTION};

/// Persists fetched records into the `posts` collection.
#[derive(Debug, Clone)]
pub struct Writer {
    config: StoreConfig,
}

impl Writer {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Upsert every record, in order, through a session opened for this call.
    ///
    /// Stops at the first failed write. Records before it stay written.
    pub async fn save(&self, records: &[Record]) -> Result<()> {
        // Fail on missing configuration before touching the network.
        self.config.project_id()?;

        let session = FirestoreSession::open(&self.config).await?;

        if let Some(host) = &self.config.emulator_host {
            tracing::info!("Using Firestore emulator at {}", host);
        }

        write_records(&session, records).await
    }
}

/// Write each record under its id, stopping at the first failure.
pub async fn write_records<S>(store: &S, records: &[Record]) -> Result<()>
where
    S: DocumentStore + ?Sized,
{
    for record in records {
        store
            .set(POSTS_COLLECTION, &record.document_key(), record)
            .await
            .map_err(|e| Error::Write {
                id: record.id,
                source: Box::new(e),
            })?;
    }

    tracing::debug!("Stored {} records in {}", records.len(), POSTS_COLLECTION);

    Ok(())
}
