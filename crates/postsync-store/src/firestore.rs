use crate::{
    config::StoreConfig,
    document::Document,
    store::DocumentStore,
    Error, Result,
};
use async_trait::async_trait;
use postsync_core::Record;
use reqwest::{header::AUTHORIZATION, Client, Response, StatusCode};
use serde::Deserialize;

const METADATA_TOKEN_PATH: &str =
    "/computeMetadata/v1/instance/service-accounts/default/token";

/// The emulator accepts this token as an admin caller that bypasses rules.
const EMULATOR_TOKEN: &str = "owner";

/// How a session authenticates against Firestore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Emulator,
    AccessToken(String),
    /// Ask the GCE metadata server for the runtime service account's token.
    MetadataServer { host: String },
}

impl Credentials {
    pub fn from_config(config: &StoreConfig) -> Self {
        if config.emulator_host.is_some() {
            Credentials::Emulator
        } else if let Some(token) = &config.access_token {
            Credentials::AccessToken(token.clone())
        } else {
            Credentials::MetadataServer {
                host: config.metadata_host().to_string(),
            }
        }
    }

    async fn resolve(&self, client: &Client) -> Result<String> {
        match self {
            Credentials::Emulator => Ok(EMULATOR_TOKEN.to_string()),
            Credentials::AccessToken(token) => Ok(token.clone()),
            Credentials::MetadataServer { host } => {
                let url = format!("http://{}{}", host, METADATA_TOKEN_PATH);
                let response = client
                    .get(&url)
                    .header("Metadata-Flavor", "Google")
                    .send()
                    .await
                    .map_err(|e| Error::Connection(format!("metadata server unreachable: {}", e)))?;

                if !response.status().is_success() {
                    return Err(Error::Connection(format!(
                        "metadata server returned {}",
                        response.status()
                    )));
                }

                let token: MetadataToken = response
                    .json()
                    .await
                    .map_err(|e| Error::Connection(format!("invalid metadata token: {}", e)))?;

                Ok(token.access_token)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
}

/// A Firestore connection scoped to one unit of work.
///
/// Opening resolves credentials once; dropping the session releases its HTTP
/// connections, whether the work finished or bailed out halfway.
pub struct FirestoreSession {
    client: Client,
    base_url: String,
    database: String,
    bearer: String,
}

impl FirestoreSession {
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let project_id = config.project_id()?;

        let client = Client::builder()
            .build()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let bearer = Credentials::from_config(config).resolve(&client).await?;
        let database = format!("projects/{}/databases/(default)", project_id);

        tracing::debug!("Opened Firestore session for {}", database);

        Ok(Self {
            client,
            base_url: config.base_url(),
            database,
            bearer,
        })
    }

    /// Resource name of a document, relative to the API root.
    pub fn document_name(&self, collection: &str, key: &str) -> String {
        format!("{}/documents/{}/{}", self.database, collection, key)
    }

    fn document_url(&self, collection: &str, key: &str) -> String {
        format!("{}/{}", self.base_url, self.document_name(collection, key))
    }

    async fn api_error(response: Response) -> Error {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Error::Api { status, message }
    }
}

#[async_trait]
impl DocumentStore for FirestoreSession {
    async fn set(&self, collection: &str, key: &str, record: &Record) -> Result<()> {
        // PATCH without an update mask overwrites the whole document and
        // creates it when missing.
        let response = self
            .client
            .patch(self.document_url(collection, key))
            .header(AUTHORIZATION, format!("Bearer {}", self.bearer))
            .json(&Document::from(record))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Ok(())
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Record>> {
        let response = self
            .client
            .get(self.document_url(collection, key))
            .header(AUTHORIZATION, format!("Bearer {}", self.bearer))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let document: Document = response.json().await?;
        Ok(Some(Record::try_from(document)?))
    }
}

impl Drop for FirestoreSession {
    fn drop(&mut self) {
        tracing::debug!("Closing Firestore session for {}", self.database);
    }
}
