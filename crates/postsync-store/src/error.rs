use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} environment variable not set")]
    MissingConfig(&'static str),

    #[error("Firestore connection failed: {0}")]
    Connection(String),

    #[error("Error saving record ID {id}: {source}")]
    Write {
        id: i64,
        #[source]
        source: Box<Error>,
    },

    #[error("Firestore API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Id of the record whose write failed, if this is a write failure.
    pub fn record_id(&self) -> Option<i64> {
        match self {
            Error::Write { id, .. } => Some(*id),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
