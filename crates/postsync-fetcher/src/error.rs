use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Error fetching data: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(StatusCode),

    #[error("Error decoding response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FetchError>;
