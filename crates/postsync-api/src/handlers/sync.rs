use axum::{extract::State, http::StatusCode};
use uuid::Uuid;

use crate::state::AppState;

pub const SUCCESS_MESSAGE: &str = "Data successfully processed and stored!";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save data";

/// Fetch all posts and store them.
///
/// Failures are logged in full here; the caller only sees a generic 500.
#[tracing::instrument(name = "process_posts", skip_all, fields(invocation_id = %Uuid::new_v4()))]
pub async fn process_posts(State(state): State<AppState>) -> (StatusCode, &'static str) {
    let records = match state.fetcher.fetch().await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Error fetching data: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED_MESSAGE);
        }
    };

    tracing::info!("Fetched {} records", records.len());

    if let Err(e) = state.writer.save(&records).await {
        tracing::error!("Error saving data: {}", e);
        return (StatusCode::INTERNAL_SERVER_ERROR, SAVE_FAILED_MESSAGE);
    }

    tracing::info!("Stored {} records", records.len());

    (StatusCode::OK, SUCCESS_MESSAGE)
}
