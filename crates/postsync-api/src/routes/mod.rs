use axum::{routing::any, Router};
use tower_http::trace::TraceLayer;

use crate::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Single entry point, any method
        .route("/", any(handlers::sync::process_posts))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
