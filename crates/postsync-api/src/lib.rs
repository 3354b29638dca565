pub mod handlers;
pub mod routes;
pub mod settings;
pub mod state;
pub mod telemetry;

// Re-exports
pub use routes::create_router;
pub use settings::{LogFormat, Settings};
pub use state::AppState;

use anyhow::Result;

/// Bind `0.0.0.0:{port}` and serve the entry point until the process exits.
pub async fn serve(port: u16, state: AppState) -> Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("Server started on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
