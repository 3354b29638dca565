pub mod client;
pub mod error;

// Re-exports
pub use client::{PostsClient, DEFAULT_POSTS_URL};
pub use error::{FetchError, Result};
