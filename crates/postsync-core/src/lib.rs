pub mod record;

// Re-exports
pub use record::{Record, POSTS_COLLECTION};
