pub mod config;
pub mod document;
pub mod error;
pub mod firestore;
pub mod memory;
pub mod store;
pub mod writer;

// Re-exports
pub use config::StoreConfig;
pub use document::{Document, FieldValue};
pub use error::{Error, Result};
pub use firestore::{Credentials, FirestoreSession};
pub use memory::MemoryStore;
pub use store::DocumentStore;
pub use writer::{write_records, Writer};
