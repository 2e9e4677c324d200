//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Pluggable key-value backends (memory, files, LocalStorage)
//! - Temp-file-then-rename writes on native

pub mod envelope;
pub mod store;

pub use envelope::{Envelope, load_versioned, save_versioned};
#[cfg(target_arch = "wasm32")]
pub use store::LocalStore;
#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStore;
pub use store::MemoryStore;

use thiserror::Error;

/// Failures while reading or writing saved data
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("saved data is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save version {found} does not match expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },
    #[error("storage unavailable: {0}")]
    Storage(String),
}

/// String key-value storage
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}
