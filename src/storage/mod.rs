//! Key/value backends standing in for browser local storage.
//!
//! Values are strings, writes are last-write-wins and there are no
//! cross-key transactions. The same backends feed [`crate::config`].
//!
//! ```rust,no_run
//! use ai_tools_hub::storage::{Backend, FileBackend};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = FileBackend::new("./hub-storage.json");
//! storage.set_raw("sidebarOpen", "true").await?;
//! assert_eq!(storage.get_raw("sidebarOpen").await?.as_deref(), Some("true"));
//! # Ok(())
//! # }
//! ```

mod backend;
mod env;
mod file;
mod layered;
mod memory;

pub use backend::{Backend, BackendExt};
pub use env::EnvBackend;
pub use file::FileBackend;
pub use layered::LayeredBackend;
pub use memory::MemoryBackend;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),

    #[error("Backend '{backend}' is read-only")]
    ReadOnly { backend: String },
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
