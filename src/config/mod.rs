//! Layered configuration.
//!
//! ```rust,no_run
//! use ai_tools_hub::config::{ConfigBuilder, HubSettings};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = ConfigBuilder::new()
//!     .env()
//!     .file("hub.json")
//!     .build();
//! let settings = HubSettings::load(&backend).await?;
//! println!("API at {}", settings.api_url);
//! # Ok(())
//! # }
//! ```

mod settings;

pub use settings::{
    DEFAULT_ADMIN_EMAILS, DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT, ENV_PREFIX, HubSettings, keys,
};

use thiserror::Error;

use crate::storage::{Backend, EnvBackend, FileBackend, LayeredBackend, MemoryBackend, StorageError};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Fluent construction of a [`LayeredBackend`] holding settings.
pub struct ConfigBuilder {
    layers: Vec<Box<dyn Backend>>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Environment variables with the [`ENV_PREFIX`] prefix.
    pub fn env(self) -> Self {
        self.env_with_prefix(ENV_PREFIX)
    }

    pub fn env_with_prefix(mut self, prefix: &str) -> Self {
        self.layers.push(Box::new(EnvBackend::prefixed(prefix)));
        self
    }

    pub fn file(mut self, path: impl AsRef<std::path::Path>) -> Self {
        self.layers
            .push(Box::new(FileBackend::new(path.as_ref().to_path_buf())));
        self
    }

    pub fn memory(mut self, backend: MemoryBackend) -> Self {
        self.layers.push(Box::new(backend));
        self
    }

    pub fn layer(mut self, backend: Box<dyn Backend>) -> Self {
        self.layers.push(backend);
        self
    }

    pub fn build(self) -> LayeredBackend {
        let mut layered = LayeredBackend::new();
        for layer in self.layers {
            layered.push(layer);
        }
        layered
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
