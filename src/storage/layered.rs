//! Chains backends by priority. Earlier layers win on read.

use std::collections::BTreeSet;

use super::backend::Backend;
use super::{StorageError, StorageResult};

#[derive(Default)]
pub struct LayeredBackend {
    layers: Vec<Box<dyn Backend>>,
}

impl LayeredBackend {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Append a layer (first added = highest priority).
    pub fn push(&mut self, layer: Box<dyn Backend>) {
        self.layers.push(layer);
    }

    pub fn layer(mut self, layer: Box<dyn Backend>) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name()).collect()
    }
}

#[async_trait::async_trait]
impl Backend for LayeredBackend {
    fn name(&self) -> &str {
        "layered"
    }

    async fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
        for layer in &self.layers {
            if let Some(value) = layer.get_raw(key).await? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Writes go to the first layer that accepts them.
    async fn set_raw(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut last_err = None;
        for layer in &self.layers {
            match layer.set_raw(key, value).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::debug!(layer = layer.name(), key, error = %e, "Layer rejected write");
                    last_err = Some(e);
                }
            }
        }
        match last_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Removes from every writable layer holding the key.
    async fn remove(&self, key: &str) -> StorageResult<bool> {
        let mut removed = false;
        for layer in &self.layers {
            match layer.remove(key).await {
                Ok(existed) => removed |= existed,
                Err(StorageError::ReadOnly { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(removed)
    }

    async fn keys(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let mut all = BTreeSet::new();
        for layer in &self.layers {
            all.extend(layer.keys(prefix).await?);
        }
        Ok(all.into_iter().collect())
    }
}

impl std::fmt::Debug for LayeredBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredBackend")
            .field("layers", &self.layer_names())
            .finish()
    }
}
