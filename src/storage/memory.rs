//! In-memory backend, useful for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::StorageResult;
use super::backend::Backend;

#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    data: Arc<RwLock<HashMap<String, String>>>,
    name: String,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::named("memory")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
            name: name.into(),
        }
    }

    pub fn from_data(data: HashMap<String, String>) -> Self {
        Self {
            data: Arc::new(RwLock::new(data)),
            name: "memory".to_string(),
        }
    }

    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.data.write().await.clear();
    }

    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.data.read().await.clone()
    }
}

#[async_trait::async_trait]
impl Backend for MemoryBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn set_raw(&self, key: &str, value: &str) -> StorageResult<()> {
        self.data
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<bool> {
        Ok(self.data.write().await.remove(key).is_some())
    }

    async fn keys(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let data = self.data.read().await;
        let mut keys: Vec<String> = data
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_basic() {
        let storage = MemoryBackend::new();

        storage.set_raw("username", "ada").await.unwrap();
        assert_eq!(storage.get_raw("username").await.unwrap(), Some("ada".to_string()));
        assert_eq!(storage.get_raw("missing").await.unwrap(), None);

        // Last write wins.
        storage.set_raw("username", "grace").await.unwrap();
        assert_eq!(storage.get_raw("username").await.unwrap(), Some("grace".to_string()));
    }

    #[tokio::test]
    async fn test_memory_backend_remove() {
        let storage = MemoryBackend::new();
        storage.set_raw("token", "abc").await.unwrap();
        assert!(storage.remove("token").await.unwrap());
        assert!(!storage.remove("token").await.unwrap());
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_memory_backend_keys_sorted() {
        let storage = MemoryBackend::new();
        storage.set_raw("pref_theme", "dark").await.unwrap();
        storage.set_raw("pref_density", "compact").await.unwrap();
        storage.set_raw("username", "ada").await.unwrap();

        let keys = storage.keys("pref_").await.unwrap();
        assert_eq!(keys, ["pref_density", "pref_theme"]);
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let storage = MemoryBackend::new();
        let other = storage.clone();
        other.set_raw("isLoggedIn", "true").await.unwrap();
        assert_eq!(storage.len().await, 1);
    }
}
