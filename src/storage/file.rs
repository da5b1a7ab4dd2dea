//! JSON-file backend: one flat object of string values, rewritten on every
//! mutation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use super::StorageResult;
use super::backend::Backend;

type Entries = BTreeMap<String, serde_json::Value>;

pub struct FileBackend {
    path: PathBuf,
    data: Arc<RwLock<Option<Entries>>>,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: Arc::new(RwLock::new(None)),
        }
    }

    /// Backend stored under the platform data directory, if one exists.
    pub fn in_data_dir(file_name: &str) -> Option<Self> {
        directories::ProjectDirs::from("", "", "ai-tools-hub")
            .map(|dirs| Self::new(dirs.data_dir().join(file_name)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StorageResult<Entries> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(Entries::new());
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    async fn save(&self, data: &Entries) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(data)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }

    /// Drop the cached contents so the next access re-reads the file.
    pub async fn reload(&self) -> StorageResult<()> {
        let fresh = self.load().await?;
        *self.data.write().await = Some(fresh);
        Ok(())
    }

    async fn with_entries<R>(&self, f: impl FnOnce(&Entries) -> R) -> StorageResult<R> {
        {
            let data = self.data.read().await;
            if let Some(entries) = data.as_ref() {
                return Ok(f(entries));
            }
        }
        let mut data = self.data.write().await;
        if data.is_none() {
            *data = Some(self.load().await?);
        }
        Ok(f(data.get_or_insert_with(Entries::new)))
    }

    async fn mutate<R>(&self, f: impl FnOnce(&mut Entries) -> (R, bool)) -> StorageResult<R> {
        let mut data = self.data.write().await;
        if data.is_none() {
            *data = Some(self.load().await?);
        }
        let mut next = data.clone().unwrap_or_default();
        let (result, changed) = f(&mut next);
        if changed {
            // The cache only moves once the file has been written.
            self.save(&next).await?;
            *data = Some(next);
        }
        Ok(result)
    }
}

#[async_trait::async_trait]
impl Backend for FileBackend {
    fn name(&self) -> &str {
        "file"
    }

    async fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
        self.with_entries(|entries| match entries.get(key) {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        })
        .await
    }

    async fn set_raw(&self, key: &str, value: &str) -> StorageResult<()> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), serde_json::Value::String(value.to_string()));
            ((), true)
        })
        .await
    }

    async fn remove(&self, key: &str) -> StorageResult<bool> {
        self.mutate(|entries| {
            let existed = entries.remove(key).is_some();
            (existed, existed)
        })
        .await
    }

    async fn keys(&self, prefix: &str) -> StorageResult<Vec<String>> {
        self.with_entries(|entries| {
            entries
                .keys()
                .filter(|k| k.starts_with(prefix))
                .cloned()
                .collect()
        })
        .await
    }
}

impl std::fmt::Debug for FileBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileBackend")
            .field("path", &self.path)
            .finish()
    }
}
