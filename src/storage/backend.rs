use serde::{Serialize, de::DeserializeOwned};

use super::{StorageError, StorageResult};

#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &str;

    async fn get_raw(&self, key: &str) -> StorageResult<Option<String>>;

    async fn set_raw(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a key, returning whether it existed
    async fn remove(&self, key: &str) -> StorageResult<bool>;

    /// Keys starting with `prefix`
    async fn keys(&self, prefix: &str) -> StorageResult<Vec<String>>;
}

/// Typed JSON access on top of the raw string API.
pub trait BackendExt: Backend {
    fn get<T: DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = StorageResult<Option<T>>> + Send
    where
        Self: Sync,
    {
        async move {
            match self.get_raw(key).await? {
                Some(raw) => serde_json::from_str(&raw)
                    .map(Some)
                    .map_err(|e| StorageError::InvalidValue {
                        key: key.to_string(),
                        message: e.to_string(),
                    }),
                None => Ok(None),
            }
        }
    }

    /// Like [`BackendExt::get`], but a value that fails to parse is logged
    /// and treated as absent.
    fn get_lenient<T: DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = StorageResult<Option<T>>> + Send
    where
        Self: Sync,
    {
        async move {
            match self.get::<T>(key).await {
                Err(StorageError::InvalidValue { key, message }) => {
                    tracing::warn!(key = %key, error = %message, backend = self.name(), "Ignoring malformed stored value");
                    Ok(None)
                }
                other => other,
            }
        }
    }

    fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
    ) -> impl std::future::Future<Output = StorageResult<()>> + Send
    where
        Self: Sync,
    {
        async move {
            let raw = serde_json::to_string(value)?;
            self.set_raw(key, &raw).await
        }
    }

    /// Read a `"true"`/`"false"` flag; anything else counts as false.
    fn flag(&self, key: &str) -> impl std::future::Future<Output = StorageResult<bool>> + Send
    where
        Self: Sync,
    {
        async move { Ok(self.get_raw(key).await?.is_some_and(|v| v.trim() == "true")) }
    }

    fn set_flag(
        &self,
        key: &str,
        value: bool,
    ) -> impl std::future::Future<Output = StorageResult<()>> + Send
    where
        Self: Sync,
    {
        async move { self.set_raw(key, if value { "true" } else { "false" }).await }
    }
}

impl<B: Backend + ?Sized> BackendExt for B {}
