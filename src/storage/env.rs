//! Read-only environment variable backend.

use super::backend::Backend;
use super::{StorageError, StorageResult};

/// Maps `api_url` to `<PREFIX>API_URL`. Environment variables are treated as
/// immutable at runtime.
#[derive(Debug, Clone, Default)]
pub struct EnvBackend {
    prefix: Option<String>,
}

impl EnvBackend {
    pub fn new() -> Self {
        Self { prefix: None }
    }

    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn env_key(&self, key: &str) -> String {
        let key = key.to_uppercase().replace('.', "_");
        match &self.prefix {
            Some(prefix) => format!("{prefix}{key}"),
            None => key,
        }
    }

    fn key_from_env(&self, env_name: &str) -> Option<String> {
        let rest = match &self.prefix {
            Some(prefix) => env_name.strip_prefix(prefix.as_str())?,
            None => env_name,
        };
        Some(rest.to_lowercase())
    }

    fn read_only(&self) -> StorageError {
        StorageError::ReadOnly {
            backend: self.name().to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Backend for EnvBackend {
    fn name(&self) -> &str {
        "env"
    }

    async fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
        match std::env::var(self.env_key(key)) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(StorageError::Env(e)),
        }
    }

    async fn set_raw(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(self.read_only())
    }

    async fn remove(&self, _key: &str) -> StorageResult<bool> {
        Err(self.read_only())
    }

    async fn keys(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let env_prefix = self.env_key(prefix);
        let mut keys: Vec<String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(&env_prefix))
            .filter_map(|(k, _)| self.key_from_env(&k))
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_key_conversion() {
        assert_eq!(EnvBackend::new().env_key("api_url"), "API_URL");
        assert_eq!(
            EnvBackend::prefixed("AI_TOOLS_HUB_").env_key("fuzzy_threshold"),
            "AI_TOOLS_HUB_FUZZY_THRESHOLD"
        );
        assert_eq!(
            EnvBackend::prefixed("AI_TOOLS_HUB_").key_from_env("AI_TOOLS_HUB_API_URL"),
            Some("api_url".to_string())
        );
        assert_eq!(EnvBackend::prefixed("X_").key_from_env("Y_API_URL"), None);
    }

    #[tokio::test]
    async fn test_env_backend_get() {
        let storage = EnvBackend::prefixed("HUB_STORAGE_TEST_");

        // SAFETY: test-only variable with a unique prefix
        unsafe { std::env::set_var("HUB_STORAGE_TEST_API_URL", "http://localhost:9") };
        assert_eq!(
            storage.get_raw("api_url").await.unwrap(),
            Some("http://localhost:9".to_string())
        );
        assert_eq!(storage.keys("api").await.unwrap(), ["api_url"]);
        unsafe { std::env::remove_var("HUB_STORAGE_TEST_API_URL") };
    }

    #[tokio::test]
    async fn test_env_backend_read_only() {
        let storage = EnvBackend::new();
        assert!(matches!(
            storage.set_raw("key", "value").await,
            Err(StorageError::ReadOnly { .. })
        ));
        assert!(storage.remove("key").await.is_err());
    }
}
