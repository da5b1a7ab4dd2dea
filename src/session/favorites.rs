//! Per-user favorite tools, stored as a JSON array under
//! `favorites_<username>`.

use std::collections::BTreeSet;

use super::{SessionStore, keys};
use crate::Result;
use crate::catalog::ToolId;
use crate::storage::BackendExt;

impl SessionStore {
    /// Favorites of the logged-in user; empty when logged out.
    pub async fn favorites(&self) -> Result<BTreeSet<ToolId>> {
        match self.current_user().await? {
            Some(user) => self.load_favorites(&user.username).await,
            None => Ok(BTreeSet::new()),
        }
    }

    pub async fn is_favorite(&self, id: &ToolId) -> Result<bool> {
        Ok(self.favorites().await?.contains(id))
    }

    /// Add the tool if absent, remove it if present. Returns whether the
    /// tool is a favorite afterwards.
    pub async fn toggle_favorite(&self, id: &ToolId) -> Result<bool> {
        let user = self.require_user().await?;
        let mut favorites = self.load_favorites(&user.username).await?;

        let added = if favorites.remove(id) {
            false
        } else {
            favorites.insert(id.clone());
            true
        };
        self.backend()
            .set(&keys::favorites(&user.username), &favorites)
            .await?;

        tracing::debug!(user = %user.username, tool = %id, added, "Favorite toggled");
        Ok(added)
    }

    pub async fn clear_favorites(&self) -> Result<()> {
        let user = self.require_user().await?;
        self.backend().remove(&keys::favorites(&user.username)).await?;
        Ok(())
    }

    async fn load_favorites(&self, username: &str) -> Result<BTreeSet<ToolId>> {
        Ok(self
            .backend()
            .get_lenient::<BTreeSet<ToolId>>(&keys::favorites(username))
            .await?
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::Error;
    use crate::catalog::ToolId;
    use crate::session::{LoginInfo, SessionStore};
    use crate::storage::{Backend, MemoryBackend};

    async fn logged_in(name: &str, memory: &MemoryBackend) -> SessionStore {
        let session = SessionStore::new(Arc::new(memory.clone()));
        session.login(&LoginInfo::new(name)).await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_toggle_twice_restores() {
        let memory = MemoryBackend::new();
        let session = logged_in("ada", &memory).await;
        let claude = ToolId::new("claude");
        session.toggle_favorite(&ToolId::new("whisper")).await.unwrap();
        let before = session.favorites().await.unwrap();

        assert!(session.toggle_favorite(&claude).await.unwrap());
        assert!(session.is_favorite(&claude).await.unwrap());
        assert!(!session.toggle_favorite(&claude).await.unwrap());
        assert_eq!(session.favorites().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_favorites_are_per_user() {
        let memory = MemoryBackend::new();
        let session = logged_in("ada", &memory).await;
        session.toggle_favorite(&ToolId::new("tabby")).await.unwrap();

        let session = logged_in("grace", &memory).await;
        assert!(session.favorites().await.unwrap().is_empty());

        let session = logged_in("ada", &memory).await;
        assert_eq!(session.favorites().await.unwrap().len(), 1);
        assert_eq!(
            memory.get_raw("favorites_ada").await.unwrap().as_deref(),
            Some(r#"["tabby"]"#)
        );
    }

    #[tokio::test]
    async fn test_anonymous_cannot_favorite() {
        let session = SessionStore::new(Arc::new(MemoryBackend::new()));
        assert!(session.favorites().await.unwrap().is_empty());
        let err = session.toggle_favorite(&ToolId::new("x")).await.unwrap_err();
        assert!(matches!(err, Error::NotLoggedIn));
    }

    #[tokio::test]
    async fn test_malformed_favorites_reset() {
        let memory = MemoryBackend::new();
        let session = logged_in("ada", &memory).await;
        memory.set_raw("favorites_ada", "not-json").await.unwrap();
        assert!(session.favorites().await.unwrap().is_empty());
        assert!(session.toggle_favorite(&ToolId::new("x")).await.unwrap());

        session.clear_favorites().await.unwrap();
        assert!(session.favorites().await.unwrap().is_empty());
    }
}
