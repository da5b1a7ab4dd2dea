//! Typed access to the login, profile and preference keys.

use std::collections::BTreeMap;
use std::sync::Arc;

use secrecy::SecretString;

use super::keys;
use super::{AdminPolicy, UserProfile};
use crate::menu::AccountMenuItem;
use crate::storage::{Backend, BackendExt};
use crate::{Error, Result};

/// Data written on login.
#[derive(Debug, Clone)]
pub struct LoginInfo {
    pub username: String,
    pub email: Option<String>,
    pub token: Option<SecretString>,
    pub is_admin: bool,
}

impl LoginInfo {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: None,
            token: None,
            is_admin: false,
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    pub fn admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: String,
    pub email: Option<String>,
    /// Raw `isAdmin` flag; see [`SessionStore::is_admin`] for the full check.
    pub admin_flag: bool,
}

#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn Backend>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub async fn login(&self, info: &LoginInfo) -> Result<()> {
        use secrecy::ExposeSecret;

        let username = info.username.trim();
        if username.is_empty() {
            return Err(Error::InvalidRequest("username must not be empty".into()));
        }

        let storage = self.backend();
        storage.set_raw(keys::USERNAME, username).await?;
        match &info.email {
            Some(email) => storage.set_raw(keys::USER_EMAIL, email.trim()).await?,
            None => {
                storage.remove(keys::USER_EMAIL).await?;
            }
        }
        match &info.token {
            Some(token) => storage.set_raw(keys::TOKEN, token.expose_secret()).await?,
            None => {
                storage.remove(keys::TOKEN).await?;
            }
        }
        storage.set_flag(keys::IS_ADMIN, info.is_admin).await?;
        storage.set_flag(keys::IS_LOGGED_IN, true).await?;

        tracing::info!(username, "User logged in");
        Ok(())
    }

    /// Clears every login-owned key. Preferences and favorites survive.
    pub async fn logout(&self) -> Result<()> {
        for key in keys::LOGIN_KEYS {
            self.backend().remove(key).await?;
        }
        tracing::info!("User logged out");
        Ok(())
    }

    pub async fn is_logged_in(&self) -> Result<bool> {
        Ok(self.current_user().await?.is_some())
    }

    pub async fn current_user(&self) -> Result<Option<CurrentUser>> {
        let storage = self.backend();
        if !storage.flag(keys::IS_LOGGED_IN).await? {
            return Ok(None);
        }
        let Some(username) = storage
            .get_raw(keys::USERNAME)
            .await?
            .filter(|u| !u.trim().is_empty())
        else {
            return Ok(None);
        };

        Ok(Some(CurrentUser {
            username,
            email: storage.get_raw(keys::USER_EMAIL).await?,
            admin_flag: storage.flag(keys::IS_ADMIN).await?,
        }))
    }

    pub(crate) async fn require_user(&self) -> Result<CurrentUser> {
        self.current_user().await?.ok_or(Error::NotLoggedIn)
    }

    pub async fn token(&self) -> Result<Option<SecretString>> {
        Ok(self.backend().get_raw(keys::TOKEN).await?.map(SecretString::from))
    }

    pub async fn is_admin(&self, policy: &AdminPolicy) -> Result<bool> {
        Ok(self
            .current_user()
            .await?
            .is_some_and(|u| policy.is_admin(u.admin_flag, u.email.as_deref())))
    }

    /// Stored profile; absent or malformed JSON yields the default profile.
    pub async fn profile(&self) -> Result<UserProfile> {
        Ok(self
            .backend()
            .get_lenient::<UserProfile>(keys::USER_PROFILE)
            .await?
            .unwrap_or_default())
    }

    pub async fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.backend().set(keys::USER_PROFILE, profile).await?;
        Ok(())
    }

    pub async fn update_profile(&self, update: impl FnOnce(&mut UserProfile)) -> Result<UserProfile> {
        let mut profile = self.profile().await?;
        update(&mut profile);
        self.save_profile(&profile).await?;
        Ok(profile)
    }

    pub async fn preference(&self, name: &str) -> Result<Option<String>> {
        Ok(self.backend().get_raw(&keys::preference(name)).await?)
    }

    pub async fn set_preference(&self, name: &str, value: &str) -> Result<()> {
        self.backend().set_raw(&keys::preference(name), value).await?;
        Ok(())
    }

    pub async fn remove_preference(&self, name: &str) -> Result<bool> {
        Ok(self.backend().remove(&keys::preference(name)).await?)
    }

    /// All preferences keyed by name without the `pref_` prefix.
    pub async fn preferences(&self) -> Result<BTreeMap<String, String>> {
        let storage = self.backend();
        let mut prefs = BTreeMap::new();
        for key in storage.keys(keys::PREFERENCE_PREFIX).await? {
            if let Some(value) = storage.get_raw(&key).await? {
                let name = key[keys::PREFERENCE_PREFIX.len()..].to_string();
                prefs.insert(name, value);
            }
        }
        Ok(prefs)
    }

    pub async fn sidebar_open(&self) -> Result<bool> {
        Ok(self.backend().flag(keys::SIDEBAR_OPEN).await?)
    }

    pub async fn set_sidebar_open(&self, open: bool) -> Result<()> {
        self.backend().set_flag(keys::SIDEBAR_OPEN, open).await?;
        Ok(())
    }

    pub async fn newsletter_popup_seen(&self) -> Result<bool> {
        Ok(self.backend().flag(keys::NEWSLETTER_POPUP_SEEN).await?)
    }

    pub async fn mark_newsletter_popup_seen(&self) -> Result<()> {
        self.backend().set_flag(keys::NEWSLETTER_POPUP_SEEN, true).await?;
        Ok(())
    }

    /// Last activated account menu item; unknown values are ignored.
    pub async fn account_last_item(&self) -> Result<Option<AccountMenuItem>> {
        Ok(self
            .backend()
            .get_raw(keys::ACCOUNT_LAST_ITEM)
            .await?
            .and_then(|raw| raw.parse().ok()))
    }

    pub async fn set_account_last_item(&self, item: AccountMenuItem) -> Result<()> {
        self.backend()
            .set_raw(keys::ACCOUNT_LAST_ITEM, item.as_str())
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("backend", &self.backend.name())
            .finish()
    }
}
