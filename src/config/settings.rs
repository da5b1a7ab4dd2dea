//! Typed hub settings resolved from a backend.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use super::{ConfigError, ConfigResult};
use crate::discovery::{DEFAULT_SUGGESTION_LIMIT, DEFAULT_THRESHOLD};
use crate::storage::Backend;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const ENV_PREFIX: &str = "AI_TOOLS_HUB_";

/// Emails granted admin rights regardless of the stored `isAdmin` flag.
pub const DEFAULT_ADMIN_EMAILS: &[&str] = &["admin@aitoolshub.com"];

pub mod keys {
    pub const API_URL: &str = "api_url";
    pub const REQUEST_TIMEOUT_SECS: &str = "request_timeout_secs";
    pub const FUZZY_THRESHOLD: &str = "fuzzy_threshold";
    pub const SUGGESTION_LIMIT: &str = "suggestion_limit";
    pub const ADMIN_EMAILS: &str = "admin_emails";
    pub const STORAGE_PATH: &str = "storage_path";
    pub const CATALOG_PATH: &str = "catalog_path";
}

#[derive(Debug, Clone, PartialEq)]
pub struct HubSettings {
    pub api_url: Url,
    pub request_timeout: Duration,
    pub fuzzy_threshold: f64,
    pub suggestion_limit: usize,
    pub admin_emails: Vec<String>,
    pub storage_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            fuzzy_threshold: DEFAULT_THRESHOLD,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            admin_emails: DEFAULT_ADMIN_EMAILS.iter().map(|s| s.to_string()).collect(),
            storage_path: None,
            catalog_path: None,
        }
    }
}

fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("DEFAULT_API_URL is a valid URL")
}

impl HubSettings {
    /// Resolve settings, falling back to defaults for absent keys.
    pub async fn load(backend: &dyn Backend) -> ConfigResult<Self> {
        let mut settings = Self::default();

        if let Some(raw) = backend.get_raw(keys::API_URL).await? {
            settings.api_url = parse_api_url(&raw)?;
        }
        if let Some(raw) = backend.get_raw(keys::REQUEST_TIMEOUT_SECS).await? {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(keys::REQUEST_TIMEOUT_SECS, format!("not a number: {raw}")))?;
            if secs == 0 {
                return Err(ConfigError::invalid(keys::REQUEST_TIMEOUT_SECS, "must be positive"));
            }
            settings.request_timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = backend.get_raw(keys::FUZZY_THRESHOLD).await? {
            let threshold: f64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(keys::FUZZY_THRESHOLD, format!("not a number: {raw}")))?;
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::invalid(keys::FUZZY_THRESHOLD, "must be within 0.0..=1.0"));
            }
            settings.fuzzy_threshold = threshold;
        }
        if let Some(raw) = backend.get_raw(keys::SUGGESTION_LIMIT).await? {
            settings.suggestion_limit = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(keys::SUGGESTION_LIMIT, format!("not a number: {raw}")))?;
        }
        if let Some(raw) = backend.get_raw(keys::ADMIN_EMAILS).await? {
            settings.admin_emails = parse_email_list(&raw);
        }
        if let Some(raw) = backend.get_raw(keys::STORAGE_PATH).await? {
            settings.storage_path = Some(PathBuf::from(raw));
        }
        if let Some(raw) = backend.get_raw(keys::CATALOG_PATH).await? {
            settings.catalog_path = Some(PathBuf::from(raw));
        }

        tracing::debug!(
            api_url = %settings.api_url,
            timeout_secs = settings.request_timeout.as_secs(),
            backend = backend.name(),
            "Settings loaded"
        );
        Ok(settings)
    }

    pub fn api_url(mut self, url: Url) -> Self {
        self.api_url = url;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn admin_emails(mut self, emails: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.admin_emails = emails.into_iter().map(Into::into).collect();
        self
    }
}

fn parse_api_url(raw: &str) -> ConfigResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::invalid(keys::API_URL, e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(keys::API_URL, format!("unsupported scheme: {}", url.scheme())));
    }
    Ok(url)
}

/// Accepts a JSON array or a comma-separated list.
fn parse_email_list(raw: &str) -> Vec<String> {
    let items: Vec<String> = serde_json::from_str(raw)
        .unwrap_or_else(|_| raw.split(',').map(str::to_string).collect());
    items
        .into_iter()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}
