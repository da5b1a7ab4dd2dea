//! # ai-tools-hub
//!
//! Headless core of a curated AI tools directory: an immutable catalog, a
//! discovery pipeline (fuzzy suggestions, composed filters, stable sort),
//! keyboard-navigable menu state machines, a session store over pluggable
//! local storage, and an async REST client for articles, the tool of the
//! day and newsletter signups.
//!
//! ## Discovery
//!
//! ```rust
//! use ai_tools_hub::{DiscoveryPipeline, FilterState, PricingTier, SortOrder, builtin_catalog};
//! use std::sync::Arc;
//!
//! let pipeline = DiscoveryPipeline::new(Arc::new(builtin_catalog()));
//! let state = FilterState::new()
//!     .category("image-generation")
//!     .pricing(PricingTier::OpenSource)
//!     .sort(SortOrder::NameAsc);
//!
//! for tool in pipeline.visible(&state) {
//!     println!("{} ({})", tool.name, tool.pricing);
//! }
//! let suggestions = pipeline.search("midjurney");
//! assert_eq!(suggestions[0].name, "Midjourney");
//! ```
//!
//! ## Hub
//!
//! ```rust,no_run
//! use ai_tools_hub::{ConfigBuilder, Hub, HubSettings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ai_tools_hub::Error> {
//!     let config = ConfigBuilder::new().env().file("hub.json").build();
//!     let hub = Hub::from_settings(HubSettings::load(&config).await?).await?;
//!
//!     let featured = hub.tool_of_the_day().await?;
//!     println!("Tool of the day: {} ({:?})", featured.tool.name, featured.source);
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod catalog;
pub mod client;
pub mod config;
pub mod discovery;
pub mod hub;
pub mod menu;
pub mod observability;
pub mod prelude;
pub mod session;
pub mod storage;

pub use catalog::{
    Catalog, Category, CategoryGroup, CategoryId, PricingTier, Tool, ToolBuilder, ToolId,
    builtin_catalog,
};
pub use client::{
    Article, ArticlePage, Client, ClientBuilder, SubscribeResponse, ToolOfTheDay, is_valid_email,
};
pub use config::{ConfigBuilder, ConfigError, HubSettings};
pub use discovery::{
    DateFilter, DiscoveryPipeline, FilterPredicate, FilterState, FuzzyIndex, PricingFilter,
    SortOrder, Suggestion, filter_tools,
};
pub use hub::{FeaturedTool, Hub, ToolOfTheDaySource};
pub use menu::{
    AccountMenu, AccountMenuItem, CategoryMenu, Menu, MenuEvent, MenuKey, MenuOutcome, MenuState,
};
pub use observability::{RequestSpan, TracingConfig};
pub use session::{AdminPolicy, CurrentUser, LoginInfo, SessionStore, UserProfile};
pub use storage::{
    Backend, BackendExt, EnvBackend, FileBackend, LayeredBackend, MemoryBackend, StorageError,
};

/// Error type for hub operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// API returned a non-2xx response.
    #[error("API error (HTTP {status}): {message}", status = status.map(|s| s.to_string()).unwrap_or_else(|| "unknown".into()))]
    Api {
        message: String,
        status: Option<u16>,
        error_type: Option<String>,
    },

    /// Network connectivity or request failed.
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A value did not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Local storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// File system operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Request parameters are invalid.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The operation needs a logged-in user.
    #[error("Not logged in")]
    NotLoggedIn,

    /// Catalog data could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(String),
}

/// Error category for unified error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Login required or rejected by the server (401, 403)
    Authorization,
    /// Configuration, parsing, or invalid input
    Configuration,
    /// Network or server errors that may succeed on retry
    Transient,
    /// Storage, IO, JSON, or unexpected API responses
    Internal,
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::NotLoggedIn
            | Error::Api {
                status: Some(401 | 403),
                ..
            } => ErrorCategory::Authorization,

            Error::Config(_)
            | Error::Parse(_)
            | Error::InvalidRequest(_)
            | Error::Catalog(_) => ErrorCategory::Configuration,

            Error::Network(_)
            | Error::Api {
                status: Some(429 | 500..=599),
                ..
            } => ErrorCategory::Transient,

            Error::Api { .. } | Error::Json(_) | Error::Storage(_) | Error::Io(_) => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn is_authorization_error(&self) -> bool {
        self.category() == ErrorCategory::Authorization
    }

    pub fn is_configuration_error(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Transient
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
