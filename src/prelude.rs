//! Prelude module for convenient imports.
//!
//! ```rust
//! use ai_tools_hub::prelude::*;
//! ```

// Core types
pub use crate::Error;
pub use crate::Result;
pub use crate::{FeaturedTool, Hub, ToolOfTheDaySource};

// Catalog
pub use crate::catalog::{Catalog, CategoryId, PricingTier, Tool, ToolId, builtin_catalog};

// Discovery
pub use crate::discovery::{DateFilter, DiscoveryPipeline, FilterState, SortOrder, Suggestion};

// Menus
pub use crate::menu::{AccountMenuItem, MenuEvent, MenuKey, MenuOutcome};

// Client
pub use crate::client::{Article, ArticlePage, Client, ToolOfTheDay};

// Session and storage
pub use crate::config::{ConfigBuilder, HubSettings};
pub use crate::session::{LoginInfo, SessionStore};
pub use crate::storage::{Backend, BackendExt, FileBackend, MemoryBackend};
