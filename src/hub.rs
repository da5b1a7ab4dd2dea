//! Facade wiring the catalog, discovery pipeline, REST client and session.

use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};

use crate::catalog::{Catalog, Tool, ToolId, builtin_catalog};
use crate::client::{Article, ArticlePage, Client, SubscribeResponse, ToolOfTheDay};
use crate::config::HubSettings;
use crate::discovery::{DiscoveryPipeline, FilterState, Suggestion};
use crate::menu::{AccountMenu, AccountMenuItem, CategoryMenu, MenuEvent, MenuOutcome};
use crate::session::{AdminPolicy, SessionStore};
use crate::storage::{Backend, FileBackend, MemoryBackend};
use crate::{Error, Result};

const SESSION_FILE: &str = "session.json";

/// Where the featured tool came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOfTheDaySource {
    Remote,
    /// Picked locally from the catalog after the server call failed.
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedTool {
    pub tool: ToolOfTheDay,
    pub source: ToolOfTheDaySource,
}

pub struct Hub {
    settings: HubSettings,
    pipeline: DiscoveryPipeline,
    client: Client,
    session: SessionStore,
    admin: AdminPolicy,
}

impl Hub {
    pub fn new(catalog: Catalog, client: Client, session: SessionStore) -> Self {
        Self::with_settings(HubSettings::default(), catalog, client, session)
    }

    pub fn with_settings(
        settings: HubSettings,
        catalog: Catalog,
        client: Client,
        session: SessionStore,
    ) -> Self {
        let pipeline = DiscoveryPipeline::new(Arc::new(catalog))
            .with_fuzzy(settings.fuzzy_threshold, settings.suggestion_limit);
        let admin = AdminPolicy::from_settings(&settings);
        Self {
            settings,
            pipeline,
            client,
            session,
            admin,
        }
    }

    /// Builds every component from settings.
    ///
    /// The catalog comes from `catalog_path` or the built-in set. Session
    /// state goes to `storage_path`, else the platform data directory, else
    /// memory.
    pub async fn from_settings(settings: HubSettings) -> Result<Self> {
        let catalog = match &settings.catalog_path {
            Some(path) => Catalog::load(path).await?,
            None => builtin_catalog(),
        };

        let backend: Arc<dyn Backend> = match &settings.storage_path {
            Some(path) => Arc::new(FileBackend::new(path.clone())),
            None => match FileBackend::in_data_dir(SESSION_FILE) {
                Some(file) => Arc::new(file),
                None => {
                    tracing::warn!("No data directory available, session state is not persisted");
                    Arc::new(MemoryBackend::named("session"))
                }
            },
        };

        let client = Client::from_settings(&settings)?;
        tracing::info!(
            api_url = %settings.api_url,
            tools = catalog.len(),
            storage = backend.name(),
            "Hub initialized"
        );
        Ok(Self::with_settings(
            settings,
            catalog,
            client,
            SessionStore::new(backend),
        ))
    }

    pub fn settings(&self) -> &HubSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &Catalog {
        self.pipeline.catalog()
    }

    pub fn pipeline(&self) -> &DiscoveryPipeline {
        &self.pipeline
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn admin_policy(&self) -> &AdminPolicy {
        &self.admin
    }

    pub fn visible(&self, state: &FilterState) -> Vec<&Tool> {
        self.pipeline.visible(state)
    }

    pub fn suggestions(&self, state: &FilterState) -> Vec<Suggestion> {
        self.pipeline.suggestions(state)
    }

    pub fn category_menu(&self, state: &FilterState) -> CategoryMenu {
        CategoryMenu::new(self.catalog(), &state.active_category)
    }

    /// Feeds an event to the sidebar menu and records `sidebarOpen` whenever
    /// the menu opens or closes.
    pub async fn handle_category_menu(
        &self,
        menu: &mut CategoryMenu,
        event: MenuEvent,
        state: &mut FilterState,
    ) -> Result<MenuOutcome> {
        let outcome = menu.handle(event, state);
        if matches!(
            outcome,
            MenuOutcome::Opened | MenuOutcome::Closed | MenuOutcome::Activated(_)
        ) {
            self.session.set_sidebar_open(menu.menu().is_open()).await?;
        }
        Ok(outcome)
    }

    /// Server pick, or a local pick when the server is unreachable or
    /// returns something unusable.
    pub async fn tool_of_the_day(&self) -> Result<FeaturedTool> {
        match self.client.tool_of_the_day().await {
            Ok(tool) => Ok(FeaturedTool {
                tool,
                source: ToolOfTheDaySource::Remote,
            }),
            Err(e) => {
                let today = Local::now().date_naive();
                let Some(tool) = self.local_tool_of_the_day(today) else {
                    return Err(e);
                };
                tracing::warn!(
                    error = %e,
                    fallback = %tool.name,
                    "Tool of the day unavailable, using local pick"
                );
                Ok(FeaturedTool {
                    tool,
                    source: ToolOfTheDaySource::Fallback,
                })
            }
        }
    }

    /// Deterministic pick: day of year modulo catalog size.
    pub fn local_tool_of_the_day(&self, today: NaiveDate) -> Option<ToolOfTheDay> {
        let tools = self.catalog().tools();
        if tools.is_empty() {
            return None;
        }
        let index = today.ordinal0() as usize % tools.len();
        Some(ToolOfTheDay::from_tool(&tools[index]))
    }

    pub async fn articles(&self, page: u32, limit: u32) -> Result<ArticlePage> {
        self.client.articles(page, limit).await
    }

    pub async fn article(&self, slug: &str) -> Result<Article> {
        self.client.article(slug).await
    }

    /// Subscribes and, on success, suppresses the newsletter popup.
    pub async fn subscribe(&self, email: &str) -> Result<SubscribeResponse> {
        let response = self.client.subscribe(email).await?;
        if response.success {
            self.session.mark_newsletter_popup_seen().await?;
        }
        Ok(response)
    }

    pub async fn should_show_newsletter_popup(&self) -> Result<bool> {
        Ok(!self.session.newsletter_popup_seen().await?)
    }

    pub async fn is_admin(&self) -> Result<bool> {
        self.session.is_admin(&self.admin).await
    }

    /// Account menu for the current user, focused on the last used item.
    pub async fn account_menu(&self) -> Result<AccountMenu> {
        let is_admin = self.is_admin().await?;
        let last = self.session.account_last_item().await?;
        Ok(AccountMenu::new(is_admin, last))
    }

    /// Remembers the item and performs the logout when chosen.
    pub async fn activate_account_item(&self, item: AccountMenuItem) -> Result<()> {
        self.session.set_account_last_item(item).await?;
        if item == AccountMenuItem::Logout {
            self.session.logout().await?;
        }
        Ok(())
    }

    /// Favorites that still exist in the catalog, in catalog order.
    pub async fn favorite_tools(&self) -> Result<Vec<&Tool>> {
        let favorites = self.session.favorites().await?;
        Ok(self
            .catalog()
            .tools()
            .iter()
            .filter(|tool| favorites.contains(&tool.id))
            .collect())
    }

    /// Only catalog tools can be favorited.
    pub async fn toggle_favorite(&self, id: &ToolId) -> Result<bool> {
        if self.catalog().get(id).is_none() {
            return Err(Error::InvalidRequest(format!("unknown tool: {id}")));
        }
        self.session.toggle_favorite(id).await
    }
}

impl std::fmt::Debug for Hub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hub")
            .field("client", &self.client)
            .field("session", &self.session)
            .field("tools", &self.catalog().len())
            .finish()
    }
}
