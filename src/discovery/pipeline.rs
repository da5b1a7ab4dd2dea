//! Visible list computation: `sort(filter(catalog, state), order)`.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};

use super::{FilterPredicate, FilterState, FuzzyIndex, Suggestion};
use crate::catalog::{Catalog, Tool};

/// Apply the composed predicate, keeping catalog order.
pub fn filter_tools<'a, Tz: TimeZone>(
    catalog: &'a Catalog,
    state: &FilterState,
    now: DateTime<Tz>,
) -> Vec<&'a Tool> {
    let predicate = FilterPredicate::compose(state, catalog, now);
    catalog.tools().iter().filter(|t| predicate.matches(t)).collect()
}

pub struct DiscoveryPipeline {
    catalog: Arc<Catalog>,
    index: FuzzyIndex,
}

impl DiscoveryPipeline {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let index = FuzzyIndex::build(&catalog);
        Self { catalog, index }
    }

    pub fn with_fuzzy(mut self, threshold: f64, limit: usize) -> Self {
        self.index = self.index.with_threshold(threshold).with_limit(limit);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn fuzzy_index(&self) -> &FuzzyIndex {
        &self.index
    }

    /// Swap in a new catalog and re-index.
    pub fn replace_catalog(&mut self, catalog: Arc<Catalog>) {
        self.index.rebuild(&catalog);
        self.catalog = catalog;
    }

    /// Visible tools with "today" evaluated in the local time zone.
    pub fn visible(&self, state: &FilterState) -> Vec<&Tool> {
        self.visible_at(state, Local::now())
    }

    pub fn visible_at<Tz: TimeZone>(&self, state: &FilterState, now: DateTime<Tz>) -> Vec<&Tool> {
        let mut tools = filter_tools(&self.catalog, state, now);
        state.sort_order.sort(&mut tools);
        tools
    }

    pub fn suggestions(&self, state: &FilterState) -> Vec<Suggestion> {
        self.index.search(&state.search_query)
    }

    pub fn search(&self, query: &str) -> Vec<Suggestion> {
        self.index.search(query)
    }

    /// Navigate to a picked suggestion: select its category and clear the
    /// query.
    pub fn apply_suggestion(&self, state: &mut FilterState, suggestion: &Suggestion) {
        tracing::debug!(tool = %suggestion.tool_id, category = %suggestion.category, "Suggestion picked");
        state.set_category(suggestion.category.clone());
        state.search_query.clear();
    }
}
