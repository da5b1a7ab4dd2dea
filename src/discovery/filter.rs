//! Filter state and the composed inclusion predicate.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::SortOrder;
use crate::catalog::{Catalog, CategoryId, PricingTier, Tool};

/// Pricing facet selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingFilter {
    #[default]
    All,
    Only(PricingTier),
}

impl PricingFilter {
    pub fn matches(&self, pricing: PricingTier) -> bool {
        match self {
            PricingFilter::All => true,
            PricingFilter::Only(tier) => *tier == pricing,
        }
    }
}

impl From<PricingTier> for PricingFilter {
    fn from(tier: PricingTier) -> Self {
        PricingFilter::Only(tier)
    }
}

impl FromStr for PricingFilter {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(PricingFilter::All)
        } else {
            s.parse().map(PricingFilter::Only)
        }
    }
}

impl fmt::Display for PricingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingFilter::All => f.write_str("all"),
            PricingFilter::Only(tier) => tier.fmt(f),
        }
    }
}

/// Date-added constraint. Days are calendar days in the time zone of the
/// reference "now" passed to [`FilterPredicate::compose`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "date", rename_all = "kebab-case")]
pub enum DateFilter {
    #[default]
    All,
    Today,
    ThisMonth,
    Custom(NaiveDate),
}

impl DateFilter {
    pub fn matches(&self, added: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DateFilter::All => true,
            DateFilter::Today => added == today,
            DateFilter::ThisMonth => added.year() == today.year() && added.month() == today.month(),
            DateFilter::Custom(day) => added == *day,
        }
    }
}

/// The combined search/filter/sort selections driving the visible list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub active_category: CategoryId,
    pub active_pricing: PricingFilter,
    pub sort_order: SortOrder,
    pub date_filter: DateFilter,
    pub search_query: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, id: impl Into<CategoryId>) -> Self {
        self.active_category = id.into();
        self
    }

    pub fn pricing(mut self, pricing: impl Into<PricingFilter>) -> Self {
        self.active_pricing = pricing.into();
        self
    }

    pub fn sort(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    pub fn date(mut self, filter: DateFilter) -> Self {
        self.date_filter = filter;
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    pub fn set_category(&mut self, id: impl Into<CategoryId>) {
        self.active_category = id.into();
    }

    pub fn set_pricing(&mut self, pricing: impl Into<PricingFilter>) {
        self.active_pricing = pricing.into();
    }

    pub fn set_sort(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    pub fn set_date_filter(&mut self, filter: DateFilter) {
        self.date_filter = filter;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Reset every selection to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Category actually applied: unknown ids resolve to "all".
    pub fn effective_category(&self, catalog: &Catalog) -> CategoryId {
        if self.active_category.is_all() || catalog.has_category(&self.active_category) {
            self.active_category.clone()
        } else {
            CategoryId::all()
        }
    }
}

/// Category ∧ pricing ∧ date inclusion test for one [`FilterState`].
#[derive(Debug, Clone)]
pub struct FilterPredicate<Tz: TimeZone> {
    category: Option<CategoryId>,
    pricing: PricingFilter,
    date: DateFilter,
    now: DateTime<Tz>,
}

impl<Tz: TimeZone> FilterPredicate<Tz> {
    pub fn compose(state: &FilterState, catalog: &Catalog, now: DateTime<Tz>) -> Self {
        let category = state.effective_category(catalog);
        if category != state.active_category {
            tracing::debug!(
                category = %state.active_category,
                "Unknown category, falling back to all"
            );
        }

        Self {
            category: (!category.is_all()).then_some(category),
            pricing: state.active_pricing,
            date: state.date_filter,
            now,
        }
    }

    pub fn matches(&self, tool: &Tool) -> bool {
        self.matches_category(tool) && self.pricing.matches(tool.pricing) && self.matches_date(tool)
    }

    fn matches_category(&self, tool: &Tool) -> bool {
        self.category.as_ref().is_none_or(|c| &tool.category == c)
    }

    fn matches_date(&self, tool: &Tool) -> bool {
        if self.date == DateFilter::All {
            return true;
        }
        let added = tool
            .date_added
            .with_timezone(&self.now.timezone())
            .date_naive();
        self.date.matches(added, self.now.date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, CategoryGroup};
    use chrono::{FixedOffset, Utc};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CategoryGroup::new(
                Category::new("chat", "Chat"),
                vec![
                    Tool::builder(
                        "Alpha",
                        "chat",
                        PricingTier::Free,
                        Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
                    )
                    .build(),
                ],
            ),
            CategoryGroup::new(
                Category::new("image", "Image"),
                vec![
                    Tool::builder(
                        "Beta",
                        "image",
                        PricingTier::Paid,
                        Utc.with_ymd_and_hms(2025, 6, 1, 23, 30, 0).unwrap(),
                    )
                    .build(),
                ],
            ),
        ])
    }

    #[test]
    fn test_pricing_filter_parse() {
        assert_eq!("all".parse::<PricingFilter>().unwrap(), PricingFilter::All);
        assert_eq!(
            "paid".parse::<PricingFilter>().unwrap(),
            PricingFilter::Only(PricingTier::Paid)
        );
        assert_eq!(PricingFilter::Only(PricingTier::OpenSource).to_string(), "open-source");
    }

    #[test]
    fn test_unknown_category_is_all() {
        let catalog = catalog();
        let state = FilterState::new().category("does-not-exist");
        assert!(state.effective_category(&catalog).is_all());

        let predicate = FilterPredicate::compose(&state, &catalog, Utc::now());
        assert!(catalog.tools().iter().all(|t| predicate.matches(t)));
    }

    #[test]
    fn test_category_and_pricing() {
        let catalog = catalog();
        let now = Utc::now();

        let state = FilterState::new().category("chat");
        let predicate = FilterPredicate::compose(&state, &catalog, now);
        let names: Vec<_> = catalog
            .tools()
            .iter()
            .filter(|t| predicate.matches(t))
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, ["Alpha"]);

        let state = FilterState::new().category("chat").pricing(PricingTier::Paid);
        let predicate = FilterPredicate::compose(&state, &catalog, now);
        assert!(!catalog.tools().iter().any(|t| predicate.matches(t)));
    }

    #[test]
    fn test_today_uses_reference_timezone() {
        let catalog = catalog();
        let beta = &catalog.tools()[1];

        // 23:30 UTC on June 1st is already June 2nd at UTC+2.
        let state = FilterState::new().date(DateFilter::Today);
        let utc_now = Utc.with_ymd_and_hms(2025, 6, 1, 23, 59, 0).unwrap();
        assert!(FilterPredicate::compose(&state, &catalog, utc_now).matches(beta));

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let local_now = plus_two.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap();
        assert!(FilterPredicate::compose(&state, &catalog, local_now).matches(beta));

        let local_prev = plus_two.with_ymd_and_hms(2025, 6, 1, 22, 0, 0).unwrap();
        assert!(!FilterPredicate::compose(&state, &catalog, local_prev).matches(beta));
    }

    #[test]
    fn test_month_and_custom() {
        let june = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        assert!(DateFilter::ThisMonth.matches(june, today));
        assert!(!DateFilter::ThisMonth.matches(june, NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()));
        assert!(DateFilter::Custom(june).matches(june, today));
        assert!(!DateFilter::Custom(today).matches(june, today));
        assert!(!DateFilter::Today.matches(june, today));
    }

    #[test]
    fn test_state_serde() {
        let state = FilterState::new()
            .pricing(PricingTier::Free)
            .date(DateFilter::Custom(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        let json = serde_json::to_string(&state).unwrap();
        let back: FilterState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
