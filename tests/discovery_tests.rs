//! Discovery pipeline tests
//!
//! Filtering, sorting and fuzzy suggestions over the built-in catalog and
//! small hand-built catalogs.
//!
//! Run: cargo nextest run --test discovery_tests

use ai_tools_hub::catalog::{Catalog, Category, CategoryGroup, PricingTier, Tool};
use ai_tools_hub::discovery::{DateFilter, DiscoveryPipeline, FilterState, PricingFilter, SortOrder};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use std::sync::Arc;

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn tool(name: &str, category: &str, pricing: PricingTier, added: DateTime<Utc>) -> Tool {
    Tool::builder(name, category, pricing, added).build()
}

/// Tools A (free, 2024-01-01) and B (paid, 2025-06-01), authored B first.
fn ab_catalog() -> Catalog {
    Catalog::new(vec![CategoryGroup::new(
        Category::new("chatbots", "Chatbots"),
        vec![
            tool("B", "chatbots", PricingTier::Paid, utc(2025, 6, 1, 0, 0)),
            tool("A", "chatbots", PricingTier::Free, utc(2024, 1, 1, 0, 0)),
        ],
    )])
}

fn names(tools: &[&Tool]) -> Vec<String> {
    tools.iter().map(|t| t.name.clone()).collect()
}

// =============================================================================
// Filter and sort
// =============================================================================

mod filter_tests {
    use super::*;

    #[test]
    fn test_pricing_filter_example() {
        let pipeline = DiscoveryPipeline::new(Arc::new(ab_catalog()));
        let state = FilterState::new().pricing(PricingTier::Free);
        assert_eq!(names(&pipeline.visible(&state)), ["A"]);
    }

    #[test]
    fn test_name_sort_example() {
        let pipeline = DiscoveryPipeline::new(Arc::new(ab_catalog()));
        let state = FilterState::new().sort(SortOrder::NameAsc);
        assert_eq!(names(&pipeline.visible(&state)), ["A", "B"]);

        let state = state.sort(SortOrder::NameDesc);
        assert_eq!(names(&pipeline.visible(&state)), ["B", "A"]);
    }

    #[test]
    fn test_visible_is_filtered_subset_for_all_combinations() {
        let catalog = ai_tools_hub::builtin_catalog();
        let pipeline = DiscoveryPipeline::new(Arc::new(catalog.clone()));
        let now = utc(2025, 1, 8, 12, 0);

        let mut categories: Vec<String> = vec!["all".into(), "unknown".into()];
        categories.extend(catalog.categories().iter().map(|c| c.id.as_str().to_string()));
        let mut pricings = vec![PricingFilter::All];
        pricings.extend(PricingTier::ALL.map(PricingFilter::Only));
        let dates = [
            DateFilter::All,
            DateFilter::Today,
            DateFilter::ThisMonth,
            DateFilter::Custom(NaiveDate::from_ymd_opt(2024, 2, 14).unwrap()),
        ];

        for category in &categories {
            for pricing in &pricings {
                for date in &dates {
                    for order in [SortOrder::Newest, SortOrder::NameAsc, SortOrder::NameDesc] {
                        let state = FilterState::new()
                            .category(category.as_str())
                            .pricing(*pricing)
                            .date(*date)
                            .sort(order);
                        let visible = pipeline.visible_at(&state, now);

                        let expected = catalog
                            .tools()
                            .iter()
                            .filter(|t| {
                                let category_ok = !catalog.has_category(&category.as_str().into())
                                    || t.category.as_str() == category;
                                category_ok
                                    && pricing.matches(t.pricing)
                                    && date.matches(t.date_added.date_naive(), now.date_naive())
                            })
                            .count();
                        assert_eq!(visible.len(), expected, "{state:?}");

                        let mut ids: Vec<_> = visible.iter().map(|t| &t.id).collect();
                        ids.sort();
                        ids.dedup();
                        assert_eq!(ids.len(), visible.len(), "duplicate tool in {state:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_unknown_category_matches_all() {
        let pipeline = DiscoveryPipeline::new(Arc::new(ai_tools_hub::builtin_catalog()));
        let all = pipeline.visible(&FilterState::new());
        let unknown = pipeline.visible(&FilterState::new().category("does-not-exist"));
        assert_eq!(names(&all), names(&unknown));
    }

    #[test]
    fn test_sort_is_idempotent_and_stable() {
        let pipeline = DiscoveryPipeline::new(Arc::new(ai_tools_hub::builtin_catalog()));
        let state = FilterState::new().sort(SortOrder::Newest);
        let once = pipeline.visible(&state);

        let mut twice = once.clone();
        SortOrder::Newest.sort(&mut twice);
        assert_eq!(names(&once), names(&twice));

        // Midjourney and Stable Diffusion share a date; authoring order holds.
        let pos = |name: &str| once.iter().position(|t| t.name == name).unwrap();
        assert!(pos("Midjourney") < pos("Stable Diffusion"));
        assert_eq!(once[0].name, "Otter.ai");
    }

    #[test]
    fn test_today_uses_time_zone_of_now() {
        let catalog = Catalog::new(vec![CategoryGroup::new(
            Category::new("audio", "Audio"),
            vec![tool("Late", "audio", PricingTier::Free, utc(2025, 6, 1, 23, 30))],
        )]);
        let pipeline = DiscoveryPipeline::new(Arc::new(catalog));
        let state = FilterState::new().date(DateFilter::Today);

        let seoul = FixedOffset::east_opt(9 * 3600).unwrap();
        let morning_in_seoul = seoul.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap();
        assert_eq!(pipeline.visible_at(&state, morning_in_seoul).len(), 1);

        assert!(pipeline.visible_at(&state, utc(2025, 6, 2, 10, 0)).is_empty());
        assert_eq!(pipeline.visible_at(&state, utc(2025, 6, 1, 23, 59)).len(), 1);
    }
}

// =============================================================================
// Fuzzy suggestions
// =============================================================================

mod fuzzy_tests {
    use super::*;

    #[test]
    fn test_empty_query_has_no_suggestions() {
        let pipeline = DiscoveryPipeline::new(Arc::new(ai_tools_hub::builtin_catalog()));
        assert!(pipeline.search("").is_empty());
        assert!(pipeline.search("   ").is_empty());
    }

    #[test]
    fn test_exact_name_ranks_first() {
        let catalog = ai_tools_hub::builtin_catalog();
        let pipeline = DiscoveryPipeline::new(Arc::new(catalog.clone()));
        for tool in catalog.tools() {
            let suggestions = pipeline.search(&tool.name.to_uppercase());
            assert_eq!(suggestions[0].tool_id, tool.id, "query {}", tool.name);
        }
    }

    #[test]
    fn test_typo_tolerance_and_limit() {
        let pipeline = DiscoveryPipeline::new(Arc::new(ai_tools_hub::builtin_catalog()));
        let suggestions = pipeline.search("eleven labz");
        assert_eq!(suggestions[0].name, "ElevenLabs");
        assert!(suggestions.iter().all(|s| s.score <= 0.3));

        assert!(pipeline.search("a").len() <= 5);
        assert!(pipeline.search("zzzzqqqq").is_empty());
    }

    #[test]
    fn test_apply_suggestion_navigates() {
        let pipeline = DiscoveryPipeline::new(Arc::new(ai_tools_hub::builtin_catalog()));
        let mut state = FilterState::new().query("whispr");
        let suggestion = pipeline.suggestions(&state).remove(0);
        assert_eq!(suggestion.name, "Whisper");

        pipeline.apply_suggestion(&mut state, &suggestion);
        assert_eq!(state.active_category.as_str(), "audio");
        assert!(state.search_query.is_empty());
        assert!(
            pipeline
                .visible(&state)
                .iter()
                .any(|t| t.name == "Whisper")
        );
    }
}
