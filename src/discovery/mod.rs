//! Tool discovery: fuzzy search, composed filters and stable sorting.

mod filter;
mod fuzzy;
mod pipeline;
mod sort;

pub use filter::{DateFilter, FilterPredicate, FilterState, PricingFilter};
pub use fuzzy::{DEFAULT_SUGGESTION_LIMIT, DEFAULT_THRESHOLD, FuzzyIndex, Suggestion};
pub use pipeline::{DiscoveryPipeline, filter_tools};
pub use sort::SortOrder;
