//! Tool catalog: categories, tools and the immutable store.

mod builtin;
mod category;
mod store;
mod tool;

pub use builtin::builtin_catalog;
pub use category::{ALL_CATEGORIES, Category, CategoryId};
pub use store::{Catalog, CategoryGroup};
pub use tool::{PricingTier, Tool, ToolBuilder, ToolId, parse_timestamp};
