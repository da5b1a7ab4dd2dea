//! Sort orders for the visible tool list.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Tool;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Most recently added first.
    #[default]
    Newest,
    NameAsc,
    NameDesc,
}

impl SortOrder {
    pub fn compare(&self, a: &Tool, b: &Tool) -> Ordering {
        match self {
            SortOrder::Newest => b.date_added.cmp(&a.date_added),
            SortOrder::NameAsc => cmp_ignore_case(&a.name, &b.name),
            SortOrder::NameDesc => cmp_ignore_case(&b.name, &a.name),
        }
    }

    /// Stable in-place sort; equal elements keep their relative order.
    pub fn sort(&self, tools: &mut [&Tool]) {
        tools.sort_by(|a, b| self.compare(a, b));
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::NameAsc => "name-asc",
            SortOrder::NameDesc => "name-desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" | "date" | "date-desc" => Ok(SortOrder::Newest),
            "name-asc" | "name" | "a-z" => Ok(SortOrder::NameAsc),
            "name-desc" | "z-a" => Ok(SortOrder::NameDesc),
            other => Err(crate::Error::Parse(format!("unknown sort order: {other}"))),
        }
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
