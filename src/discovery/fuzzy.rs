//! Fuzzy name search producing ranked suggestions.
//!
//! A candidate passes when its normalized approximate-substring edit
//! distance to the query is at most the threshold (0.0 = exact, 1.0 =
//! anything). Survivors are ranked by exact name match, then distance, then
//! the nucleo subsequence score.

use std::cmp::Ordering;

use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::catalog::{Catalog, CategoryId, ToolId};

pub const DEFAULT_THRESHOLD: f64 = 0.3;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub tool_id: ToolId,
    pub name: String,
    pub category: CategoryId,
    /// Normalized distance, lower is better.
    pub score: f64,
}

#[derive(Debug, Clone)]
struct Entry {
    id: ToolId,
    name: String,
    lowered: Vec<char>,
    category: CategoryId,
}

/// Search index over the flattened `{name, category}` pairs of a catalog.
#[derive(Debug, Clone)]
pub struct FuzzyIndex {
    entries: Vec<Entry>,
    threshold: f64,
    limit: usize,
}

struct Candidate<'a> {
    entry: &'a Entry,
    position: usize,
    exact: bool,
    score: f64,
    subsequence: u32,
}

impl FuzzyIndex {
    pub fn build(catalog: &Catalog) -> Self {
        Self {
            entries: Self::entries(catalog),
            threshold: DEFAULT_THRESHOLD,
            limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Re-index after the catalog changed.
    pub fn rebuild(&mut self, catalog: &Catalog) {
        self.entries = Self::entries(catalog);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entries(catalog: &Catalog) -> Vec<Entry> {
        catalog
            .tools()
            .iter()
            .map(|t| Entry {
                id: t.id.clone(),
                name: t.name.clone(),
                lowered: t.name.to_lowercase().chars().collect(),
                category: t.category.clone(),
            })
            .collect()
    }

    pub fn search(&self, query: &str) -> Vec<Suggestion> {
        let query = query.trim();
        if query.is_empty() || self.limit == 0 {
            return Vec::new();
        }

        let lowered_query = query.to_lowercase();
        let needle: Vec<char> = lowered_query.chars().collect();
        let mut matcher = Matcher::new(Config::DEFAULT);
        let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
        let mut buf = Vec::new();

        let mut candidates: Vec<Candidate<'_>> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(position, entry)| {
                let score = substring_distance(&needle, &entry.lowered) as f64 / needle.len() as f64;
                if score > self.threshold {
                    return None;
                }
                let haystack = Utf32Str::new(&entry.name, &mut buf);
                let subsequence = pattern.score(haystack, &mut matcher).unwrap_or(0);
                Some(Candidate {
                    entry,
                    position,
                    exact: entry.lowered == needle,
                    score,
                    subsequence,
                })
            })
            .collect();

        candidates.sort_by(rank);
        candidates.truncate(self.limit);

        candidates
            .into_iter()
            .map(|c| Suggestion {
                tool_id: c.entry.id.clone(),
                name: c.entry.name.clone(),
                category: c.entry.category.clone(),
                score: c.score,
            })
            .collect()
    }
}

fn rank(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    b.exact
        .cmp(&a.exact)
        .then_with(|| a.score.total_cmp(&b.score))
        .then_with(|| b.subsequence.cmp(&a.subsequence))
        .then_with(|| a.entry.lowered.len().cmp(&b.entry.lowered.len()))
        .then_with(|| a.position.cmp(&b.position))
}

/// Minimum edit distance between `needle` and any substring of `haystack`.
fn substring_distance(needle: &[char], haystack: &[char]) -> usize {
    let m = needle.len();
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut cur = vec![0; m + 1];
    let mut best = prev[m];

    for &h in haystack {
        cur[0] = 0;
        for i in 1..=m {
            let substitution = prev[i - 1] + usize::from(needle[i - 1] != h);
            cur[i] = substitution.min(prev[i] + 1).min(cur[i - 1] + 1);
        }
        best = best.min(cur[m]);
        std::mem::swap(&mut prev, &mut cur);
    }
    best
}
