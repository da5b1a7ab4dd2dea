//! Blog articles: paged listing and lookup by slug.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::payload::{self, opt_string, opt_timestamp, opt_u64, string_list};
use crate::{Error, Result};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, alias = "_id", deserialize_with = "opt_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "summary", alias = "description", deserialize_with = "opt_string")]
    pub excerpt: Option<String>,
    #[serde(default, alias = "body", deserialize_with = "opt_string")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub author: Option<String>,
    #[serde(
        default,
        alias = "cover_image",
        alias = "image",
        deserialize_with = "opt_string"
    )]
    pub cover_image: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub tags: Vec<String>,
    #[serde(
        default,
        alias = "published_at",
        alias = "createdAt",
        alias = "date",
        deserialize_with = "opt_timestamp"
    )]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "read_time", deserialize_with = "opt_u64")]
    pub read_time: Option<u64>,
}

impl Article {
    /// An article needs a slug to be linked and a title to be listed.
    pub fn is_valid(&self) -> bool {
        !self.slug.trim().is_empty() && !self.title.trim().is_empty()
    }
}

/// One page of articles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticlePage {
    pub articles: Vec<Article>,
    pub page: u32,
    pub total_pages: u32,
    pub total: Option<u64>,
}

impl ArticlePage {
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawArticleList {
    Bare(Vec<Value>),
    Wrapped(RawWrapped),
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawWrapped {
    #[serde(alias = "data", alias = "posts")]
    articles: Vec<Value>,
    #[serde(flatten)]
    meta: RawPagination,
    pagination: Option<RawPagination>,
}

#[derive(Clone, Copy, Default, Deserialize)]
#[serde(default)]
struct RawPagination {
    #[serde(alias = "currentPage", alias = "current_page", deserialize_with = "opt_u64")]
    page: Option<u64>,
    #[serde(alias = "totalPages", deserialize_with = "opt_u64")]
    total_pages: Option<u64>,
    #[serde(
        alias = "totalArticles",
        alias = "total_articles",
        alias = "count",
        deserialize_with = "opt_u64"
    )]
    total: Option<u64>,
}

impl RawPagination {
    fn or(self, other: Option<RawPagination>) -> Self {
        let other = other.unwrap_or_default();
        Self {
            page: self.page.or(other.page),
            total_pages: self.total_pages.or(other.total_pages),
            total: self.total.or(other.total),
        }
    }
}

/// Builds a page from any accepted list shape. Invalid entries are dropped.
pub(crate) fn parse_page(body: Value, page: u32, limit: u32) -> Result<ArticlePage> {
    let raw: RawArticleList = serde_json::from_value(body)?;
    let (items, meta) = match raw {
        RawArticleList::Bare(items) => (items, RawPagination::default()),
        RawArticleList::Wrapped(wrapped) => {
            let meta = wrapped.meta.or(wrapped.pagination);
            (wrapped.articles, meta)
        }
    };

    let articles: Vec<Article> = items.into_iter().filter_map(parse_entry).collect();
    let page = meta.page.map(clamp_u32).unwrap_or(page);
    let total_pages = meta
        .total_pages
        .map(clamp_u32)
        .or_else(|| {
            meta.total
                .map(|total| clamp_u32(total.div_ceil(u64::from(limit.max(1)))))
        })
        .unwrap_or(page)
        .max(page);

    Ok(ArticlePage {
        articles,
        page,
        total_pages,
        total: meta.total,
    })
}

/// Single article, bare or wrapped in `{article}` / `{data}`.
pub(crate) fn parse_article(body: Value, slug: &str) -> Result<Article> {
    let article: Article = serde_json::from_value(payload::unwrap_object(body, &["article", "data"]))?;
    if !article.is_valid() {
        return Err(Error::Parse(format!(
            "article '{slug}' is missing a slug or title"
        )));
    }
    Ok(article)
}

fn parse_entry(value: Value) -> Option<Article> {
    match serde_json::from_value::<Article>(value) {
        Ok(article) if article.is_valid() => Some(article),
        Ok(article) => {
            tracing::warn!(
                slug = %article.slug,
                title = %article.title,
                "Dropping article without slug or title"
            );
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Dropping unreadable article");
            None
        }
    }
}

fn clamp_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
