//! Tool records and their pricing tiers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::CategoryId;

/// Stable identifier of a tool, used for favorites and de-duplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolId(String);

impl ToolId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an id from a display name: lowercase, runs of
    /// non-alphanumerics collapsed to a single `-`.
    pub fn from_name(name: &str) -> Self {
        Self(slugify(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ToolId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

pub(crate) fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Pricing facet of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingTier {
    Free,
    Freemium,
    #[serde(alias = "opensource", alias = "open_source")]
    OpenSource,
    Paid,
}

impl PricingTier {
    pub const ALL: [PricingTier; 4] = [
        PricingTier::Free,
        PricingTier::Freemium,
        PricingTier::OpenSource,
        PricingTier::Paid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PricingTier::Free => "free",
            PricingTier::Freemium => "freemium",
            PricingTier::OpenSource => "open-source",
            PricingTier::Paid => "paid",
        }
    }
}

impl fmt::Display for PricingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingTier {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(PricingTier::Free),
            "freemium" => Ok(PricingTier::Freemium),
            "open-source" | "opensource" | "open_source" => Ok(PricingTier::OpenSource),
            "paid" => Ok(PricingTier::Paid),
            other => Err(crate::Error::Parse(format!("unknown pricing tier: {other}"))),
        }
    }
}

/// One catalog entry describing an external AI product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tool {
    pub id: ToolId,
    pub name: String,
    pub category: CategoryId,
    pub url: String,
    pub pricing: PricingTier,
    pub date_added: DateTime<Utc>,
    pub description: String,
    pub tags: Vec<String>,
    pub image: Option<String>,
}

impl Tool {
    pub fn builder(
        name: impl Into<String>,
        category: impl Into<CategoryId>,
        pricing: PricingTier,
        date_added: DateTime<Utc>,
    ) -> ToolBuilder {
        let name = name.into();
        ToolBuilder {
            tool: Tool {
                id: ToolId::from_name(&name),
                name,
                category: category.into(),
                url: String::new(),
                pricing,
                date_added,
                description: String::new(),
                tags: Vec::new(),
                image: None,
            },
        }
    }
}

pub struct ToolBuilder {
    tool: Tool,
}

impl ToolBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.tool.id = ToolId::new(id);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.tool.url = url.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.tool.description = description.into();
        self
    }

    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tool.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.tool.image = Some(image.into());
        self
    }

    pub fn build(self) -> Tool {
        self.tool
    }
}

/// Wire shape of a tool. Field names follow the JSON the catalog is
/// authored in; `category` is optional because grouped catalogs carry it on
/// the enclosing group.
#[derive(Debug, Deserialize)]
pub(crate) struct RawTool {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "link")]
    pub url: String,
    pub pricing: PricingTier,
    #[serde(rename = "dateAdded", alias = "date_added", deserialize_with = "de_timestamp")]
    pub date_added: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl RawTool {
    pub fn into_tool(self, group: &CategoryId) -> Tool {
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => ToolId::new(id),
            _ => ToolId::from_name(&self.name),
        };
        Tool {
            id,
            category: self.category.map(CategoryId::new).unwrap_or_else(|| group.clone()),
            name: self.name,
            url: self.url,
            pricing: self.pricing,
            date_added: self.date_added,
            description: self.description,
            tags: self.tags,
            image: self.image.filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
}

fn de_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Millis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {ms}"))),
        RawTimestamp::Text(text) => parse_timestamp(&text).map_err(D::Error::custom),
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, String> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid timestamp: {text}"))
}
