//! The featured tool returned by `/api/tools/tool-of-the-day`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::payload::{self, opt_string, string_list};
use crate::catalog::{Catalog, PricingTier, Tool, ToolId};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOfTheDay {
    #[serde(default, alias = "_id", deserialize_with = "opt_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "opt_string")]
    pub category: Option<String>,
    #[serde(default, alias = "website", alias = "link", deserialize_with = "opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "opt_pricing")]
    pub pricing: Option<PricingTier>,
    #[serde(
        default,
        alias = "imageUrl",
        alias = "image_url",
        alias = "logo",
        deserialize_with = "opt_string"
    )]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub tags: Vec<String>,
    /// Editorial blurb explaining the pick.
    #[serde(default, alias = "highlight", deserialize_with = "opt_string")]
    pub reason: Option<String>,
}

impl ToolOfTheDay {
    pub fn from_tool(tool: &Tool) -> Self {
        Self {
            id: Some(tool.id.as_str().to_string()),
            name: tool.name.clone(),
            category: Some(tool.category.as_str().to_string()),
            url: Some(tool.url.clone()).filter(|u| !u.is_empty()),
            description: Some(tool.description.clone()).filter(|d| !d.is_empty()),
            pricing: Some(tool.pricing),
            image: tool.image.clone(),
            tags: tool.tags.clone(),
            reason: None,
        }
    }

    /// The catalog entry for this pick, matched by id and then by name.
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Option<&'a Tool> {
        self.id
            .as_deref()
            .and_then(|id| catalog.get(&ToolId::new(id)))
            .or_else(|| catalog.get(&ToolId::from_name(&self.name)))
    }
}

/// Bare object or wrapped in `{tool}` / `{data}` / `{toolOfTheDay}`.
pub(crate) fn parse_tool_of_the_day(body: Value) -> Result<ToolOfTheDay> {
    let tool: ToolOfTheDay =
        serde_json::from_value(payload::unwrap_object(body, &["tool", "toolOfTheDay", "data"]))?;
    if tool.name.trim().is_empty() {
        return Err(Error::Parse("tool of the day has no name".into()));
    }
    Ok(tool)
}

fn opt_pricing<'de, D>(deserializer: D) -> std::result::Result<Option<PricingTier>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(deserializer)?.and_then(|raw| raw.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;
    use serde_json::json;

    #[test]
    fn test_parse_shapes() {
        let bare = parse_tool_of_the_day(json!({"name": "Claude", "pricing": "Freemium"})).unwrap();
        assert_eq!(bare.pricing, Some(PricingTier::Freemium));

        let wrapped = parse_tool_of_the_day(json!({
            "tool": {"name": "Tabby", "website": "https://tabby.tabbyml.com", "pricing": "???"},
            "date": "2025-05-01"
        }))
        .unwrap();
        assert_eq!(wrapped.name, "Tabby");
        assert_eq!(wrapped.url.as_deref(), Some("https://tabby.tabbyml.com"));
        assert_eq!(wrapped.pricing, None);

        assert!(matches!(
            parse_tool_of_the_day(json!({"data": {"description": "nameless"}})),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_resolve_against_catalog() {
        let catalog = builtin_catalog();
        let pick = parse_tool_of_the_day(json!({"name": "Stable Diffusion"})).unwrap();
        assert_eq!(pick.resolve(&catalog).unwrap().id.as_str(), "stable-diffusion");

        let unknown = parse_tool_of_the_day(json!({"name": "Nope", "id": "nope"})).unwrap();
        assert!(unknown.resolve(&catalog).is_none());
    }

    #[test]
    fn test_from_tool() {
        let catalog = builtin_catalog();
        let tool = &catalog.tools()[0];
        let pick = ToolOfTheDay::from_tool(tool);
        assert_eq!(pick.resolve(&catalog), Some(tool));
    }
}
