//! Immutable in-memory catalog.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::tool::RawTool;
use super::{Category, CategoryId, Tool, ToolId};
use crate::{Error, Result};

/// A category together with the tools authored under it.
#[derive(Debug, Clone)]
pub struct CategoryGroup {
    pub category: Category,
    pub tools: Vec<Tool>,
}

impl CategoryGroup {
    pub fn new(category: Category, tools: Vec<Tool>) -> Self {
        Self { category, tools }
    }
}

#[derive(Deserialize)]
struct RawGroup {
    id: String,
    #[serde(alias = "name", alias = "title")]
    label: String,
    #[serde(default)]
    tools: Vec<RawTool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCatalog {
    Groups(Vec<RawGroup>),
    Wrapped { categories: Vec<RawGroup> },
}

/// Category→tools records, flattened once at construction.
///
/// Every tool id appears at most once; `tools()` preserves authoring order,
/// which is the tie-break order for sorting.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    tools: Vec<Tool>,
    index: HashMap<ToolId, usize>,
}

impl Catalog {
    pub fn new(groups: impl IntoIterator<Item = CategoryGroup>) -> Self {
        let mut catalog = Self::default();

        for group in groups {
            let CategoryGroup { category, tools } = group;
            if category.id.is_all() {
                tracing::warn!(
                    category = %category.id,
                    "Skipping group using the reserved category id"
                );
                continue;
            }
            if !catalog.has_category(&category.id) {
                catalog.categories.push(category);
            }

            for tool in tools {
                if catalog.index.contains_key(&tool.id) {
                    tracing::warn!(tool = %tool.id, "Dropping duplicate tool id");
                    continue;
                }
                catalog.index.insert(tool.id.clone(), catalog.tools.len());
                catalog.tools.push(tool);
            }
        }

        tracing::debug!(
            categories = catalog.categories.len(),
            tools = catalog.tools.len(),
            "Catalog loaded"
        );
        catalog
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        let groups = match raw {
            RawCatalog::Groups(groups) | RawCatalog::Wrapped { categories: groups } => groups,
        };

        Ok(Self::new(groups.into_iter().map(|g| {
            let id = CategoryId::new(g.id);
            let tools = g.tools.into_iter().map(|t| t.into_tool(&id)).collect();
            CategoryGroup::new(Category { id, label: g.label }, tools)
        })))
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_json(&content).map_err(|e| Error::Catalog(format!("{}: {e}", path.display())))
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub fn has_category(&self, id: &CategoryId) -> bool {
        self.category(id).is_some()
    }

    /// All tools, flattened in authoring order.
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn tools_in<'a>(&'a self, id: &'a CategoryId) -> impl Iterator<Item = &'a Tool> + 'a {
        self.tools.iter().filter(move |t| &t.category == id)
    }

    pub fn get(&self, id: &ToolId) -> Option<&Tool> {
        self.index.get(id).map(|&i| &self.tools[i])
    }

    /// Position of a tool in authoring order.
    pub fn position(&self, id: &ToolId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PricingTier;
    use chrono::{TimeZone, Utc};

    fn tool(name: &str, category: &str) -> Tool {
        Tool::builder(
            name,
            category,
            PricingTier::Free,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
        .build()
    }

    #[test]
    fn test_duplicate_tools_dropped() {
        let catalog = Catalog::new(vec![
            CategoryGroup::new(
                Category::new("chat", "Chat"),
                vec![tool("Alpha", "chat"), tool("Beta", "chat")],
            ),
            CategoryGroup::new(
                Category::new("image", "Image"),
                vec![tool("alpha", "image"), tool("Gamma", "image")],
            ),
        ]);

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(&ToolId::new("alpha")).unwrap().category.as_str(), "chat");
        assert_eq!(catalog.position(&ToolId::new("gamma")), Some(2));
    }

    #[test]
    fn test_reserved_category_skipped() {
        let catalog = Catalog::new(vec![
            CategoryGroup::new(Category::new("all", "All"), vec![tool("Alpha", "all")]),
            CategoryGroup::new(Category::new("chat", "Chat"), vec![tool("Beta", "chat")]),
        ]);
        assert_eq!(catalog.categories().len(), 1);
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.has_category(&CategoryId::all()));
    }

    #[test]
    fn test_repeated_group_merges() {
        let catalog = Catalog::new(vec![
            CategoryGroup::new(Category::new("chat", "Chat"), vec![tool("Alpha", "chat")]),
            CategoryGroup::new(Category::new("chat", "Chat again"), vec![tool("Beta", "chat")]),
        ]);
        assert_eq!(catalog.categories().len(), 1);
        assert_eq!(catalog.categories()[0].label, "Chat");
        assert_eq!(catalog.tools_in(&CategoryId::new("chat")).count(), 2);
    }

    #[test]
    fn test_from_json_shapes() {
        let grouped = r#"[
            {"id": "chat", "label": "Chat", "tools": [
                {"name": "Alpha", "pricing": "free", "dateAdded": "2024-01-01"}
            ]},
            {"id": "image", "name": "Image", "tools": []}
        ]"#;
        let catalog = Catalog::from_json(grouped).unwrap();
        assert_eq!(catalog.categories().len(), 2);
        assert_eq!(catalog.categories()[1].label, "Image");
        assert_eq!(catalog.tools()[0].category.as_str(), "chat");

        let wrapped = r#"{"categories": [
            {"id": "video", "title": "Video", "tools": [
                {"id": "v1", "name": "Vid", "pricing": "paid", "dateAdded": "2025-02-03"}
            ]}
        ]}"#;
        let catalog = Catalog::from_json(wrapped).unwrap();
        assert!(catalog.get(&ToolId::new("v1")).is_some());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(Catalog::from_json("{not json").is_err());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        tokio::fs::write(
            &path,
            r#"[{"id":"code","label":"Code","tools":[{"name":"Coder","pricing":"freemium","dateAdded":"2024-05-05"}]}]"#,
        )
        .await
        .unwrap();

        let catalog = Catalog::load(&path).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.tools()[0].pricing, PricingTier::Freemium);
    }

    #[tokio::test]
    async fn test_load_reports_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        tokio::fs::write(&path, "[{\"id\": 1}]").await.unwrap();

        let err = Catalog::load(&path).await.unwrap_err();
        assert!(matches!(err, Error::Catalog(ref msg) if msg.contains("broken.json")));
        assert!(matches!(
            Catalog::load(dir.path().join("missing.json")).await,
            Err(Error::Io(_))
        ));
    }
}
