use indexmap::IndexMap;
use serde::Serialize;

use crate::parse::operation::HttpMethod;
use crate::parse::spec::ApiDocument;

/// Group name for operations without tags.
pub const DEFAULT_GROUP: &str = "default";

#[derive(Debug, Clone, Serialize)]
pub struct NavEntry {
    pub operation_id: String,
    pub method: HttpMethod,
    pub path: String,
    pub summary: Option<String>,
    pub deprecated: bool,
    /// `METHOD::path`, the quick-select key.
    pub route_key: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavGroup {
    pub name: String,
    pub description: Option<String>,
    pub entries: Vec<NavEntry>,
}

/// The navigation menu: document title plus operations grouped by tag.
#[derive(Debug, Clone, Serialize)]
pub struct Navigation {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
    pub groups: Vec<NavGroup>,
}

impl Navigation {
    /// Groups follow the document's `tags` order; tags used only on
    /// operations come next, in first-seen order.
    pub fn build(doc: &ApiDocument) -> Self {
        let mut groups: IndexMap<String, NavGroup> = doc
            .tags
            .iter()
            .map(|t| {
                (
                    t.name.clone(),
                    NavGroup {
                        name: t.name.clone(),
                        description: t.description.clone(),
                        entries: Vec::new(),
                    },
                )
            })
            .collect();

        for op in doc.operations() {
            let entry = NavEntry {
                operation_id: op.id.clone(),
                method: op.method,
                path: op.path.to_string(),
                summary: op.operation.summary.clone(),
                deprecated: op.operation.deprecated,
                route_key: op.route_key(),
            };
            let tags: Vec<&str> = if op.operation.tags.is_empty() {
                vec![DEFAULT_GROUP]
            } else {
                op.operation.tags.iter().map(String::as_str).collect()
            };
            for tag in tags {
                groups
                    .entry(tag.to_string())
                    .or_insert_with(|| NavGroup {
                        name: tag.to_string(),
                        description: None,
                        entries: Vec::new(),
                    })
                    .entries
                    .push(entry.clone());
            }
        }

        Self {
            title: doc.info.title.clone(),
            description: doc.info.description.clone(),
            version: doc.info.version.clone(),
            groups: groups
                .into_values()
                .filter(|g| !g.entries.is_empty())
                .collect(),
        }
    }

    /// Every quick-select key, in menu order, without duplicates.
    pub fn route_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for entry in self.groups.iter().flat_map(|g| &g.entries) {
            if !keys.contains(&entry.route_key.as_str()) {
                keys.push(&entry.route_key);
            }
        }
        keys
    }
}
