//! Workspace items: the dashboards, reports and datasets a user owns

use std::fmt;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// Kind of a workspace item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkspaceItemKind {
    Dashboard,
    Report,
    Dataset,
}

impl fmt::Display for WorkspaceItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceItemKind::Dashboard => write!(f, "Dashboard"),
            WorkspaceItemKind::Report => write!(f, "Report"),
            WorkspaceItemKind::Dataset => write!(f, "Dataset"),
        }
    }
}

/// An entry of the workspace listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceItem {
    pub id: String,
    pub name: String,
    pub kind: WorkspaceItemKind,
    pub description: Option<String>,
    /// Row count label, datasets only
    pub rows: Option<String>,
    pub last_viewed: String,
}

impl WorkspaceItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: WorkspaceItemKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            description: None,
            rows: None,
            last_viewed: "Just now".to_string(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_rows(mut self, rows: impl Into<String>) -> Self {
        self.rows = Some(rows.into());
        self
    }

    pub fn viewed(mut self, last_viewed: impl Into<String>) -> Self {
        self.last_viewed = last_viewed.into();
        self
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .description
                .as_ref()
                .map(|d| d.to_lowercase().contains(needle))
                .unwrap_or(false)
    }
}

/// Partial update for [`WorkspaceStore::update`]. `None` fields are left as is.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rows: Option<String>,
    pub last_viewed: Option<String>,
}

/// Items split by kind
#[derive(Debug, Clone, Default)]
pub struct GroupedItems {
    pub dashboards: Vec<WorkspaceItem>,
    pub reports: Vec<WorkspaceItem>,
    pub datasets: Vec<WorkspaceItem>,
}

/// Insertion-ordered store of workspace items keyed by id
#[derive(Debug, Clone, Default)]
pub struct WorkspaceStore {
    items: IndexMap<String, WorkspaceItem>,
}

impl WorkspaceStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the sample workspace
    pub fn seeded() -> Self {
        let mut store = Self::new();
        for item in sample_items() {
            store.items.insert(item.id.clone(), item);
        }
        store
    }

    /// Add an item under a freshly generated id and return it
    pub fn add(
        &mut self,
        name: impl Into<String>,
        kind: WorkspaceItemKind,
        description: Option<String>,
    ) -> &WorkspaceItem {
        let id = format!(
            "{}_{}",
            kind.to_string().to_lowercase(),
            Uuid::new_v4().simple()
        );
        let mut item = WorkspaceItem::new(id.clone(), name, kind);
        item.description = description;
        info!("Added {} '{}' as {}", kind, item.name, id);

        self.items.entry(id).or_insert(item)
    }

    /// Apply a partial update. Returns false when no item has `id`.
    pub fn update(&mut self, id: &str, patch: WorkspaceItemPatch) -> bool {
        let Some(item) = self.items.get_mut(id) else {
            debug!("Update of unknown workspace item {}", id);
            return false;
        };

        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(description) = patch.description {
            item.description = Some(description);
        }
        if let Some(rows) = patch.rows {
            item.rows = Some(rows);
        }
        if let Some(last_viewed) = patch.last_viewed {
            item.last_viewed = last_viewed;
        }
        true
    }

    /// Remove an item, keeping the order of the rest
    pub fn delete(&mut self, id: &str) -> Option<WorkspaceItem> {
        self.items.shift_remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&WorkspaceItem> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &WorkspaceItem> {
        self.items.values()
    }

    /// Items of one kind, or all of them for `None`
    pub fn by_kind(&self, kind: Option<WorkspaceItemKind>) -> Vec<&WorkspaceItem> {
        self.items
            .values()
            .filter(|item| kind.map_or(true, |k| item.kind == k))
            .collect()
    }

    pub fn grouped(&self) -> GroupedItems {
        let mut grouped = GroupedItems::default();
        for item in self.items.values() {
            let bucket = match item.kind {
                WorkspaceItemKind::Dashboard => &mut grouped.dashboards,
                WorkspaceItemKind::Report => &mut grouped.reports,
                WorkspaceItemKind::Dataset => &mut grouped.datasets,
            };
            bucket.push(item.clone());
        }
        grouped
    }

    /// Case-insensitive search over names and descriptions. An empty term
    /// matches everything.
    pub fn search(&self, term: &str) -> Vec<&WorkspaceItem> {
        if term.is_empty() {
            return self.items.values().collect();
        }
        let needle = term.to_lowercase();
        self.items.values().filter(|item| item.matches(&needle)).collect()
    }
}

fn sample_items() -> Vec<WorkspaceItem> {
    use WorkspaceItemKind::*;

    vec![
        WorkspaceItem::new("ds1", "E-commerce Sales Data", Dataset)
            .with_rows("15 rows")
            .viewed("5 min ago")
            .with_description("Sales data from Q4 2024 including revenue, customers, and regions"),
        WorkspaceItem::new("ds2", "Customer Analytics", Dataset)
            .with_rows("10 rows")
            .viewed("1 hour ago")
            .with_description("Customer behavior and demographics data"),
        WorkspaceItem::new("d1", "Sales Performance Dashboard", Dashboard)
            .viewed("10 min ago")
            .with_description("Real-time sales metrics and KPIs"),
        WorkspaceItem::new("d2", "Marketing Overview", Dashboard)
            .viewed("2 hours ago")
            .with_description("Campaign performance and conversion rates"),
        WorkspaceItem::new("r1", "Monthly Revenue Analysis", Report)
            .viewed("15 min ago")
            .with_description("Detailed breakdown of monthly revenue trends"),
        WorkspaceItem::new("r2", "Category Growth Trends", Report)
            .viewed("20 min ago")
            .with_description("Product category performance analysis"),
        WorkspaceItem::new("r3", "Product Performance Report", Report)
            .viewed("25 min ago")
            .with_description("Top performing products and inventory insights"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_generates_prefixed_id() {
        let mut store = WorkspaceStore::new();
        let id = store
            .add("Q1 Review", WorkspaceItemKind::Dashboard, None)
            .id
            .clone();
        assert!(id.starts_with("dashboard_"));
        assert_eq!(store.get(&id).map(|i| i.name.as_str()), Some("Q1 Review"));
    }

    #[test]
    fn test_update_and_delete() {
        let mut store = WorkspaceStore::seeded();
        let patch = WorkspaceItemPatch {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        assert!(store.update("d1", patch));
        assert_eq!(store.get("d1").unwrap().name, "Renamed");
        assert_eq!(
            store.get("d1").unwrap().description.as_deref(),
            Some("Real-time sales metrics and KPIs")
        );
        assert!(!store.update("missing", WorkspaceItemPatch::default()));

        let before = store.len();
        assert!(store.delete("ds1").is_some());
        assert_eq!(store.len(), before - 1);
        assert_eq!(store.items().next().unwrap().id, "ds2");
    }

    #[test]
    fn test_filters() {
        let store = WorkspaceStore::seeded();
        assert_eq!(store.by_kind(None).len(), 7);
        assert_eq!(store.by_kind(Some(WorkspaceItemKind::Report)).len(), 3);

        let grouped = store.grouped();
        assert_eq!(grouped.dashboards.len(), 2);
        assert_eq!(grouped.datasets.len(), 2);

        // Matches the description of ds1 only
        let hits = store.search("REGIONS");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "ds1");
        assert_eq!(store.search("").len(), 7);
    }
}
