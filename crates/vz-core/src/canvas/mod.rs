//! Dashboard canvas with undo/redo history and item selection

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::events::{events::CanvasChanged, EventBus};
use crate::history::History;
use crate::model::Dashboard;

mod keyboard;

pub use keyboard::{command_for, CanvasCommand, Key, KeyEvent, Modifiers, Platform};

/// Kind of widget placed on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Report,
    Chart,
    Table,
}

/// An entry of the sidebar that can be dragged onto the canvas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarItem {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
}

impl SidebarItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }
}

/// A widget placed on the canvas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasItem {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    /// Vertical stacking position, lower first
    pub order: u32,
}

/// Errors reported by canvas edits
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    #[error("item '{0}' is already on the canvas")]
    DuplicateItem(String),

    #[error("item '{0}' is not on the canvas")]
    UnknownItem(String),
}

/// Items offered in the dashboard sidebar
pub fn sidebar_catalog() -> Vec<SidebarItem> {
    vec![
        SidebarItem::new("r1", "Monthly Revenue Analysis", ItemKind::Report),
        SidebarItem::new("r2", "Category Growth Trends", ItemKind::Report),
        SidebarItem::new("r3", "Product Performance Report", ItemKind::Report),
        SidebarItem::new("t1", "E-commerce Sales Data", ItemKind::Table),
    ]
}

/// Widgets every freshly opened canvas starts with
pub fn default_items() -> Vec<CanvasItem> {
    [
        "Monthly Revenue Analysis",
        "Category Growth Trends",
        "Product Performance Report",
    ]
    .iter()
    .enumerate()
    .map(|(idx, name)| CanvasItem {
        id: format!("default-{}", idx + 1),
        name: name.to_string(),
        kind: ItemKind::Report,
        order: idx as u32,
    })
    .collect()
}

/// The dashboard-building surface.
///
/// Every structural change goes through [`History::commit`], so undo/redo
/// always lands on a state that was once shown.
pub struct DashboardCanvas {
    title: String,
    history: History<Vec<CanvasItem>>,
    selected: Option<String>,
    event_bus: Option<Arc<EventBus>>,
}

impl DashboardCanvas {
    /// Create a canvas with no widgets
    pub fn empty() -> Self {
        Self::with_items("Untitled Dashboard", Vec::new())
    }

    /// Create a canvas seeded with the default report widgets
    pub fn seeded() -> Self {
        Self::with_items("Untitled Dashboard", default_items())
    }

    /// Open the canvas for a saved dashboard. The seed is the same default
    /// set; the dashboard only names the canvas.
    pub fn open(dashboard: Option<&Dashboard>) -> Self {
        let mut canvas = Self::seeded();
        if let Some(dashboard) = dashboard {
            canvas.title = dashboard.name.clone();
        }
        info!("Opened canvas '{}' with {} items", canvas.title, canvas.items().len());
        canvas
    }

    fn with_items(title: &str, items: Vec<CanvasItem>) -> Self {
        Self {
            title: title.to_string(),
            history: History::new(items),
            selected: None,
            event_bus: None,
        }
    }

    /// Publish [`CanvasChanged`] on every history movement
    pub fn with_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Items in insertion order
    pub fn items(&self) -> &[CanvasItem] {
        self.history.current()
    }

    /// Items in render order. Equal orders keep insertion order.
    pub fn ordered_items(&self) -> Vec<&CanvasItem> {
        let mut items: Vec<&CanvasItem> = self.items().iter().collect();
        items.sort_by_key(|item| item.order);
        items
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items().iter().any(|item| item.id == id)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Place a sidebar item at the bottom of the canvas and select it
    pub fn add_item(&mut self, item: &SidebarItem) -> Result<&CanvasItem, CanvasError> {
        if self.contains(&item.id) {
            warn!("Rejected duplicate canvas item '{}'", item.id);
            return Err(CanvasError::DuplicateItem(item.id.clone()));
        }

        let order = self
            .items()
            .iter()
            .map(|i| i.order)
            .max()
            .map(|max| max + 1)
            .unwrap_or(0);

        let mut items = self.items().to_vec();
        items.push(CanvasItem {
            id: item.id.clone(),
            name: item.name.clone(),
            kind: item.kind,
            order,
        });
        self.commit(items);
        self.selected = Some(item.id.clone());

        debug!("Added '{}' at order {}", item.id, order);
        let last = self.items().len() - 1;
        Ok(&self.items()[last])
    }

    /// Remove an item. Clears the selection when it pointed at the item.
    pub fn delete_item(&mut self, id: &str) -> Result<(), CanvasError> {
        if !self.contains(id) {
            return Err(CanvasError::UnknownItem(id.to_string()));
        }

        let items: Vec<CanvasItem> = self
            .items()
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        self.commit(items);

        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        debug!("Deleted '{}'", id);
        Ok(())
    }

    /// Select an item that is on the canvas
    pub fn select(&mut self, id: &str) -> Result<(), CanvasError> {
        if !self.contains(id) {
            return Err(CanvasError::UnknownItem(id.to_string()));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Step back one committed state. Returns false at the first entry.
    pub fn undo(&mut self) -> bool {
        if self.history.undo().is_none() {
            return false;
        }
        self.after_travel();
        true
    }

    /// Step forward one committed state. Returns false at the last entry.
    pub fn redo(&mut self) -> bool {
        if self.history.redo().is_none() {
            return false;
        }
        self.after_travel();
        true
    }

    /// Run a command produced by the keyboard or a toolbar button
    pub fn apply(&mut self, command: CanvasCommand) -> Result<bool, CanvasError> {
        match command {
            CanvasCommand::Undo => Ok(self.undo()),
            CanvasCommand::Redo => Ok(self.redo()),
            CanvasCommand::DeleteSelected => match self.selected.clone() {
                Some(id) => self.delete_item(&id).map(|_| true),
                None => Ok(false),
            },
            CanvasCommand::ClearSelection => {
                let had_selection = self.selected.is_some();
                self.clear_selection();
                Ok(had_selection)
            }
        }
    }

    /// Translate a key press and apply it. Returns whether anything changed.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Result<bool, CanvasError> {
        match command_for(event) {
            Some(command) => self.apply(command),
            None => Ok(false),
        }
    }

    fn commit(&mut self, items: Vec<CanvasItem>) {
        self.history.commit(items);
        self.notify();
    }

    fn after_travel(&mut self) {
        // Selection must name an item on the current canvas
        if let Some(id) = self.selected.clone() {
            if !self.contains(&id) {
                self.selected = None;
            }
        }
        self.notify();
    }

    fn notify(&self) {
        debug!(
            "Canvas history at {}/{} with {} items",
            self.history.index(),
            self.history.len(),
            self.items().len()
        );
        if let Some(bus) = &self.event_bus {
            bus.publish(CanvasChanged {
                history_index: self.history.index(),
                history_len: self.history.len(),
                item_count: self.items().len(),
            });
        }
    }
}

impl Default for DashboardCanvas {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn item(id: &str) -> SidebarItem {
        SidebarItem::new(id, format!("Item {id}"), ItemKind::Chart)
    }

    #[test]
    fn test_seeded_canvas() {
        let canvas = DashboardCanvas::seeded();
        assert_eq!(canvas.items().len(), 3);
        assert_eq!(canvas.history_len(), 1);
        assert!(!canvas.can_undo());
        let orders: Vec<u32> = canvas.items().iter().map(|i| i.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_order_is_max_plus_one() {
        let mut canvas = DashboardCanvas::empty();
        assert_eq!(canvas.add_item(&item("a")).unwrap().order, 0);
        assert_eq!(canvas.add_item(&item("b")).unwrap().order, 1);
        canvas.delete_item("a").unwrap();
        assert_eq!(canvas.add_item(&item("c")).unwrap().order, 2);
    }

    #[test]
    fn test_duplicate_is_rejected_without_commit() {
        let mut canvas = DashboardCanvas::empty();
        canvas.add_item(&item("a")).unwrap();
        let len = canvas.history_len();

        let err = canvas.add_item(&item("a")).unwrap_err();
        assert_eq!(err, CanvasError::DuplicateItem("a".to_string()));
        assert_eq!(canvas.items().len(), 1);
        assert_eq!(canvas.history_len(), len);
    }

    #[test]
    fn test_delete_then_undo_restores_items() {
        let mut canvas = DashboardCanvas::empty();
        canvas.add_item(&item("a")).unwrap();
        canvas.add_item(&item("b")).unwrap();
        canvas.delete_item("a").unwrap();
        assert_eq!(canvas.items().len(), 1);

        assert!(canvas.undo());
        let restored: Vec<(&str, u32)> = canvas
            .ordered_items()
            .iter()
            .map(|i| (i.id.as_str(), i.order))
            .collect();
        assert_eq!(restored, vec![("a", 0), ("b", 1)]);
    }

    #[test]
    fn test_selection_rules_on_delete() {
        let mut canvas = DashboardCanvas::empty();
        canvas.add_item(&item("a")).unwrap();
        canvas.add_item(&item("b")).unwrap();
        assert_eq!(canvas.selected(), Some("b"));

        canvas.delete_item("a").unwrap();
        assert_eq!(canvas.selected(), Some("b"));

        canvas.delete_item("b").unwrap();
        assert_eq!(canvas.selected(), None);
    }

    #[test]
    fn test_keyboard_flow() {
        let mut canvas = DashboardCanvas::seeded();
        canvas.select("default-2").unwrap();

        let delete = KeyEvent::new(Key::Delete);
        assert!(canvas.handle_key(&delete).unwrap());
        assert!(!canvas.contains("default-2"));

        // Nothing selected now, Delete is a no-op
        assert!(!canvas.handle_key(&delete).unwrap());

        let undo = KeyEvent::command(Key::Char('z'), Platform::Other);
        assert!(canvas.handle_key(&undo).unwrap());
        assert!(canvas.contains("default-2"));

        let typing = KeyEvent::command(Key::Char('y'), Platform::Other).in_text_input();
        assert!(!canvas.handle_key(&typing).unwrap());
        assert!(canvas.can_redo());
    }

    #[test]
    fn test_undo_drops_dangling_selection() {
        let mut canvas = DashboardCanvas::empty();
        canvas.add_item(&item("a")).unwrap();
        assert_eq!(canvas.selected(), Some("a"));
        canvas.undo();
        assert_eq!(canvas.selected(), None);
    }

    #[test]
    fn test_events_published() {
        let bus = Arc::new(EventBus::new());
        let counts = Arc::new(Mutex::new(Vec::new()));
        let sink = counts.clone();
        bus.subscribe_fn(move |event: &CanvasChanged| sink.lock().push(event.item_count));

        let mut canvas = DashboardCanvas::seeded().with_event_bus(bus);
        canvas.add_item(&sidebar_catalog()[3]).unwrap();
        canvas.undo();
        assert_eq!(*counts.lock(), vec![4, 3]);
    }
}
