//! Core functionality for the Vizly analytics workspace
//!
//! This crate provides the plain-data model, the undo/redo history used by
//! the dashboard canvas, the event bus, and the application session that the
//! report builder and processing pipeline hand their results to.

pub mod canvas;
pub mod events;
pub mod forms;
pub mod history;
pub mod model;
pub mod state;
pub mod workspace;

// Re-export commonly used types
pub use canvas::{
    CanvasCommand, CanvasError, CanvasItem, DashboardCanvas, ItemKind, KeyEvent, SidebarItem,
};
pub use events::EventBus;
pub use history::History;
pub use model::{ChartType, Column, ColumnType, Dashboard, DatasetRef};
pub use state::{AppSettings, AppState, AuthScreen, Screen, Session, UserPlan};
pub use workspace::{WorkspaceItem, WorkspaceItemKind, WorkspaceStore};
