//! Report configuration for the Vizly builder
//!
//! Tracks which dataset is active, which columns sit on which axis zone and
//! how the chart is drawn, and turns that configuration into a saved
//! [`vz_core::Dashboard`].

pub mod builder;
pub mod palette;
pub mod presets;

use thiserror::Error;

// Re-exports
pub use builder::{BuilderTab, ReportBuilder, Zone};
pub use palette::{palette, COLOR_SCHEMES};
pub use presets::{ChartPreset, KeyMetric, ReportKind};

/// Errors raised by the report builder
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Color scheme {0} does not exist")]
    UnknownColorScheme(usize),

    #[error("Unknown dataset: {0}")]
    UnknownDataset(u32),

    #[error("No dataset selected")]
    NoDataset,

    #[error("Column '{0}' is not part of the selected dataset")]
    UnknownColumn(String),

    #[error("Nothing is being dragged")]
    NothingDragged,
}
