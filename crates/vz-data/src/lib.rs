//! Sample data and the data-entry forms of the Vizly workspace
//!
//! Nothing here touches user files: the sample datasets are embedded CSV,
//! the import form only validates and hands back what was picked, and the
//! export form only describes what would be written.

pub mod catalog;
pub mod export;
pub mod import;
pub mod samples;

use thiserror::Error;

// Re-exports
pub use catalog::{builder_datasets, find_builder_dataset, DatasetDefinition};
pub use export::{ExportContext, ExportError, ExportFormat, ExportRequest, FormKind, SaveExportForm};
pub use import::{
    FileType, ImportError, ImportForm, ImportOutcome, ImportRequest, ImportStep, SelectedFile, Sheet,
};
pub use samples::{SampleDataset, SAMPLE_NAMES};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),

    #[error("Row {row} has {found} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        DataError::Csv(error.to_string())
    }
}
