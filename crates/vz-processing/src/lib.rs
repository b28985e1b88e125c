//! Data processing dialog for the Vizly workspace
//!
//! Users pick cleaning, transform, calculation and validation operations,
//! configure them, review a preview and run them. Running is a timed
//! progress loop that yields a fixed table of results; no rows are read or
//! written.

pub mod catalog;
pub mod config;
pub mod pipeline;
pub mod preview;
pub mod results;
pub mod runner;
pub mod validation;

use indexmap::IndexMap;

// Re-exports
pub use catalog::{operations_in, Category, ColumnMode, Operation, OperationId, OPERATIONS};
pub use config::{AggregationType, CalculationType, ConfigField, OperationConfig};
pub use pipeline::{Pipeline, PipelineError, Stage};
pub use preview::{Impact, Preview, PreviewItem};
pub use results::{ColumnStats, DatasetShape, Metric, OperationResult, ResultStatus, ResultsSummary};
pub use runner::{CancelHandle, MockExecutor, OperationExecutor, ProcessingRunner, RunError};
pub use validation::{validate, ValidationError};

/// Configuration of each selected operation, in selection order
pub type Configs = IndexMap<OperationId, OperationConfig>;
