//! Stages of the processing dialog
//!
//! ```text
//! Idle -> Selecting -> Review -> Processing -> Results -> Idle
//!            ^___________|           |
//!            ^_______________________| (cancelled)
//! ```

use thiserror::Error;
use tracing::{debug, info};

use vz_core::state::ProcessingSettings;
use vz_data::SampleDataset;

use crate::catalog::{Category, ColumnMode, OperationId};
use crate::config::{ConfigField, OperationConfig};
use crate::preview::Preview;
use crate::results::{OperationResult, ResultsSummary};
use crate::runner::{MockExecutor, ProcessingRunner, RunError};
use crate::validation::{validate, ValidationError};
use crate::Configs;

#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Idle,
    Selecting,
    Review(Preview),
    Processing,
    Results {
        results: Vec<OperationResult>,
        summary: ResultsSummary,
    },
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Selecting => "selecting",
            Stage::Review(_) => "review",
            Stage::Processing => "processing",
            Stage::Results { .. } => "results",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Cannot {action} during the {stage} stage")]
    InvalidTransition {
        action: &'static str,
        stage: &'static str,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Run(#[from] RunError),
}

/// Selection, configuration and stage of one processing session
#[derive(Debug, Clone)]
pub struct Pipeline {
    stage: Stage,
    active_tab: Category,
    selected: Vec<OperationId>,
    expanded: Option<OperationId>,
    configs: Configs,
    preview_rows: usize,
}

impl Pipeline {
    pub fn new(settings: &ProcessingSettings) -> Self {
        Self {
            stage: Stage::Idle,
            active_tab: Category::Clean,
            selected: Vec::new(),
            expanded: None,
            configs: Configs::new(),
            preview_rows: settings.preview_total_rows,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn active_tab(&self) -> Category {
        self.active_tab
    }

    pub fn set_tab(&mut self, tab: Category) {
        self.active_tab = tab;
    }

    /// Selected operations in the order they were picked
    pub fn selected(&self) -> &[OperationId] {
        &self.selected
    }

    pub fn is_selected(&self, operation: OperationId) -> bool {
        self.selected.contains(&operation)
    }

    /// Operation whose configuration panel is open
    pub fn expanded(&self) -> Option<OperationId> {
        self.expanded
    }

    pub fn config(&self, operation: OperationId) -> Option<&OperationConfig> {
        self.configs.get(&operation)
    }

    pub fn configs(&self) -> &Configs {
        &self.configs
    }

    /// The preview, while in review
    pub fn preview(&self) -> Option<&Preview> {
        match &self.stage {
            Stage::Review(preview) => Some(preview),
            _ => None,
        }
    }

    /// The results, once processing finished
    pub fn results(&self) -> Option<(&[OperationResult], &ResultsSummary)> {
        match &self.stage {
            Stage::Results { results, summary } => Some((results.as_slice(), summary)),
            _ => None,
        }
    }

    /// Open the dialog
    pub fn open(&mut self) -> Result<(), PipelineError> {
        self.require(matches!(self.stage, Stage::Idle), "open the dialog")?;
        self.transition(Stage::Selecting);
        Ok(())
    }

    /// Select or deselect an operation. Returns whether it is now selected.
    pub fn toggle_operation(&mut self, operation: OperationId) -> Result<bool, PipelineError> {
        self.require_selecting("change the selection")?;

        if let Some(pos) = self.selected.iter().position(|op| *op == operation) {
            self.selected.remove(pos);
            self.configs.shift_remove(&operation);
            if self.expanded == Some(operation) {
                self.expanded = None;
            }
            debug!("Deselected {}", operation);
            Ok(false)
        } else {
            self.selected.push(operation);
            self.configs.insert(operation, OperationConfig::initial(operation));
            self.expanded = Some(operation);
            debug!("Selected {}", operation);
            Ok(true)
        }
    }

    /// Open or close the configuration panel of an operation
    pub fn toggle_expanded(&mut self, operation: OperationId) {
        self.expanded = if self.expanded == Some(operation) {
            None
        } else {
            Some(operation)
        };
    }

    /// Overwrite one configuration field. Values are not checked until submit.
    pub fn update_config(
        &mut self,
        operation: OperationId,
        field: ConfigField,
    ) -> Result<(), PipelineError> {
        self.require_selecting("edit a configuration")?;
        self.configs
            .entry(operation)
            .or_insert_with(|| OperationConfig::initial(operation))
            .apply(field);
        Ok(())
    }

    /// Pick a column for an operation: replaces the choice for single-column
    /// operations, toggles membership otherwise.
    pub fn toggle_column(&mut self, operation: OperationId, column: &str) -> Result<(), PipelineError> {
        self.require_selecting("edit a configuration")?;
        let config = self
            .configs
            .entry(operation)
            .or_insert_with(|| OperationConfig::initial(operation));

        match operation.entry().column_mode {
            ColumnMode::Single => config.columns = vec![column.to_string()],
            ColumnMode::Multiple => {
                if let Some(pos) = config.columns.iter().position(|c| c == column) {
                    config.columns.remove(pos);
                } else {
                    config.columns.push(column.to_string());
                }
            }
        }
        Ok(())
    }

    /// Validate the selection and show the preview
    pub fn submit(&mut self) -> Result<&Preview, PipelineError> {
        self.require_selecting("preview the operations")?;
        validate(&self.selected, &self.configs)?;

        let preview = Preview::build(&self.selected, &self.configs, self.preview_rows);
        info!(
            "Previewing {} operation(s), {} high impact",
            preview.items.len(),
            preview.count(crate::preview::Impact::High)
        );
        self.transition(Stage::Review(preview));
        self.preview().ok_or_else(|| self.invalid("preview the operations"))
    }

    /// Leave the preview and keep editing
    pub fn back(&mut self) -> Result<(), PipelineError> {
        self.require(matches!(self.stage, Stage::Review(_)), "go back to editing")?;
        self.transition(Stage::Selecting);
        Ok(())
    }

    /// Accept the preview. Returns the operations to run, in order, with
    /// their configuration.
    pub fn confirm(&mut self) -> Result<Vec<(OperationId, OperationConfig)>, PipelineError> {
        self.require(matches!(self.stage, Stage::Review(_)), "start processing")?;
        let plan = self
            .selected
            .iter()
            .map(|op| (*op, self.configs.get(op).cloned().unwrap_or_default()))
            .collect();
        self.transition(Stage::Processing);
        Ok(plan)
    }

    /// Store the results of a completed run
    pub fn finish(
        &mut self,
        results: Vec<OperationResult>,
        total_rows: usize,
    ) -> Result<&ResultsSummary, PipelineError> {
        self.require(matches!(self.stage, Stage::Processing), "show results")?;
        let summary = ResultsSummary::from_results(&results, total_rows);
        self.transition(Stage::Results { results, summary });
        self.results()
            .map(|(_, summary)| summary)
            .ok_or_else(|| self.invalid("show results"))
    }

    /// Return to editing after an interrupted run, keeping the selection
    pub fn cancelled(&mut self) -> Result<(), PipelineError> {
        self.require(matches!(self.stage, Stage::Processing), "cancel processing")?;
        self.transition(Stage::Selecting);
        Ok(())
    }

    /// Close the dialog and forget the session
    pub fn close(&mut self) {
        self.selected.clear();
        self.configs.clear();
        self.expanded = None;
        self.active_tab = Category::Clean;
        self.transition(Stage::Idle);
    }

    /// Confirm the preview and run it against `dataset`
    pub async fn process(
        &mut self,
        runner: &ProcessingRunner,
        dataset: &SampleDataset,
    ) -> Result<ResultsSummary, PipelineError> {
        let plan = self.confirm()?;
        let executor = MockExecutor::for_dataset(dataset);

        match runner.run(&plan, &executor).await {
            Ok(results) => self.finish(results, dataset.row_count()).cloned(),
            Err(err) => {
                self.cancelled()?;
                Err(err.into())
            }
        }
    }

    fn require_selecting(&self, action: &'static str) -> Result<(), PipelineError> {
        self.require(matches!(self.stage, Stage::Selecting), action)
    }

    fn require(&self, allowed: bool, action: &'static str) -> Result<(), PipelineError> {
        if allowed {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> PipelineError {
        PipelineError::InvalidTransition {
            action,
            stage: self.stage.name(),
        }
    }

    fn transition(&mut self, to: Stage) {
        info!("Processing stage: {} -> {}", self.stage.name(), to.name());
        self.stage = to;
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(&ProcessingSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vz_core::events::events::ProcessingProgress;
    use vz_core::EventBus;

    fn selecting() -> Pipeline {
        let mut pipeline = Pipeline::default();
        pipeline.open().unwrap();
        pipeline
    }

    fn instant_runner() -> ProcessingRunner {
        ProcessingRunner::new(ProcessingSettings {
            tick_ms: 0,
            settle_ms: 0,
            ..ProcessingSettings::default()
        })
    }

    #[test]
    fn test_missing_columns_blocks_preview() {
        let mut pipeline = selecting();
        pipeline.toggle_operation(OperationId::RemoveDuplicates).unwrap();

        let err = pipeline.submit().unwrap_err();
        assert_eq!(
            err,
            PipelineError::Validation(ValidationError::MissingColumns(OperationId::RemoveDuplicates))
        );
        assert_eq!(pipeline.stage(), &Stage::Selecting);
    }

    #[test]
    fn test_add_column_needs_name_and_sources() {
        let mut pipeline = selecting();
        pipeline.toggle_operation(OperationId::AddColumn).unwrap();
        pipeline.toggle_column(OperationId::AddColumn, "Profit").unwrap();
        assert!(pipeline.submit().is_err());

        pipeline
            .update_config(OperationId::AddColumn, ConfigField::NewColumnName("Margin".to_string()))
            .unwrap();
        pipeline.toggle_column(OperationId::AddColumn, "Profit").unwrap();
        assert_eq!(
            pipeline.submit().unwrap_err(),
            PipelineError::Validation(ValidationError::MissingSourceColumns)
        );
        assert_eq!(pipeline.stage().name(), "selecting");

        pipeline.toggle_column(OperationId::AddColumn, "Sales").unwrap();
        assert_eq!(pipeline.submit().unwrap().items.len(), 1);
    }

    #[test]
    fn test_toggle_operation_expands_and_clears() {
        let mut pipeline = selecting();
        assert!(pipeline.toggle_operation(OperationId::Aggregate).unwrap());
        assert_eq!(pipeline.expanded(), Some(OperationId::Aggregate));
        assert!(pipeline.config(OperationId::Aggregate).unwrap().aggregation_type.is_some());

        pipeline.toggle_column(OperationId::Aggregate, "Sales").unwrap();
        assert!(!pipeline.toggle_operation(OperationId::Aggregate).unwrap());
        assert_eq!(pipeline.expanded(), None);
        assert!(pipeline.config(OperationId::Aggregate).is_none());

        // Reselecting starts from a fresh config
        pipeline.toggle_operation(OperationId::Aggregate).unwrap();
        assert!(pipeline.config(OperationId::Aggregate).unwrap().columns.is_empty());
    }

    #[test]
    fn test_single_column_mode_keeps_one() {
        let mut pipeline = selecting();
        pipeline.toggle_operation(OperationId::SortData).unwrap();
        for column in ["Date", "Sales", "Sales", "Region"] {
            pipeline.toggle_column(OperationId::SortData, column).unwrap();
            assert_eq!(pipeline.config(OperationId::SortData).unwrap().columns.len(), 1);
        }
        assert_eq!(pipeline.config(OperationId::SortData).unwrap().columns, vec!["Region"]);

        pipeline.toggle_operation(OperationId::TrimWhitespace).unwrap();
        pipeline.toggle_column(OperationId::TrimWhitespace, "Product").unwrap();
        pipeline.toggle_column(OperationId::TrimWhitespace, "Region").unwrap();
        pipeline.toggle_column(OperationId::TrimWhitespace, "Product").unwrap();
        assert_eq!(
            pipeline.config(OperationId::TrimWhitespace).unwrap().columns,
            vec!["Region"]
        );
    }

    #[test]
    fn test_edits_only_while_selecting() {
        let mut pipeline = Pipeline::default();
        assert!(matches!(
            pipeline.toggle_operation(OperationId::SortData),
            Err(PipelineError::InvalidTransition { stage: "idle", .. })
        ));

        pipeline.open().unwrap();
        pipeline.toggle_operation(OperationId::DataQuality).unwrap();
        pipeline.submit().unwrap();
        assert!(pipeline.toggle_column(OperationId::DataQuality, "Sales").is_err());
        assert!(pipeline.open().is_err());

        pipeline.back().unwrap();
        assert!(pipeline.preview().is_none());
        assert!(pipeline.is_selected(OperationId::DataQuality));
    }

    #[tokio::test]
    async fn test_process_to_results() {
        let mut pipeline = selecting();
        pipeline.toggle_operation(OperationId::TrimWhitespace).unwrap();
        pipeline.toggle_column(OperationId::TrimWhitespace, "Product").unwrap();
        pipeline.toggle_operation(OperationId::CheckDuplicates).unwrap();
        pipeline.toggle_column(OperationId::CheckDuplicates, "Date").unwrap();
        assert_eq!(pipeline.submit().unwrap().total_rows, 15);

        let dataset = SampleDataset::load("Sales Data").unwrap();
        let summary = pipeline.process(&instant_runner(), &dataset).await.unwrap();
        assert_eq!(summary.operations, 2);
        assert_eq!(summary.successful, 1);
        assert_eq!(summary.rows_affected, 11);

        let (results, _) = pipeline.results().unwrap();
        assert_eq!(results[1].operation, OperationId::CheckDuplicates);

        pipeline.close();
        assert_eq!(pipeline.stage(), &Stage::Idle);
        assert!(pipeline.selected().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_keeps_selection() {
        let bus = Arc::new(EventBus::new());
        let runner = instant_runner().with_event_bus(bus.clone());
        let cancel = runner.cancel_handle();
        bus.subscribe_fn(move |event: &ProcessingProgress| {
            if event.progress >= 50 {
                cancel.cancel();
            }
        });

        let mut pipeline = selecting();
        pipeline.toggle_operation(OperationId::DataQuality).unwrap();
        pipeline.toggle_operation(OperationId::DescriptiveStats).unwrap();
        pipeline.submit().unwrap();

        let dataset = SampleDataset::load("Sales Data").unwrap();
        let err = pipeline.process(&runner, &dataset).await.unwrap_err();

        assert!(matches!(err, PipelineError::Run(RunError::Cancelled { total: 2, .. })));
        assert_eq!(pipeline.stage(), &Stage::Selecting);
        assert_eq!(
            pipeline.selected(),
            &[OperationId::DataQuality, OperationId::DescriptiveStats]
        );
        assert!(pipeline.config(OperationId::DescriptiveStats).is_some());
    }
}
