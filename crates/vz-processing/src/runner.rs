//! Timed progress loop that produces the results of a processing run

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use vz_core::events::events::{ProcessingCancelled, ProcessingFinished, ProcessingProgress};
use vz_core::state::ProcessingSettings;
use vz_core::EventBus;
use vz_data::SampleDataset;

use crate::catalog::OperationId;
use crate::config::OperationConfig;
use crate::results::{mock_result, DatasetShape, OperationResult};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error("Processing cancelled after {completed} of {total} operations")]
    Cancelled { completed: usize, total: usize },
}

/// Produces the result of one operation
#[async_trait]
pub trait OperationExecutor: Send + Sync {
    async fn execute(&self, operation: OperationId, config: &OperationConfig) -> OperationResult;
}

/// Executor returning the fixed result table
pub struct MockExecutor {
    shape: DatasetShape,
}

impl MockExecutor {
    pub fn new(shape: DatasetShape) -> Self {
        Self { shape }
    }

    pub fn for_dataset(dataset: &SampleDataset) -> Self {
        Self::new(DatasetShape {
            rows: dataset.row_count(),
            columns: dataset.column_count(),
        })
    }
}

#[async_trait]
impl OperationExecutor for MockExecutor {
    async fn execute(&self, operation: OperationId, config: &OperationConfig) -> OperationResult {
        mock_result(operation, config, self.shape)
    }
}

/// Shared flag used to stop a running loop
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Overall progress while operation `index` of `total` is at `step` percent
pub fn overall_progress(index: usize, total: usize, step: u8) -> u8 {
    if total == 0 {
        return 100;
    }
    ((index * 100 + step as usize) / total).min(100) as u8
}

pub struct ProcessingRunner {
    settings: ProcessingSettings,
    event_bus: Option<Arc<EventBus>>,
    cancel: CancelHandle,
    progress: watch::Sender<u8>,
}

impl ProcessingRunner {
    pub fn new(settings: ProcessingSettings) -> Self {
        let (progress, _) = watch::channel(0);
        Self {
            settings,
            event_bus: None,
            cancel: CancelHandle::default(),
            progress,
        }
    }

    pub fn with_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Handle that stops the current run at its next tick. A cancel issued
    /// before a run starts stops that run before its first tick.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Receiver of the latest overall progress
    pub fn subscribe(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    /// Run `plan` in order, ticking the progress of each operation from 0 to
    /// 100 before asking `executor` for its result.
    pub async fn run(
        &self,
        plan: &[(OperationId, OperationConfig)],
        executor: &dyn OperationExecutor,
    ) -> Result<Vec<OperationResult>, RunError> {
        let outcome = self.run_plan(plan, executor).await;
        self.cancel.reset();
        outcome
    }

    async fn run_plan(
        &self,
        plan: &[(OperationId, OperationConfig)],
        executor: &dyn OperationExecutor,
    ) -> Result<Vec<OperationResult>, RunError> {
        let total = plan.len();
        let tick = Duration::from_millis(self.settings.tick_ms);
        let step_size = self.settings.step_percent.max(1);
        let mut results = Vec::with_capacity(total);

        info!("Processing {} operation(s)", total);
        self.progress.send_replace(0);

        for (index, (operation, config)) in plan.iter().enumerate() {
            let mut step: u8 = 0;
            loop {
                if self.cancel.is_cancelled() {
                    return Err(self.cancelled(index, total));
                }

                self.report(*operation, overall_progress(index, total, step));
                tokio::time::sleep(tick).await;

                if step >= 100 {
                    break;
                }
                step = step.saturating_add(step_size).min(100);
            }

            results.push(executor.execute(*operation, config).await);
        }

        if let Some((last, _)) = plan.last() {
            self.report(*last, 100);
        }
        tokio::time::sleep(Duration::from_millis(self.settings.settle_ms)).await;

        let rows_affected = results.iter().map(|r| r.rows_affected).sum();
        info!(
            "Processing finished: {} operation(s), {} row(s) affected",
            results.len(),
            rows_affected
        );
        if let Some(bus) = &self.event_bus {
            bus.publish(ProcessingFinished {
                operations: results.len(),
                rows_affected,
            });
        }

        Ok(results)
    }

    fn report(&self, operation: OperationId, progress: u8) {
        debug!("{}: {}%", operation, progress);
        self.progress.send_replace(progress);
        if let Some(bus) = &self.event_bus {
            bus.publish(ProcessingProgress {
                operation: operation.name().to_string(),
                progress,
            });
        }
    }

    fn cancelled(&self, completed: usize, total: usize) -> RunError {
        warn!("Processing cancelled after {} of {} operations", completed, total);
        if let Some(bus) = &self.event_bus {
            bus.publish(ProcessingCancelled { completed, total });
        }
        RunError::Cancelled { completed, total }
    }
}
