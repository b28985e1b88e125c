//! Read-only summary of what the selected operations would do

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, OperationId};
use crate::config::OperationConfig;
use crate::Configs;

/// How much an operation changes the data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
    Safe,
}

impl Impact {
    pub fn label(&self) -> &'static str {
        match self {
            Impact::High => "High Impact - Will modify existing data",
            Impact::Medium => "Medium Impact - Will reorganize data",
            Impact::Low => "Low Impact - Will add new data",
            Impact::Safe => "Safe - Read only operation",
        }
    }
}

/// One row of the preview screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewItem {
    pub operation: OperationId,
    pub name: String,
    pub category: Category,
    pub impact: Impact,
    pub affected_columns: Vec<String>,
    pub details: String,
}

/// The preview screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub items: Vec<PreviewItem>,
    pub total_rows: usize,
}

impl Preview {
    pub fn build(selected: &[OperationId], configs: &Configs, total_rows: usize) -> Self {
        let empty = OperationConfig::default();
        let items = selected
            .iter()
            .map(|op| preview_item(*op, configs.get(op).unwrap_or(&empty)))
            .collect();

        Self { items, total_rows }
    }

    /// Number of items with the given impact
    pub fn count(&self, impact: Impact) -> usize {
        self.items.iter().filter(|item| item.impact == impact).count()
    }

    /// Whether any item rewrites existing data
    pub fn modifies_data(&self) -> bool {
        self.count(Impact::High) > 0
    }
}

/// Describe one operation as configured
pub fn preview_item(op: OperationId, config: &OperationConfig) -> PreviewItem {
    let columns = &config.columns;
    let first = columns.first().map(String::as_str).unwrap_or_default();
    let name = config.new_column_name.as_deref().unwrap_or_default();

    let (impact, details) = match op {
        OperationId::RemoveDuplicates => (
            Impact::High,
            format!(
                "Remove all duplicate rows based on {}. Only the first occurrence will be kept.",
                config.columns_list()
            ),
        ),
        OperationId::TrimWhitespace => (
            Impact::Medium,
            format!(
                "Remove leading and trailing whitespace from {} column(s): {}.",
                columns.len(),
                config.columns_list()
            ),
        ),
        OperationId::FillMissing => (
            Impact::Medium,
            format!(
                "Fill empty/null values in {} column(s) with default values or averages.",
                columns.len()
            ),
        ),
        OperationId::SplitColumn => (
            Impact::Medium,
            format!("Split column \"{}\" into multiple columns using a delimiter.", first),
        ),
        OperationId::MergeColumns => (
            Impact::Low,
            format!(
                "Combine {} columns ({}) into a single new column.",
                columns.len(),
                config.columns_list()
            ),
        ),
        OperationId::SortData => (
            Impact::Medium,
            format!("Sort all rows based on column \"{}\".", first),
        ),
        OperationId::AddColumn => (
            Impact::Low,
            format!(
                "Create new column \"{}\" using {} calculation on {} source column(s).",
                name,
                config.calculation_type.unwrap_or_default(),
                columns.len()
            ),
        ),
        OperationId::Aggregate => {
            let agg = config.aggregation_type.unwrap_or_default();
            let details = match config.group_by() {
                Some(group) => format!(
                    "Calculate {} of {} grouped by \"{}\".",
                    agg,
                    config.columns_list(),
                    group
                ),
                None => format!("Calculate {} of {} for all data.", agg, config.columns_list()),
            };
            (Impact::Medium, details)
        }
        OperationId::PercentageChange => (
            Impact::Low,
            format!(
                "Create new column \"{}\" showing percentage change from \"{}\" to \"{}\".",
                name,
                config.base_column.as_deref().unwrap_or_default(),
                config.compare_column.as_deref().unwrap_or_default()
            ),
        ),
        OperationId::CheckDuplicates => (
            Impact::Safe,
            format!(
                "Scan and highlight duplicate rows based on {} column(s). No data will be modified.",
                columns.len()
            ),
        ),
        OperationId::FindMissing => (
            Impact::Safe,
            format!(
                "Identify and report empty/null values in {} column(s). No data will be modified.",
                columns.len()
            ),
        ),
        OperationId::DataQuality => (
            Impact::Safe,
            "Generate comprehensive quality score for your dataset. No data will be modified."
                .to_string(),
        ),
        OperationId::DescriptiveStats => (Impact::Medium, op.entry().description.to_string()),
    };

    PreviewItem {
        operation: op,
        name: op.name().to_string(),
        category: op.entry().category,
        impact,
        affected_columns: columns.clone(),
        details,
    }
}
