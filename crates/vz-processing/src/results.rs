//! Result table produced by a processing run

use serde::Serialize;

use crate::catalog::OperationId;
use crate::config::OperationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    Warning,
    Info,
}

/// Before/after figure shown with a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: String,
    pub before: String,
    pub after: String,
}

impl Metric {
    fn new(label: &str, before: impl ToString, after: impl ToString) -> Self {
        Self {
            label: label.to_string(),
            before: before.to_string(),
            after: after.to_string(),
        }
    }
}

/// Descriptive statistics of one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnStats {
    pub column: String,
    /// (statistic, formatted value), in display order
    pub values: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResult {
    pub operation: OperationId,
    pub name: String,
    pub status: ResultStatus,
    pub rows_affected: usize,
    pub details: String,
    pub metrics: Vec<Metric>,
    /// Set for descriptive statistics only
    pub stats: Option<Vec<ColumnStats>>,
}

/// Size of the dataset the run was applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetShape {
    pub rows: usize,
    pub columns: usize,
}

/// Totals shown above the result list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsSummary {
    pub total_rows: usize,
    pub rows_affected: usize,
    pub successful: usize,
    pub operations: usize,
}

impl ResultsSummary {
    pub fn from_results(results: &[OperationResult], total_rows: usize) -> Self {
        Self {
            total_rows,
            rows_affected: results.iter().map(|r| r.rows_affected).sum(),
            successful: results
                .iter()
                .filter(|r| r.status == ResultStatus::Success)
                .count(),
            operations: results.len(),
        }
    }
}

const STAT_LABELS: [&str; 6] = ["Mean", "Median", "Mode", "Std Deviation", "Min Value", "Max Value"];

const SALES_STATS: [&str; 6] = ["$2,847.32", "$2,490.40", "$3,002.46", "$1,456.78", "$58.25", "$5,118.45"];
const PROFIT_STATS: [&str; 6] = ["$1,523.15", "$1,100.50", "$2,030.02", "$845.23", "$30.14", "$2,490.40"];
const COST_STATS: [&str; 6] = ["$1,324.17", "$1,005.89", "$972.44", "$611.55", "$28.11", "$3,476.62"];

fn column_stats(column: &str, values: &[&str; 6]) -> ColumnStats {
    ColumnStats {
        column: column.to_string(),
        values: STAT_LABELS
            .iter()
            .zip(values.iter())
            .map(|(label, value)| (label.to_string(), value.to_string()))
            .collect(),
    }
}

/// The fixed result of running `op` against a dataset of `shape`
pub fn mock_result(op: OperationId, config: &OperationConfig, shape: DatasetShape) -> OperationResult {
    let total = shape.rows;
    let selected = &config.columns;
    let columns_list = if selected.is_empty() {
        "all columns".to_string()
    } else {
        config.columns_list()
    };

    let mut stats = None;
    let (status, rows_affected, details, metrics) = match op {
        OperationId::RemoveDuplicates => (
            ResultStatus::Success,
            0,
            "Found and removed 0 duplicate rows based on all column values".to_string(),
            vec![
                Metric::new("Total Rows", total, total),
                Metric::new("Duplicates Found", 0, 0),
            ],
        ),
        OperationId::TrimWhitespace => (
            ResultStatus::Success,
            8,
            "Removed leading and trailing spaces from 8 rows across all text columns".to_string(),
            vec![Metric::new("Cells Cleaned", 45, 0)],
        ),
        OperationId::FillMissing => (
            ResultStatus::Success,
            5,
            "Filled 5 missing values with appropriate defaults".to_string(),
            vec![Metric::new("Missing Values", 5, 0)],
        ),
        OperationId::SplitColumn => (
            ResultStatus::Success,
            total,
            "Split \"Customer Name\" column into \"First Name\" and \"Last Name\"".to_string(),
            vec![Metric::new("Columns", shape.columns, shape.columns + 1)],
        ),
        OperationId::SortData => (
            ResultStatus::Success,
            total,
            "Sorted data by Date column in descending order".to_string(),
            Vec::new(),
        ),
        OperationId::AddColumn => {
            let calc = config.calculation_type.unwrap_or_default();
            let details = match config.column_name() {
                Some(name) => format!(
                    "Added calculated column \"{}\" using {} operation on columns: {}",
                    name, calc, columns_list
                ),
                None => "Added calculated column \"Profit Margin %\" based on Profit/Sales formula"
                    .to_string(),
            };
            let source_count = if selected.is_empty() {
                "2".to_string()
            } else {
                selected.len().to_string()
            };
            let calc_label = config
                .calculation_type
                .map(|c| c.to_string())
                .unwrap_or_else(|| "divide".to_string());
            (
                ResultStatus::Success,
                total,
                details,
                vec![
                    Metric::new("New Column", "N/A", config.column_name().unwrap_or("Profit Margin %")),
                    Metric::new("Calculation Type", "N/A", calc_label),
                    Metric::new("Source Columns", "N/A", source_count),
                ],
            )
        }
        OperationId::PercentageChange => {
            let details = match config.column_name() {
                Some(name) => format!(
                    "Added percentage change column \"{}\" calculating change from {} to {}",
                    name,
                    config.base().unwrap_or_default(),
                    config.compare().unwrap_or_default()
                ),
                None => "Added percentage change column calculating growth rate".to_string(),
            };
            (
                ResultStatus::Success,
                total,
                details,
                vec![
                    Metric::new("New Column", "N/A", config.column_name().unwrap_or("Percentage Change")),
                    Metric::new("Base Column", "N/A", config.base().unwrap_or("Base")),
                    Metric::new("Compare Column", "N/A", config.compare().unwrap_or("Current")),
                ],
            )
        }
        OperationId::CheckDuplicates => (
            ResultStatus::Warning,
            3,
            "Found 3 potential duplicate records. Review recommended.".to_string(),
            vec![Metric::new("Duplicate Groups", 0, 3)],
        ),
        OperationId::DataQuality => (
            ResultStatus::Success,
            total,
            "Data quality score: 94/100. Excellent data quality!".to_string(),
            vec![
                Metric::new("Quality Score", "N/A", "94/100"),
                Metric::new("Completeness", "N/A", "98%"),
                Metric::new("Accuracy", "N/A", "96%"),
            ],
        ),
        OperationId::DescriptiveStats => {
            let details = if selected.is_empty() {
                "Calculated descriptive statistics for numeric columns".to_string()
            } else {
                format!(
                    "Calculated descriptive statistics for {} column(s): {}",
                    selected.len(),
                    columns_list
                )
            };
            stats = Some(if selected.is_empty() {
                vec![
                    column_stats("Sales", &SALES_STATS),
                    column_stats("Profit", &PROFIT_STATS),
                    column_stats("Cost", &COST_STATS),
                ]
            } else {
                selected.iter().map(|c| column_stats(c, &SALES_STATS)).collect()
            });
            let metrics = STAT_LABELS
                .iter()
                .zip(SALES_STATS.iter())
                .map(|(label, value)| Metric::new(label, "N/A", value))
                .collect();
            (ResultStatus::Success, 0, details, metrics)
        }
        OperationId::MergeColumns | OperationId::Aggregate | OperationId::FindMissing => (
            ResultStatus::Success,
            total / 2,
            format!("Successfully applied {} to the dataset", op.name()),
            Vec::new(),
        ),
    };

    OperationResult {
        operation: op,
        name: op.name().to_string(),
        status,
        rows_affected,
        details,
        metrics,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigField;

    const SALES: DatasetShape = DatasetShape { rows: 15, columns: 8 };

    #[test]
    fn test_split_column_counts_columns() {
        let result = mock_result(OperationId::SplitColumn, &OperationConfig::default(), SALES);
        assert_eq!(result.rows_affected, 15);
        assert_eq!(result.metrics[0].before, "8");
        assert_eq!(result.metrics[0].after, "9");
    }

    #[test]
    fn test_add_column_details() {
        let mut config = OperationConfig::initial(OperationId::AddColumn);
        let fallback = mock_result(OperationId::AddColumn, &config, SALES);
        assert!(fallback.details.contains("Profit Margin %"));
        assert_eq!(fallback.metrics[2].after, "2");

        config.apply(ConfigField::NewColumnName("Margin".to_string()));
        config.apply(ConfigField::CalculationType(crate::config::CalculationType::Divide));
        config.columns = vec!["Profit".to_string(), "Sales".to_string()];
        let result = mock_result(OperationId::AddColumn, &config, SALES);
        assert_eq!(
            result.details,
            "Added calculated column \"Margin\" using divide operation on columns: Profit, Sales"
        );
        assert_eq!(result.metrics[1].after, "divide");
    }

    #[test]
    fn test_descriptive_stats_default_columns() {
        let result = mock_result(OperationId::DescriptiveStats, &OperationConfig::default(), SALES);
        let stats = result.stats.unwrap();
        let columns: Vec<&str> = stats.iter().map(|s| s.column.as_str()).collect();
        assert_eq!(columns, vec!["Sales", "Profit", "Cost"]);
        assert_eq!(stats[2].values[5], ("Max Value".to_string(), "$3,476.62".to_string()));
        assert_eq!(result.rows_affected, 0);
    }

    #[test]
    fn test_descriptive_stats_selected_columns() {
        let config = OperationConfig {
            columns: vec!["Cost".to_string()],
            ..OperationConfig::default()
        };
        let result = mock_result(OperationId::DescriptiveStats, &config, SALES);
        let stats = result.stats.unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].column, "Cost");
        assert_eq!(stats[0].values[0].1, "$2,847.32");
    }

    #[test]
    fn test_generic_result_is_deterministic() {
        let result = mock_result(OperationId::Aggregate, &OperationConfig::default(), SALES);
        assert_eq!(result.rows_affected, 7);
        assert_eq!(result.details, "Successfully applied Aggregate Data to the dataset");
    }

    #[test]
    fn test_summary() {
        let config = OperationConfig::default();
        let results = vec![
            mock_result(OperationId::TrimWhitespace, &config, SALES),
            mock_result(OperationId::CheckDuplicates, &config, SALES),
            mock_result(OperationId::SortData, &config, SALES),
        ];
        let summary = ResultsSummary::from_results(&results, 15);
        assert_eq!(summary.rows_affected, 8 + 3 + 15);
        assert_eq!(summary.successful, 2);
        assert_eq!(summary.operations, 3);
    }
}
