//! The operations offered by the processing dialog

use std::fmt;
use serde::{Deserialize, Serialize};

/// Tabs of the processing dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Clean,
    Transform,
    Calculate,
    Validate,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Clean,
        Category::Transform,
        Category::Calculate,
        Category::Validate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Clean => "Clean Data",
            Category::Transform => "Transform",
            Category::Calculate => "Calculate",
            Category::Validate => "Validate",
        }
    }
}

/// How columns are picked for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnMode {
    /// Exactly one column, radio style
    Single,
    /// Any number of columns, checkbox style
    Multiple,
}

/// Stable operation identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperationId {
    RemoveDuplicates,
    TrimWhitespace,
    FillMissing,
    SplitColumn,
    MergeColumns,
    SortData,
    AddColumn,
    Aggregate,
    PercentageChange,
    DescriptiveStats,
    CheckDuplicates,
    FindMissing,
    DataQuality,
}

impl OperationId {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationId::RemoveDuplicates => "remove-duplicates",
            OperationId::TrimWhitespace => "trim-whitespace",
            OperationId::FillMissing => "fill-missing",
            OperationId::SplitColumn => "split-column",
            OperationId::MergeColumns => "merge-columns",
            OperationId::SortData => "sort-data",
            OperationId::AddColumn => "add-column",
            OperationId::Aggregate => "aggregate",
            OperationId::PercentageChange => "percentage-change",
            OperationId::DescriptiveStats => "descriptive-stats",
            OperationId::CheckDuplicates => "check-duplicates",
            OperationId::FindMissing => "find-missing",
            OperationId::DataQuality => "data-quality",
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        OPERATIONS.iter().map(|op| op.id).find(|op| op.as_str() == id)
    }

    /// Catalog entry of this operation
    pub fn entry(&self) -> &'static Operation {
        // Every id has exactly one catalog entry
        &OPERATIONS[*self as usize]
    }

    pub fn name(&self) -> &'static str {
        self.entry().name
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub id: OperationId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub needs_columns: bool,
    pub column_mode: ColumnMode,
    /// Shows extra configuration fields beyond column selection
    pub needs_config: bool,
}

const fn op(
    id: OperationId,
    name: &'static str,
    description: &'static str,
    category: Category,
    column_mode: ColumnMode,
    needs_config: bool,
) -> Operation {
    Operation {
        id,
        name,
        description,
        category,
        needs_columns: true,
        column_mode,
        needs_config,
    }
}

/// Ordered like [`OperationId`] so an id indexes its own entry
pub static OPERATIONS: [Operation; 13] = [
    op(
        OperationId::RemoveDuplicates,
        "Remove Duplicate Rows",
        "Remove rows with identical values",
        Category::Clean,
        ColumnMode::Multiple,
        false,
    ),
    op(
        OperationId::TrimWhitespace,
        "Trim Whitespace",
        "Remove leading and trailing spaces from text fields",
        Category::Clean,
        ColumnMode::Multiple,
        false,
    ),
    op(
        OperationId::FillMissing,
        "Fill Missing Values",
        "Replace null/empty values with defaults or averages",
        Category::Clean,
        ColumnMode::Multiple,
        false,
    ),
    op(
        OperationId::SplitColumn,
        "Split Column",
        "Divide one column into multiple columns by delimiter",
        Category::Transform,
        ColumnMode::Single,
        false,
    ),
    op(
        OperationId::MergeColumns,
        "Merge Columns",
        "Combine multiple columns into a single column",
        Category::Transform,
        ColumnMode::Multiple,
        false,
    ),
    op(
        OperationId::SortData,
        "Sort Data",
        "Sort rows by one or more columns",
        Category::Transform,
        ColumnMode::Single,
        false,
    ),
    op(
        OperationId::AddColumn,
        "Add Calculated Column",
        "Create new column with custom formula",
        Category::Calculate,
        ColumnMode::Multiple,
        true,
    ),
    op(
        OperationId::Aggregate,
        "Aggregate Data",
        "Calculate sum, average, min, max, count",
        Category::Calculate,
        ColumnMode::Multiple,
        true,
    ),
    op(
        OperationId::PercentageChange,
        "Percentage Change",
        "Calculate % change between two columns",
        Category::Calculate,
        ColumnMode::Multiple,
        true,
    ),
    op(
        OperationId::DescriptiveStats,
        "Descriptive Statistics",
        "Calculate mean, median, mode, and standard deviation",
        Category::Calculate,
        ColumnMode::Multiple,
        false,
    ),
    op(
        OperationId::CheckDuplicates,
        "Check for Duplicates",
        "Identify and highlight duplicate records",
        Category::Validate,
        ColumnMode::Multiple,
        false,
    ),
    op(
        OperationId::FindMissing,
        "Find Missing Values",
        "Detect empty or null cells in your data",
        Category::Validate,
        ColumnMode::Multiple,
        false,
    ),
    Operation {
        id: OperationId::DataQuality,
        name: "Data Quality Score",
        description: "Get overall data quality assessment",
        category: Category::Validate,
        needs_columns: false,
        column_mode: ColumnMode::Multiple,
        needs_config: false,
    },
];

/// Operations listed under one tab, in display order
pub fn operations_in(category: Category) -> impl Iterator<Item = &'static Operation> {
    OPERATIONS.iter().filter(move |op| op.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_index_their_entries() {
        for entry in OPERATIONS.iter() {
            assert_eq!(entry.id.entry(), entry);
            assert_eq!(OperationId::parse(entry.id.as_str()), Some(entry.id));
        }
        assert_eq!(OperationId::parse("pivot-table"), None);
    }

    #[test]
    fn test_tabs() {
        let counts: Vec<usize> = Category::ALL
            .iter()
            .map(|c| operations_in(*c).count())
            .collect();
        assert_eq!(counts, vec![3, 3, 4, 3]);

        assert_eq!(OperationId::SortData.entry().column_mode, ColumnMode::Single);
        assert!(!OperationId::DataQuality.entry().needs_columns);
        assert!(OperationId::Aggregate.entry().needs_config);
    }
}
