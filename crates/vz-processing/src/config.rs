//! Per-operation configuration

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::catalog::OperationId;

/// Formula used by "Add Calculated Column"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationType {
    #[default]
    Add,
    Subtract,
    Multiply,
    Divide,
    Average,
    Percentage,
    Concat,
    Custom,
}

impl fmt::Display for CalculationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalculationType::Add => "add",
            CalculationType::Subtract => "subtract",
            CalculationType::Multiply => "multiply",
            CalculationType::Divide => "divide",
            CalculationType::Average => "average",
            CalculationType::Percentage => "percentage",
            CalculationType::Concat => "concat",
            CalculationType::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// Reduction used by "Aggregate Data"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationType {
    #[default]
    Sum,
    Average,
    Count,
    Min,
    Max,
    Median,
}

impl fmt::Display for AggregationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AggregationType::Sum => "sum",
            AggregationType::Average => "average",
            AggregationType::Count => "count",
            AggregationType::Min => "min",
            AggregationType::Max => "max",
            AggregationType::Median => "median",
        };
        f.write_str(name)
    }
}

/// Configuration of one selected operation. Only the fields the operation
/// uses are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationConfig {
    pub columns: Vec<String>,
    pub new_column_name: Option<String>,
    pub calculation_type: Option<CalculationType>,
    pub custom_formula: Option<String>,
    pub aggregation_type: Option<AggregationType>,
    pub group_by_column: Option<String>,
    pub base_column: Option<String>,
    pub compare_column: Option<String>,
}

/// A single field update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigField {
    Columns(Vec<String>),
    NewColumnName(String),
    CalculationType(CalculationType),
    CustomFormula(String),
    AggregationType(AggregationType),
    GroupByColumn(String),
    BaseColumn(String),
    CompareColumn(String),
}

impl OperationConfig {
    /// Config an operation starts with when it is selected. No columns are
    /// picked yet.
    pub fn initial(operation: OperationId) -> Self {
        let mut config = Self::default();

        match operation {
            OperationId::AddColumn => {
                config.new_column_name = Some(String::new());
                config.calculation_type = Some(CalculationType::Add);
            }
            OperationId::Aggregate => {
                config.aggregation_type = Some(AggregationType::Sum);
                config.group_by_column = Some(String::new());
            }
            OperationId::PercentageChange => {
                config.new_column_name = Some(String::new());
                config.base_column = Some(String::new());
                config.compare_column = Some(String::new());
            }
            _ => {}
        }

        config
    }

    /// Overwrite one field, leaving the rest untouched
    pub fn apply(&mut self, field: ConfigField) {
        match field {
            ConfigField::Columns(columns) => self.columns = columns,
            ConfigField::NewColumnName(name) => self.new_column_name = Some(name),
            ConfigField::CalculationType(calc) => self.calculation_type = Some(calc),
            ConfigField::CustomFormula(formula) => self.custom_formula = Some(formula),
            ConfigField::AggregationType(agg) => self.aggregation_type = Some(agg),
            ConfigField::GroupByColumn(column) => self.group_by_column = Some(column),
            ConfigField::BaseColumn(column) => self.base_column = Some(column),
            ConfigField::CompareColumn(column) => self.compare_column = Some(column),
        }
    }

    /// `new_column_name`, if set to something other than blanks
    pub fn column_name(&self) -> Option<&str> {
        non_blank(self.new_column_name.as_deref())
    }

    pub fn base(&self) -> Option<&str> {
        non_empty(self.base_column.as_deref())
    }

    pub fn compare(&self) -> Option<&str> {
        non_empty(self.compare_column.as_deref())
    }

    pub fn group_by(&self) -> Option<&str> {
        non_empty(self.group_by_column.as_deref())
    }

    /// Selected columns joined for display
    pub fn columns_list(&self) -> String {
        self.columns.join(", ")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_fields() {
        let add = OperationConfig::initial(OperationId::AddColumn);
        assert_eq!(add.calculation_type, Some(CalculationType::Add));
        assert_eq!(add.new_column_name.as_deref(), Some(""));
        assert!(add.columns.is_empty());

        let agg = OperationConfig::initial(OperationId::Aggregate);
        assert_eq!(agg.aggregation_type, Some(AggregationType::Sum));
        assert_eq!(agg.group_by(), None);

        let plain = OperationConfig::initial(OperationId::TrimWhitespace);
        assert_eq!(plain, OperationConfig::default());
    }

    #[test]
    fn test_apply_merges_one_field() {
        let mut config = OperationConfig::initial(OperationId::PercentageChange);
        config.apply(ConfigField::NewColumnName("  ".to_string()));
        assert_eq!(config.column_name(), None);

        config.apply(ConfigField::BaseColumn("Cost".to_string()));
        config.apply(ConfigField::NewColumnName("Growth".to_string()));
        assert_eq!(config.column_name(), Some("Growth"));
        assert_eq!(config.base(), Some("Cost"));
        assert_eq!(config.compare(), None);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(CalculationType::Divide.to_string(), "divide");
        assert_eq!(AggregationType::Median.to_string(), "median");
    }
}
