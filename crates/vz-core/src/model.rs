//! Plain data shared between the builder screens

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Value type of a dataset column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Number,
    Date,
    Boolean,
}

/// One field of a dataset. Immutable once the dataset is defined.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(id: impl Into<String>, name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            column_type,
        }
    }
}

/// Chart types offered by the report builder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartType {
    #[default]
    #[serde(rename = "bar-chart")]
    Bar,
    #[serde(rename = "line-chart")]
    Line,
    #[serde(rename = "pie-chart")]
    Pie,
    #[serde(rename = "area-chart")]
    Area,
}

impl ChartType {
    pub const ALL: [ChartType; 4] = [ChartType::Bar, ChartType::Line, ChartType::Pie, ChartType::Area];

    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar-chart",
            ChartType::Line => "line-chart",
            ChartType::Pie => "pie-chart",
            ChartType::Area => "area-chart",
        }
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Bar => "Bar Chart",
            ChartType::Line => "Line Chart",
            ChartType::Pie => "Pie Chart",
            ChartType::Area => "Area Chart",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reference to the dataset a report was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRef {
    pub id: u32,
    pub name: String,
    pub rows: usize,
}

/// A saved report configuration, handed from the report builder to the
/// dashboard screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub chart_type: ChartType,
    pub color_scheme: usize,
    /// Columns dropped on the "Axis Y" zone
    pub axis_y: Vec<Column>,
    /// Columns dropped on the "Axis X" zone
    pub axis_x: Vec<Column>,
    pub dataset: Option<DatasetRef>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_type_ids_round_trip() {
        for chart in ChartType::ALL {
            assert_eq!(ChartType::from_id(chart.id()), Some(chart));
        }
        assert_eq!(ChartType::from_id("donut"), None);
    }

    #[test]
    fn test_column_serializes_type_field() {
        let column = Column::new("revenue", "Revenue", ColumnType::Number);
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["type"], "number");
        assert_eq!(json["name"], "Revenue");
    }
}
