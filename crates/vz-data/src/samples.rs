//! Embedded sample datasets shown in the data view

use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::{debug, warn};
use vz_core::{Column, ColumnType};

use crate::DataError;

const SALES_DATA: &str = include_str!("../data/sales_data.csv");
const CUSTOMER_DATA: &str = include_str!("../data/customer_data.csv");
const PRODUCT_INVENTORY: &str = include_str!("../data/product_inventory.csv");

/// Names of the bundled datasets. The first one is the fallback.
pub const SAMPLE_NAMES: [&str; 3] = ["Sales Data", "Customer Data", "Product Inventory"];

const DATE_FORMATS: [&str; 2] = ["%d %b, %Y", "%Y-%m-%d"];

/// A small in-memory table with string cells
#[derive(Debug, Clone, PartialEq)]
pub struct SampleDataset {
    pub name: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl SampleDataset {
    /// Load a bundled dataset by name
    pub fn get(name: &str) -> Result<Self, DataError> {
        let text = match name {
            "Sales Data" => SALES_DATA,
            "Customer Data" => CUSTOMER_DATA,
            "Product Inventory" => PRODUCT_INVENTORY,
            other => return Err(DataError::UnknownDataset(other.to_string())),
        };
        Self::parse(name, text)
    }

    /// Load a bundled dataset, falling back to the sales data for unknown
    /// names
    pub fn load(name: &str) -> Result<Self, DataError> {
        match Self::get(name) {
            Err(DataError::UnknownDataset(_)) => {
                warn!("No sample data named '{}', showing {}", name, SAMPLE_NAMES[0]);
                Self::get(SAMPLE_NAMES[0])
            }
            other => other,
        }
    }

    /// Parse a CSV document with a header row
    pub fn parse(name: &str, text: &str) -> Result<Self, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            if record.len() != headers.len() {
                return Err(DataError::RaggedRow {
                    row: idx + 1,
                    found: record.len(),
                    expected: headers.len(),
                });
            }
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        let columns = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| Column::new(column_id(header), header, detect_column_type(&rows, idx)))
            .collect();

        debug!("Parsed sample '{}' with {} rows", name, rows.len());

        Ok(Self {
            name: name.to_string(),
            columns,
            rows,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Cell values of one column, by column name
    pub fn column_values(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.columns.iter().position(|c| c.name == name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }
}

fn column_id(header: &str) -> String {
    header.to_lowercase().replace(' ', "-")
}

/// Currency-formatted cells count as numbers
fn parse_number(value: &str) -> Option<f64> {
    value
        .trim_start_matches('$')
        .replace(',', "")
        .parse::<f64>()
        .ok()
}

fn is_date(value: &str) -> bool {
    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(value, fmt).is_ok())
}

/// Detect column type from the cell values
fn detect_column_type(rows: &[Vec<String>], col_idx: usize) -> ColumnType {
    let mut is_number = true;
    let mut is_date_col = true;
    let mut is_bool = true;
    let mut seen = false;

    for value in rows.iter().filter_map(|row| row.get(col_idx)) {
        if value.is_empty() {
            continue;
        }
        seen = true;

        if is_number && parse_number(value).is_none() {
            is_number = false;
        }
        if is_date_col && !is_date(value) {
            is_date_col = false;
        }
        if is_bool && !matches!(value.to_lowercase().as_str(), "true" | "false") {
            is_bool = false;
        }
    }

    if !seen {
        ColumnType::Text
    } else if is_number {
        ColumnType::Number
    } else if is_date_col {
        ColumnType::Date
    } else if is_bool {
        ColumnType::Boolean
    } else {
        ColumnType::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_shapes() {
        let sales = SampleDataset::get("Sales Data").unwrap();
        assert_eq!(sales.column_count(), 8);
        assert_eq!(sales.row_count(), 15);
        assert_eq!(sales.rows[0][0], "04 Jun, 2018");

        let customers = SampleDataset::get("Customer Data").unwrap();
        assert_eq!((customers.column_count(), customers.row_count()), (6, 10));

        let inventory = SampleDataset::get("Product Inventory").unwrap();
        assert_eq!((inventory.column_count(), inventory.row_count()), (6, 10));
    }

    #[test]
    fn test_unknown_name_falls_back() {
        assert!(matches!(
            SampleDataset::get("Weather"),
            Err(DataError::UnknownDataset(_))
        ));
        let data = SampleDataset::load("Weather").unwrap();
        assert_eq!(data.name, "Sales Data");
    }

    #[test]
    fn test_detected_types() {
        let sales = SampleDataset::get("Sales Data").unwrap();
        let types: Vec<ColumnType> = sales.columns.iter().map(|c| c.column_type).collect();
        assert_eq!(types[0], ColumnType::Date);
        assert_eq!(types[1], ColumnType::Text);
        assert_eq!(types[5], ColumnType::Number);
        assert_eq!(sales.columns[2].id, "product-category");

        let inventory = SampleDataset::get("Product Inventory").unwrap();
        assert_eq!(inventory.columns[3].column_type, ColumnType::Number);
    }

    #[test]
    fn test_ragged_row_rejected() {
        let result = SampleDataset::parse("bad", "a,b\n1,2\n3\n");
        assert!(matches!(
            result,
            Err(DataError::RaggedRow {
                row: 2,
                found: 1,
                expected: 2
            })
        ));
    }

    #[test]
    fn test_column_values() {
        let customers = SampleDataset::get("Customer Data").unwrap();
        let status = customers.column_values("Status").unwrap();
        assert_eq!(status.iter().filter(|s| **s == "Inactive").count(), 1);
        assert!(customers.column_values("Nope").is_none());
    }
}
