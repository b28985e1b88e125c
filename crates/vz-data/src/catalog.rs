//! Datasets offered by the report builder

use vz_core::{Column, ColumnType, DatasetRef};

/// A dataset the report builder can draw columns from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetDefinition {
    pub id: u32,
    pub name: String,
    pub rows: usize,
    pub columns: Vec<Column>,
}

impl DatasetDefinition {
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn has_column(&self, id: &str) -> bool {
        self.column(id).is_some()
    }

    pub fn to_ref(&self) -> DatasetRef {
        DatasetRef {
            id: self.id,
            name: self.name.clone(),
            rows: self.rows,
        }
    }
}

pub fn builder_datasets() -> Vec<DatasetDefinition> {
    vec![DatasetDefinition {
        id: 1,
        name: "E-commerce Sales Data".to_string(),
        rows: 15,
        columns: vec![
            Column::new("product", "Product Name", ColumnType::Text),
            Column::new("category", "Category", ColumnType::Text),
            Column::new("revenue", "Revenue", ColumnType::Number),
            Column::new("quantity", "Quantity Sold", ColumnType::Number),
            Column::new("date", "Sale Date", ColumnType::Date),
            Column::new("region", "Region", ColumnType::Text),
        ],
    }]
}

pub fn find_builder_dataset(id: u32) -> Option<DatasetDefinition> {
    builder_datasets().into_iter().find(|d| d.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        let dataset = find_builder_dataset(1).unwrap();
        assert_eq!(dataset.columns.len(), 6);
        assert!(dataset.has_column("revenue"));
        assert_eq!(dataset.to_ref().rows, 15);
        assert!(find_builder_dataset(7).is_none());
    }
}
