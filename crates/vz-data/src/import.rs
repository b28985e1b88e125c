//! The two-step "import data" form
//!
//! Picking a file only records its name and size; the file is never read.

use std::fmt;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use vz_core::events::{events::DatasetImported, EventBus};

/// Accepted file families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    Excel,
    Json,
    Csv,
}

impl FileType {
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FileType::Excel => &["xlsx", "xls"],
            FileType::Json => &["json"],
            FileType::Csv => &["csv"],
        }
    }

    /// File type implied by a file name's extension
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        let ext = ext.to_ascii_lowercase();
        [FileType::Excel, FileType::Json, FileType::Csv]
            .into_iter()
            .find(|t| t.extensions().contains(&ext.as_str()))
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Excel => write!(f, "excel"),
            FileType::Json => write!(f, "json"),
            FileType::Csv => write!(f, "csv"),
        }
    }
}

/// The picked file as the host reported it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    /// Size in KB with two decimals, as shown under the file name
    pub fn size_label(&self) -> String {
        format!("{:.2} KB", self.size_bytes as f64 / 1024.0)
    }
}

/// A worksheet offered for import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub id: u32,
    pub name: String,
    pub rows: usize,
    pub columns: usize,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStep {
    Details,
    Sheets,
}

/// Field errors of the import form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Please select a file to import")]
    FileRequired,

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("Please select at least one sheet to import")]
    NoSheetSelected,
}

/// What the form hands back on submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequest {
    pub title: String,
    pub description: String,
    pub file_type: FileType,
    pub file: SelectedFile,
    /// Selected sheets, Excel only
    pub sheets: Vec<Sheet>,
}

/// Outcome of the details step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The form moved on to sheet selection
    ChooseSheets,
    /// The import is complete
    Imported(ImportRequest),
}

pub struct ImportForm {
    pub title: String,
    pub description: String,
    file_type: FileType,
    file: Option<SelectedFile>,
    step: ImportStep,
    sheets: Vec<Sheet>,
    event_bus: Option<Arc<EventBus>>,
}

impl ImportForm {
    pub fn new(file_type: FileType) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            file_type,
            file: None,
            step: ImportStep::Details,
            sheets: mock_sheets(),
            event_bus: None,
        }
    }

    pub fn with_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn step(&self) -> ImportStep {
        self.step
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        self.file = Some(file);
    }

    pub fn clear_file(&mut self) {
        self.file = None;
    }

    /// Validate every field of the details step
    pub fn validate(&self) -> Result<(), Vec<ImportError>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(ImportError::TitleRequired);
        }

        match &self.file {
            None => errors.push(ImportError::FileRequired),
            Some(file) if FileType::from_file_name(&file.name) != Some(self.file_type) => {
                errors.push(ImportError::UnsupportedFile(file.name.clone()));
            }
            Some(_) => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Submit the details step. Excel files continue to sheet selection.
    pub fn next(&mut self) -> Result<ImportOutcome, Vec<ImportError>> {
        self.validate()?;

        if self.file_type == FileType::Excel {
            self.step = ImportStep::Sheets;
            return Ok(ImportOutcome::ChooseSheets);
        }

        let file = self.file.clone().ok_or_else(|| vec![ImportError::FileRequired])?;
        Ok(ImportOutcome::Imported(self.finish(file, Vec::new())))
    }

    pub fn back(&mut self) {
        self.step = ImportStep::Details;
    }

    pub fn toggle_sheet(&mut self, id: u32) {
        if let Some(sheet) = self.sheets.iter_mut().find(|s| s.id == id) {
            sheet.selected = !sheet.selected;
        }
    }

    /// Select every sheet, or clear them all if every one is selected
    pub fn toggle_all_sheets(&mut self) {
        let all = self.sheets.iter().all(|s| s.selected);
        for sheet in &mut self.sheets {
            sheet.selected = !all;
        }
    }

    /// Submit the sheet selection step
    pub fn import_sheets(&mut self) -> Result<ImportRequest, ImportError> {
        let file = self.file.clone().ok_or(ImportError::FileRequired)?;
        let selected: Vec<Sheet> = self.sheets.iter().filter(|s| s.selected).cloned().collect();
        if selected.is_empty() {
            return Err(ImportError::NoSheetSelected);
        }
        Ok(self.finish(file, selected))
    }

    fn finish(&self, file: SelectedFile, sheets: Vec<Sheet>) -> ImportRequest {
        info!(
            "Importing '{}' from {} ({}, {} sheets)",
            self.title,
            file.name,
            self.file_type,
            sheets.len()
        );

        if let Some(bus) = &self.event_bus {
            bus.publish(DatasetImported {
                title: self.title.clone(),
                file_type: self.file_type.to_string(),
                file_name: file.name.clone(),
            });
        }

        ImportRequest {
            title: self.title.clone(),
            description: self.description.clone(),
            file_type: self.file_type,
            file,
            sheets,
        }
    }
}

fn mock_sheets() -> Vec<Sheet> {
    vec![Sheet {
        id: 1,
        name: "E-commerce Sales Data".to_string(),
        rows: 15,
        columns: 8,
        selected: false,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_detection() {
        assert_eq!(FileType::from_file_name("Q4.XLSX"), Some(FileType::Excel));
        assert_eq!(FileType::from_file_name("old.xls"), Some(FileType::Excel));
        assert_eq!(FileType::from_file_name("rows.csv"), Some(FileType::Csv));
        assert_eq!(FileType::from_file_name("notes.txt"), None);
        assert_eq!(FileType::from_file_name("noext"), None);
    }

    #[test]
    fn test_errors_reported_together() {
        let mut form = ImportForm::new(FileType::Csv);
        form.title = "   ".to_string();
        let errors = form.next().unwrap_err();
        assert_eq!(errors, vec![ImportError::TitleRequired, ImportError::FileRequired]);
        assert_eq!(errors[1].to_string(), "Please select a file to import");

        form.title = "Orders".to_string();
        form.select_file(SelectedFile::new("orders.json", 10));
        assert_eq!(
            form.validate(),
            Err(vec![ImportError::UnsupportedFile("orders.json".to_string())])
        );
    }

    #[test]
    fn test_csv_imports_directly() {
        let mut form = ImportForm::new(FileType::Csv);
        form.title = "Orders".to_string();
        form.select_file(SelectedFile::new("orders.csv", 2048));

        match form.next().unwrap() {
            ImportOutcome::Imported(request) => {
                assert_eq!(request.file.name, "orders.csv");
                assert!(request.sheets.is_empty());
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(form.file().unwrap().size_label(), "2.00 KB");
    }

    #[test]
    fn test_excel_requires_a_sheet() {
        let bus = Arc::new(EventBus::new());
        let mut form = ImportForm::new(FileType::Excel).with_event_bus(bus.clone());
        form.title = "Sales".to_string();
        form.select_file(SelectedFile::new("sales.xlsx", 512));

        assert_eq!(form.next().unwrap(), ImportOutcome::ChooseSheets);
        assert_eq!(form.step(), ImportStep::Sheets);
        assert_eq!(form.import_sheets(), Err(ImportError::NoSheetSelected));

        form.toggle_all_sheets();
        assert!(form.sheets().iter().all(|s| s.selected));
        let request = form.import_sheets().unwrap();
        assert_eq!(request.sheets.len(), 1);
        assert_eq!(request.file_type, FileType::Excel);

        form.toggle_all_sheets();
        assert!(form.sheets().iter().all(|s| !s.selected));
    }
}
