//! Save and export forms
//!
//! Confirming the form produces an [`ExportRequest`] and logs it. No file is
//! written.

use std::fmt;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use vz_core::events::{events::ExportRequested, EventBus};

/// What is being saved or exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportContext {
    Dashboard,
    Report,
    Dataset,
}

impl ExportContext {
    /// Formats offered for this context
    pub fn formats(&self) -> &'static [ExportFormat] {
        match self {
            ExportContext::Dashboard => &[ExportFormat::Pdf],
            ExportContext::Report => &[ExportFormat::Png],
            ExportContext::Dataset => &[ExportFormat::Json, ExportFormat::Excel, ExportFormat::Csv],
        }
    }
}

impl fmt::Display for ExportContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportContext::Dashboard => write!(f, "dashboard"),
            ExportContext::Report => write!(f, "report"),
            ExportContext::Dataset => write!(f, "dataset"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Pdf,
    Png,
    Json,
    Excel,
    Csv,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Pdf => write!(f, "PDF"),
            ExportFormat::Png => write!(f, "PNG"),
            ExportFormat::Json => write!(f, "JSON"),
            ExportFormat::Excel => write!(f, "Excel"),
            ExportFormat::Csv => write!(f, "CSV"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Save,
    Export,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("Name is required")]
    NameRequired,

    #[error("Please select an export format")]
    FormatRequired,

    #[error("{format} is not available when exporting a {context}")]
    FormatNotAllowed {
        format: ExportFormat,
        context: ExportContext,
    },
}

/// The confirmed form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub context: ExportContext,
    pub name: String,
    pub description: String,
    /// Set for exports, `None` for saves
    pub format: Option<ExportFormat>,
}

pub struct SaveExportForm {
    pub kind: FormKind,
    pub context: ExportContext,
    /// Export without asking for a name
    pub simple_export: bool,
    pub name: String,
    pub description: String,
    pub format: Option<ExportFormat>,
    event_bus: Option<Arc<EventBus>>,
}

impl SaveExportForm {
    pub fn save(context: ExportContext) -> Self {
        Self::new(FormKind::Save, context)
    }

    /// Export form with the context's first format preselected
    pub fn export(context: ExportContext) -> Self {
        let mut form = Self::new(FormKind::Export, context);
        form.format = context.formats().first().copied();
        form
    }

    fn new(kind: FormKind, context: ExportContext) -> Self {
        Self {
            kind,
            context,
            simple_export: false,
            name: String::new(),
            description: String::new(),
            format: None,
            event_bus: None,
        }
    }

    pub fn simple(mut self) -> Self {
        self.simple_export = true;
        self
    }

    pub fn with_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    fn name_required(&self) -> bool {
        !(self.kind == FormKind::Export && self.simple_export)
    }

    pub fn validate(&self) -> Result<(), Vec<ExportError>> {
        let mut errors = Vec::new();

        if self.name_required() && self.name.trim().is_empty() {
            errors.push(ExportError::NameRequired);
        }

        if self.kind == FormKind::Export {
            match self.format {
                None => errors.push(ExportError::FormatRequired),
                Some(format) if !self.context.formats().contains(&format) => {
                    errors.push(ExportError::FormatNotAllowed {
                        format,
                        context: self.context,
                    });
                }
                Some(_) => {}
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Confirm the form
    pub fn confirm(&self) -> Result<ExportRequest, Vec<ExportError>> {
        self.validate()?;

        let format = match self.kind {
            FormKind::Save => None,
            FormKind::Export => self.format,
        };

        match format {
            Some(format) => info!("Exporting {} '{}' as {}", self.context, self.name, format),
            None => info!("Saving {} '{}': {}", self.context, self.name, self.description),
        }

        if let Some(bus) = &self.event_bus {
            bus.publish(ExportRequested {
                context: self.context.to_string(),
                name: self.name.clone(),
                format: format.map(|f| f.to_string()),
            });
        }

        Ok(ExportRequest {
            context: self.context,
            name: self.name.clone(),
            description: self.description.clone(),
            format,
        })
    }
}
