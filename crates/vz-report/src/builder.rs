//! The report builder store

use std::sync::Arc;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;
use vz_core::events::{events::DashboardSaved, EventBus};
use vz_core::{ChartType, Column, Dashboard};
use vz_data::{builder_datasets, DatasetDefinition, ExportContext, SaveExportForm};

use crate::palette::{palette, COLOR_SCHEMES};
use crate::presets::ReportKind;
use crate::ReportError;

/// Drop targets for columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Labelled "Axis Y"
    AxisY,
    /// Labelled "Axis X"
    AxisX,
}

impl Zone {
    pub fn label(&self) -> &'static str {
        match self {
            Zone::AxisY => "Axis Y",
            Zone::AxisX => "Axis X",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuilderTab {
    Builder,
    Preview,
    History,
}

/// Chart configuration being edited
pub struct ReportBuilder {
    report: Option<ReportKind>,
    active_tab: BuilderTab,
    datasets: Vec<DatasetDefinition>,
    selected_dataset: Option<u32>,
    axis_y: Vec<Column>,
    axis_x: Vec<Column>,
    dragged: Option<Column>,
    chart_type: ChartType,
    color_scheme: usize,
    pub auto_save: bool,
    event_bus: Option<Arc<EventBus>>,
}

impl ReportBuilder {
    /// Builder for a new report
    pub fn new() -> Self {
        Self {
            report: None,
            active_tab: BuilderTab::Builder,
            datasets: builder_datasets(),
            selected_dataset: None,
            axis_y: Vec::new(),
            axis_x: Vec::new(),
            dragged: None,
            chart_type: ChartType::default(),
            color_scheme: 0,
            auto_save: true,
            event_bus: None,
        }
    }

    /// Builder opened on an existing report. Starts on the preview tab with
    /// the report's chart preset applied.
    pub fn for_report(name: &str) -> Self {
        let kind = ReportKind::from_name(name);
        let preset = kind.chart_preset();
        info!(
            "Opening report '{}' as {} with palette {}",
            name, preset.chart_type, preset.color_scheme
        );

        Self {
            report: Some(kind),
            active_tab: BuilderTab::Preview,
            chart_type: preset.chart_type,
            color_scheme: preset.color_scheme,
            ..Self::new()
        }
    }

    pub fn with_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn report(&self) -> Option<ReportKind> {
        self.report
    }

    pub fn active_tab(&self) -> BuilderTab {
        self.active_tab
    }

    pub fn set_tab(&mut self, tab: BuilderTab) {
        self.active_tab = tab;
    }

    pub fn datasets(&self) -> &[DatasetDefinition] {
        &self.datasets
    }

    pub fn dataset(&self) -> Option<&DatasetDefinition> {
        let id = self.selected_dataset?;
        self.datasets.iter().find(|d| d.id == id)
    }

    /// Columns offered by the selected dataset
    pub fn available_columns(&self) -> &[Column] {
        self.dataset().map(|d| d.columns.as_slice()).unwrap_or(&[])
    }

    /// Switch datasets. Zone columns the new dataset lacks are dropped.
    pub fn select_dataset(&mut self, id: u32) -> Result<(), ReportError> {
        let dataset = self
            .datasets
            .iter()
            .find(|d| d.id == id)
            .ok_or(ReportError::UnknownDataset(id))?;

        let before = self.axis_y.len() + self.axis_x.len();
        self.axis_y.retain(|c| dataset.has_column(&c.id));
        self.axis_x.retain(|c| dataset.has_column(&c.id));
        let pruned = before - self.axis_y.len() - self.axis_x.len();

        info!("Selected dataset '{}' ({} zone columns dropped)", dataset.name, pruned);
        self.selected_dataset = Some(id);
        Ok(())
    }

    pub fn zone(&self, zone: Zone) -> &[Column] {
        match zone {
            Zone::AxisY => &self.axis_y,
            Zone::AxisX => &self.axis_x,
        }
    }

    fn zone_mut(&mut self, zone: Zone) -> &mut Vec<Column> {
        match zone {
            Zone::AxisY => &mut self.axis_y,
            Zone::AxisX => &mut self.axis_x,
        }
    }

    fn lookup_column(&self, column_id: &str) -> Result<Column, ReportError> {
        let dataset = self.dataset().ok_or(ReportError::NoDataset)?;
        dataset
            .column(column_id)
            .cloned()
            .ok_or_else(|| ReportError::UnknownColumn(column_id.to_string()))
    }

    /// Append a column to a zone. Returns false if the zone already holds it.
    /// The same column may sit in both zones.
    pub fn assign_column(&mut self, zone: Zone, column_id: &str) -> Result<bool, ReportError> {
        let column = self.lookup_column(column_id)?;
        let target = self.zone_mut(zone);

        if target.iter().any(|c| c.id == column.id) {
            debug!("{} already holds '{}'", zone.label(), column.id);
            return Ok(false);
        }

        debug!("Assigned '{}' to {}", column.id, zone.label());
        target.push(column);
        Ok(true)
    }

    pub fn unassign_column(&mut self, zone: Zone, column_id: &str) -> bool {
        let target = self.zone_mut(zone);
        let before = target.len();
        target.retain(|c| c.id != column_id);
        target.len() != before
    }

    /// Pick up a column from the available list
    pub fn begin_drag(&mut self, column_id: &str) -> Result<(), ReportError> {
        self.dragged = Some(self.lookup_column(column_id)?);
        Ok(())
    }

    pub fn dragged(&self) -> Option<&Column> {
        self.dragged.as_ref()
    }

    /// Drop the dragged column on a zone. The drag ends either way.
    pub fn drop_on(&mut self, zone: Zone) -> Result<bool, ReportError> {
        let column = self.dragged.take().ok_or(ReportError::NothingDragged)?;
        self.assign_column(zone, &column.id)
    }

    pub fn cancel_drag(&mut self) {
        self.dragged = None;
    }

    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    pub fn set_chart_type(&mut self, chart_type: ChartType) {
        debug!("Chart type set to {}", chart_type);
        self.chart_type = chart_type;
    }

    pub fn color_scheme(&self) -> usize {
        self.color_scheme
    }

    pub fn set_color_scheme(&mut self, index: usize) -> Result<(), ReportError> {
        if index >= COLOR_SCHEMES.len() {
            return Err(ReportError::UnknownColorScheme(index));
        }
        self.color_scheme = index;
        Ok(())
    }

    /// Colors of the active palette
    pub fn colors(&self) -> &'static [&'static str; 5] {
        palette(self.color_scheme).unwrap_or(&COLOR_SCHEMES[0])
    }

    /// Snapshot the configuration as a dashboard
    pub fn save(&self, name: &str, description: &str) -> Dashboard {
        info!("Saving dashboard: {} {}", name, description);

        let dashboard = Dashboard {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.to_string(),
            chart_type: self.chart_type,
            color_scheme: self.color_scheme,
            axis_y: self.axis_y.clone(),
            axis_x: self.axis_x.clone(),
            dataset: self.dataset().map(DatasetDefinition::to_ref),
            created_at: Utc::now(),
        };

        if let Some(bus) = &self.event_bus {
            bus.publish(DashboardSaved {
                dashboard_id: dashboard.id.to_string(),
                name: dashboard.name.clone(),
            });
        }

        dashboard
    }

    /// Form used to export the report image
    pub fn export_form(&self) -> SaveExportForm {
        let form = SaveExportForm::export(ExportContext::Report).simple();
        match &self.event_bus {
            Some(bus) => form.with_event_bus(bus.clone()),
            None => form,
        }
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use vz_data::ExportFormat;

    fn with_dataset() -> ReportBuilder {
        let mut builder = ReportBuilder::new();
        builder.select_dataset(1).unwrap();
        builder
    }

    #[test]
    fn test_assign_dedupes_per_zone() {
        let mut builder = with_dataset();
        assert!(builder.assign_column(Zone::AxisY, "revenue").unwrap());
        assert!(!builder.assign_column(Zone::AxisY, "revenue").unwrap());
        // Both zones may hold the same column
        assert!(builder.assign_column(Zone::AxisX, "revenue").unwrap());

        assert_eq!(builder.zone(Zone::AxisY).len(), 1);
        assert_eq!(builder.zone(Zone::AxisX).len(), 1);

        assert!(builder.unassign_column(Zone::AxisY, "revenue"));
        assert!(!builder.unassign_column(Zone::AxisY, "revenue"));
        assert_eq!(builder.zone(Zone::AxisX)[0].name, "Revenue");
    }

    #[test]
    fn test_assign_requires_dataset_column() {
        let mut builder = ReportBuilder::new();
        assert_eq!(
            builder.assign_column(Zone::AxisY, "revenue"),
            Err(ReportError::NoDataset)
        );

        builder.select_dataset(1).unwrap();
        assert_eq!(
            builder.assign_column(Zone::AxisY, "churn"),
            Err(ReportError::UnknownColumn("churn".to_string()))
        );
        assert_eq!(builder.select_dataset(9), Err(ReportError::UnknownDataset(9)));
    }

    #[test]
    fn test_drag_and_drop() {
        let mut builder = with_dataset();
        assert_eq!(builder.drop_on(Zone::AxisX), Err(ReportError::NothingDragged));

        builder.begin_drag("region").unwrap();
        assert_eq!(builder.dragged().map(|c| c.id.as_str()), Some("region"));
        assert!(builder.drop_on(Zone::AxisX).unwrap());
        assert!(builder.dragged().is_none());

        builder.begin_drag("region").unwrap();
        assert!(!builder.drop_on(Zone::AxisX).unwrap());
    }

    #[test]
    fn test_switching_dataset_prunes_foreign_columns() {
        let mut builder = with_dataset();
        builder.assign_column(Zone::AxisY, "revenue").unwrap();
        builder.axis_x.push(Column::new("legacy", "Legacy", vz_core::ColumnType::Text));

        builder.select_dataset(1).unwrap();
        assert_eq!(builder.zone(Zone::AxisY).len(), 1);
        assert!(builder.zone(Zone::AxisX).is_empty());
    }

    #[test]
    fn test_report_preset_applied() {
        let builder = ReportBuilder::for_report("Category Growth Trends");
        assert_eq!(builder.chart_type(), ChartType::Area);
        assert_eq!(builder.color_scheme(), 2);
        assert_eq!(builder.active_tab(), BuilderTab::Preview);
        assert_eq!(builder.colors()[0], "#10b981");

        let fresh = ReportBuilder::new();
        assert_eq!(fresh.chart_type(), ChartType::Bar);
        assert_eq!(fresh.active_tab(), BuilderTab::Builder);
    }

    #[test]
    fn test_color_scheme_bounds() {
        let mut builder = ReportBuilder::new();
        assert!(builder.set_color_scheme(9).is_ok());
        assert_eq!(builder.set_color_scheme(10), Err(ReportError::UnknownColorScheme(10)));
        assert_eq!(builder.color_scheme(), 9);
    }

    #[test]
    fn test_save_snapshots_configuration() {
        let bus = Arc::new(EventBus::new());
        let saved = Arc::new(Mutex::new(Vec::new()));
        let sink = saved.clone();
        bus.subscribe_fn(move |event: &DashboardSaved| sink.lock().push(event.name.clone()));

        let mut builder = with_dataset().with_event_bus(bus);
        builder.assign_column(Zone::AxisY, "revenue").unwrap();
        builder.assign_column(Zone::AxisX, "region").unwrap();
        builder.set_chart_type(ChartType::Pie);

        let dashboard = builder.save("Regional revenue", "By region");
        assert_eq!(dashboard.chart_type, ChartType::Pie);
        assert_eq!(dashboard.axis_y[0].id, "revenue");
        assert_eq!(dashboard.axis_x[0].id, "region");
        assert_eq!(dashboard.dataset.as_ref().map(|d| d.id), Some(1));
        assert_eq!(*saved.lock(), vec!["Regional revenue".to_string()]);
    }

    #[test]
    fn test_export_form_is_png_only() {
        let builder = ReportBuilder::new();
        let request = builder.export_form().confirm().unwrap();
        assert_eq!(request.format, Some(ExportFormat::Png));
    }
}
