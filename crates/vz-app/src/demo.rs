//! Scripted session walking through every screen of the workspace
//!
//! Each step drives the same state objects a UI would and logs what the
//! screen would show.

use std::fmt::Display;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::info;

use vz_core::canvas::{sidebar_catalog, Key, Platform};
use vz_core::events::events::{
    CanvasChanged, DashboardSaved, DatasetImported, ExportRequested, ProcessingFinished,
    ScreenChanged,
};
use vz_core::forms;
use vz_core::{AppState, DashboardCanvas, EventBus, KeyEvent, Screen, WorkspaceItemKind, WorkspaceStore};
use vz_data::{ExportContext, FileType, ImportForm, ImportOutcome, SampleDataset, SaveExportForm, SelectedFile};
use vz_processing::{ConfigField, OperationId, Pipeline, ProcessingRunner};
use vz_report::{ReportBuilder, Zone};

/// Run the full session against `state`
pub async fn run(state: &AppState) -> Result<()> {
    log_events(&state.event_bus);

    forms::validate_sign_up("analyst", "analyst@vizly.io", "Sup3r$ecret")
        .map_err(describe)?;
    state.login();

    let mut workspace = WorkspaceStore::seeded();
    let grouped = workspace.grouped();
    info!(
        "Workspace: {} dashboards, {} reports, {} datasets",
        grouped.dashboards.len(),
        grouped.reports.len(),
        grouped.datasets.len()
    );
    workspace.add(
        "Weekly KPIs",
        WorkspaceItemKind::Report,
        Some("Headline numbers for the Monday review".to_string()),
    );
    info!("Search 'product' matched {} item(s)", workspace.search("product").len());
    state.navigate(Screen::Workspace);

    build_report(state, &workspace)?;
    edit_canvas(state)?;
    import_file(state)?;
    process_data(state).await?;

    state.logout();
    Ok(())
}

fn build_report(state: &AppState, workspace: &WorkspaceStore) -> Result<()> {
    let report = workspace
        .by_kind(Some(WorkspaceItemKind::Report))
        .into_iter()
        .next()
        .cloned()
        .ok_or_else(|| anyhow!("Workspace has no reports"))?;
    state.select_report(report.clone());

    let mut builder = ReportBuilder::for_report(&report.name).with_event_bus(state.event_bus.clone());
    builder.select_dataset(1)?;
    builder.begin_drag("revenue")?;
    builder.drop_on(Zone::AxisY)?;
    builder.assign_column(Zone::AxisX, "date")?;
    builder.set_color_scheme(3)?;
    info!(
        "Configured {} chart, colors {:?}",
        builder.chart_type(),
        builder.colors()
    );

    let dashboard = builder.save(&report.name, "Saved from the report builder");
    let request = {
        let mut form = builder.export_form().with_event_bus(state.event_bus.clone());
        form.name = report.name.clone();
        form.confirm().map_err(describe)?
    };
    info!("Report export prepared as {:?}", request.format);

    state.select_dashboard(dashboard);
    Ok(())
}

fn edit_canvas(state: &AppState) -> Result<()> {
    let dashboard = state.session.read().selected_dashboard.clone();
    let mut canvas = DashboardCanvas::open(dashboard.as_ref()).with_event_bus(state.event_bus.clone());

    for item in sidebar_catalog().iter().filter(|item| item.id != "r1") {
        canvas.add_item(item)?;
    }
    canvas.select("default-1")?;
    canvas.handle_key(&KeyEvent::new(Key::Delete))?;
    canvas.handle_key(&KeyEvent::command(Key::Char('z'), Platform::Other))?;
    canvas.handle_key(&KeyEvent::command(Key::Char('y'), Platform::Other))?;
    info!(
        "Canvas '{}' holds {} item(s) at history {}/{}",
        canvas.title(),
        canvas.items().len(),
        canvas.history_index() + 1,
        canvas.history_len()
    );

    let mut form = SaveExportForm::export(ExportContext::Dashboard).with_event_bus(state.event_bus.clone());
    form.name = canvas.title().to_string();
    form.confirm().map_err(describe)?;
    Ok(())
}

fn import_file(state: &AppState) -> Result<()> {
    let mut form = ImportForm::new(FileType::Excel).with_event_bus(state.event_bus.clone());
    form.title = "Quarterly Sales".to_string();
    form.select_file(SelectedFile::new("quarterly_sales.xlsx", 48_640));

    if let ImportOutcome::ChooseSheets = form.next().map_err(describe)? {
        form.toggle_all_sheets();
    }
    let request = form.import_sheets()?;
    info!(
        "Imported '{}' ({}), {} sheet(s)",
        request.title,
        request.file.size_label(),
        request.sheets.len()
    );
    Ok(())
}

async fn process_data(state: &AppState) -> Result<()> {
    let name = "Sales Data";
    state.select_data_source(name);
    let dataset = SampleDataset::load(name)?;
    let settings = state.settings.read().processing.clone();

    let mut pipeline = Pipeline::new(&settings);
    pipeline.open()?;
    pipeline.toggle_operation(OperationId::TrimWhitespace)?;
    pipeline.toggle_column(OperationId::TrimWhitespace, "Product")?;
    pipeline.toggle_column(OperationId::TrimWhitespace, "Customer Name")?;
    pipeline.toggle_operation(OperationId::PercentageChange)?;
    pipeline.update_config(
        OperationId::PercentageChange,
        ConfigField::NewColumnName("Margin Change".to_string()),
    )?;
    pipeline.update_config(OperationId::PercentageChange, ConfigField::BaseColumn("Cost".to_string()))?;
    pipeline.update_config(OperationId::PercentageChange, ConfigField::CompareColumn("Sales".to_string()))?;
    pipeline.toggle_operation(OperationId::DataQuality)?;

    for item in &pipeline.submit()?.items {
        info!("{} [{}]: {}", item.name, item.impact.label(), item.details);
    }

    let runner = ProcessingRunner::new(settings).with_event_bus(state.event_bus.clone());
    let summary = pipeline.process(&runner, &dataset).await?;
    info!(
        "{} of {} operation(s) succeeded, {} row(s) affected out of {}",
        summary.successful, summary.operations, summary.rows_affected, summary.total_rows
    );

    pipeline.close();
    Ok(())
}

fn log_events(bus: &Arc<EventBus>) {
    bus.subscribe_fn(|event: &ScreenChanged| info!("Screen: {} -> {}", event.from, event.to));
    bus.subscribe_fn(|event: &CanvasChanged| {
        info!(
            "Canvas changed: {} item(s), history {}/{}",
            event.item_count,
            event.history_index + 1,
            event.history_len
        )
    });
    bus.subscribe_fn(|event: &DashboardSaved| {
        info!("Dashboard saved: {} ({})", event.name, event.dashboard_id)
    });
    bus.subscribe_fn(|event: &ExportRequested| {
        info!("Export requested: {} '{}' as {:?}", event.context, event.name, event.format)
    });
    bus.subscribe_fn(|event: &DatasetImported| {
        info!("Dataset imported: {} from {} ({})", event.title, event.file_name, event.file_type)
    });
    bus.subscribe_fn(|event: &ProcessingFinished| {
        info!("Processing finished: {} operation(s)", event.operations)
    });
}

fn describe<E: Display>(errors: Vec<E>) -> anyhow::Error {
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    anyhow!(messages.join("; "))
}
