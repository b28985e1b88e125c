//! Main application entry point

use anyhow::{Context, Result};
use tracing::info;

use vz_core::{AppSettings, AppState};

mod demo;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => AppSettings::load(&path)
            .with_context(|| format!("Failed to load settings from {}", path))?,
        None => AppSettings::default(),
    };

    info!("Starting {} {}", settings.app.name, settings.app.version);

    let state = AppState::new(settings);
    demo::run(&state).await.context("Demo session failed")?;

    info!("Session finished on the {} screen", state.screen());
    Ok(())
}
