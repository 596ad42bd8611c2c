mod app;
mod chart;
mod color;
mod config;
mod data;
mod engine;
mod layout;
mod state;
mod ui;

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use app::LaunchDashApp;
use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE));

    // The dashboard has nothing to show without data: fail before any
    // window opens. The error is reported once, by `main`'s return.
    let dataset = data::loader::load_file(&config.data_path).with_context(|| {
        format!("loading launch records from {}", config.data_path.display())
    })?;
    log::info!(
        "Loaded {} launches from {} sites, payload range {}..{} kg",
        dataset.len(),
        dataset.sites().len(),
        dataset.min_payload(),
        dataset.max_payload()
    );

    let state = AppState::new(Arc::new(dataset));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &config.window_title,
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow!("running UI: {e}"))
}
