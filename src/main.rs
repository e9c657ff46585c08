mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{anyhow, Context};
use app::LaunchDashboardApp;
use clap::Parser;
use config::{Cli, DashboardConfig};
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::from(Cli::parse());

    env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .init();

    // Load before opening the window: a bad data file never starts a dashboard.
    let dataset = data::loader::load_file(&config.data_path)
        .inspect_err(|e| log::error!("Failed to load {}: {e}", config.data_path.display()))
        .with_context(|| format!("loading launch records from {}", config.data_path.display()))?;

    let bounds = dataset.bounds();
    log::info!(
        "Loaded {} launches from {} sites {:?}, payload {} - {} kg",
        dataset.len(),
        dataset.sites().len(),
        dataset.sites().iter().map(|s| s.as_str()).collect::<Vec<_>>(),
        bounds.min,
        bounds.max
    );

    let state = AppState::new(dataset, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}
