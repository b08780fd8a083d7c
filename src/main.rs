mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{anyhow, Context};
use app::CarsDashboardApp;
use clap::Parser;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::parse();

    // The dashboard does not start without its dataset.
    let dataset = data::loader::load_file(&config.dataset)
        .with_context(|| format!("loading dataset {}", config.dataset.display()))?;
    let state = AppState::new(dataset, config.summary_options(), config.preview_rows);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width, config.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Cars Dataset 2025 – Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(CarsDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("running dashboard: {e}"))
}
