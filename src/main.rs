mod app;
mod chart;
mod config;
mod data;
mod state;
mod theme;
mod ui;

use std::path::PathBuf;

use app::HealthScatterApp;
use config::{ChartConfig, DEFAULT_DATA_PATH};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ChartConfig::load().unwrap_or_else(|e| {
        log::error!("{e:#}; using default chart config");
        ChartConfig::default()
    });

    let data_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Health Scatter – US State Survey",
        options,
        Box::new(move |_cc| Ok(Box::new(HealthScatterApp::new(config, &data_path)))),
    )
}
