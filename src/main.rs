mod app;
mod charts;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;

use app::RustyNavelApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_env();
    log::info!("Starting with dataset {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Navel – Belly Button Biodiversity",
        options,
        Box::new(move |_cc| Ok(Box::new(RustyNavelApp::new(&config)))),
    )
}
