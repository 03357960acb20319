mod app;
mod chart;
mod color;
mod config;
mod data;
mod dispatch;
mod handlers;
mod route;
mod state;
mod ui;

use app::DashboardApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.clone())
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(config)))),
    )
}
