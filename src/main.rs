mod app;
mod color;
mod state;
mod ui;

use app::LabLookupApp;
use eframe::egui;
use lab_lookup::config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size(config.inner_size)
            .with_min_inner_size(config.min_inner_size),
        ..Default::default()
    };

    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(LabLookupApp::new(config)))),
    )
}
