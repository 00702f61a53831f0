mod app;
mod color;
mod state;
mod ui;

use app::RustyFitApp;
use eframe::egui;
use rusty_fit::config::Settings;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = Settings::load_or_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Fit – Least Squares",
        options,
        Box::new(|_cc| Ok(Box::new(RustyFitApp::new(settings)))),
    )
}
