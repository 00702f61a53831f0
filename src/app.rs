use eframe::egui;

use rusty_fit::config::Settings;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyFitApp {
    pub state: AppState,
}

impl RustyFitApp {
    /// Start with the given settings, reopening the last file if it still
    /// exists.
    pub fn new(settings: Settings) -> Self {
        let mut state = AppState::new(settings);
        if let Some(path) = state.settings.last_file.clone() {
            if path.exists() {
                if let Err(e) = state.open_file(&path) {
                    log::warn!("Could not reopen {}: {e:#}", path.display());
                }
            }
        }
        Self { state }
    }
}

impl eframe::App for RustyFitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: model, points, results ----
        egui::SidePanel::left("control_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::regression_plot(ui, &mut self.state);
        });
    }
}
