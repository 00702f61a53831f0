use eframe::egui::{self, Color32, DragValue, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use rusty_fit::regression::ModelKind;

use crate::state::AppState;

/// Highest degree offered by the degree selector.
const MAX_DEGREE: usize = 12;

// ---------------------------------------------------------------------------
// Left side panel – model, points, results
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            model_section(ui, state);
            ui.separator();
            points_section(ui, state);
            ui.separator();

            ui.horizontal(|ui: &mut Ui| {
                if ui.button(RichText::new("Compute").strong()).clicked() {
                    state.compute();
                }
                ui.checkbox(&mut state.settings.animate_curve, "Animate curve");
            });
            ui.add_space(4.0);
            results_section(ui, state);
        });
}

fn model_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Model");

    let mut model = state.settings.model;
    ui.horizontal(|ui: &mut Ui| {
        ui.radio_value(&mut model, ModelKind::Linear, "Linear");
        ui.radio_value(&mut model, ModelKind::Polynomial, "Polynomial");
    });
    state.set_model(model);

    if model == ModelKind::Polynomial {
        let mut degree = state.settings.degree;
        ui.horizontal(|ui: &mut Ui| {
            ui.label("Degree");
            ui.add(DragValue::new(&mut degree).range(0..=MAX_DEGREE));
        });
        state.set_degree(degree);
    }
}

fn points_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading(format!("Points ({})", state.calculator.points().len()));

    let mut edited = false;
    let mut remove: Option<usize> = None;

    ui.push_id("points_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(260.0)
            .column(Column::exact(28.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::exact(24.0))
            .header(20.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("#");
                });
                header.col(|ui: &mut Ui| {
                    ui.strong("X");
                });
                header.col(|ui: &mut Ui| {
                    ui.strong("Y");
                });
                header.col(|_ui: &mut Ui| {});
            })
            .body(|mut body| {
                for (i, (x, y)) in state.calculator.points_mut().points_mut().enumerate() {
                    body.row(20.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(format!("{}", i + 1));
                        });
                        row.col(|ui: &mut Ui| {
                            edited |= ui.add(DragValue::new(x).speed(0.1)).changed();
                        });
                        row.col(|ui: &mut Ui| {
                            edited |= ui.add(DragValue::new(y).speed(0.1)).changed();
                        });
                        row.col(|ui: &mut Ui| {
                            if ui.small_button("✖").on_hover_text("Remove point").clicked() {
                                remove = Some(i);
                            }
                        });
                    });
                }
            });
    });

    if let Some(i) = remove {
        state.remove_point(i);
    } else if edited {
        state.invalidate_fit();
    }

    // ---- New point entry ----
    ui.horizontal(|ui: &mut Ui| {
        ui.label("x");
        ui.add(DragValue::new(&mut state.new_point[0]).speed(0.1));
        ui.label("y");
        ui.add(DragValue::new(&mut state.new_point[1]).speed(0.1));
        if ui.button("Add").clicked() {
            state.add_point();
        }
    });
    if ui.small_button("Clear all").clicked() {
        state.clear_points();
    }
}

fn results_section(ui: &mut Ui, state: &AppState) {
    let Some(fit) = &state.fit else {
        ui.label("No fit computed.");
        return;
    };

    ui.heading("Result");
    ui.label(RichText::new(fit.equation()).monospace());

    egui::Grid::new("coefficients")
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            for (name, value) in fit.labelled_coefficients() {
                ui.label(name);
                ui.label(RichText::new(format!("{value:.4}")).monospace());
                ui.end_row();
            }
            if let Some(r2) = fit.r_squared(state.calculator.points()) {
                ui.label("R²");
                ui.label(RichText::new(format!("{r2:.4}")).monospace());
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Save As…").clicked() {
                save_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export report…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Save settings").clicked() {
                match state.save_settings() {
                    Ok(()) => log::info!("Settings saved"),
                    Err(e) => report_error(state, "Failed to save settings", &e),
                }
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        if let Some(path) = &state.current_file {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            ui.label(name);
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open points")
        .add_filter("Supported files", &["ini", "csv"])
        .add_filter("INI", &["ini"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.open_file(&path) {
            report_error(state, "Failed to load file", &e);
        }
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let default_name = state
        .current_file
        .as_ref()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "data.ini".to_string());

    let file = rfd::FileDialog::new()
        .set_title("Save points")
        .add_filter("INI", &["ini"])
        .set_file_name(default_name)
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.save_file(&path) {
            report_error(state, "Failed to save file", &e);
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export results")
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .set_file_name("regression_results.csv")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_report(&path) {
            report_error(state, "Failed to export report", &e);
        }
    }
}

fn report_error(state: &mut AppState, what: &str, e: &anyhow::Error) {
    log::error!("{what}: {e:#}");
    state.status_message = Some(format!("Error: {e:#}"));
}
