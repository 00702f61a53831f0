use std::time::Duration;

use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::state::{AppState, REVEAL_TICK};

// ---------------------------------------------------------------------------
// Regression plot (central panel)
// ---------------------------------------------------------------------------

/// Render the data points and the fitted curve in the central panel.
pub fn regression_plot(ui: &mut Ui, state: &mut AppState) {
    if state.calculator.points().is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Add points or open a file  (File → Open…)");
        });
        return;
    }

    let now = ui.input(|i| i.time);
    let shown = state.revealed_len(now);
    if shown < state.curve.len() {
        ui.ctx().request_repaint_after(Duration::from_secs_f64(REVEAL_TICK));
    }

    let points = state.calculator.points();
    Plot::new("regression_plot")
        .legend(Legend::default())
        .x_axis_label("x")
        .y_axis_label("y")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let data: PlotPoints = points.iter().map(|(x, y)| [x, y]).collect();
            plot_ui.points(
                Points::new(data)
                    .name("Data")
                    .color(state.theme.points)
                    .radius(4.0),
            );

            if let Some(fit) = &state.fit {
                let curve: PlotPoints = state.curve[..shown].iter().copied().collect();
                plot_ui.line(
                    Line::new(curve)
                        .name(fit.equation())
                        .color(state.theme.curve)
                        .width(2.0),
                );
            }
        });
}
