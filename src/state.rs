use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use rusty_fit::config::Settings;
use rusty_fit::data::loader;
use rusty_fit::export::{self, FitReport};
use rusty_fit::regression::{sample_curve, FitResult, ModelKind, RegressionCalculator};

use crate::color::PlotTheme;

/// Seconds between two revealed samples of an animated curve.
pub const REVEAL_TICK: f64 = 0.030;

/// How much of the cached curve is on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveReveal {
    Full,
    /// Fitted, but not drawn yet.
    Pending,
    /// Revealing since the given UI time, in seconds.
    Since(f64),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Point set and fitting engine.
    pub calculator: RegressionCalculator,

    /// Model selection, tolerances and last file.
    pub settings: Settings,

    /// Result of the last successful fit (cleared whenever points change).
    pub fit: Option<FitResult>,

    /// Sampled fitted curve for plotting (cached).
    pub curve: Vec<[f64; 2]>,

    pub reveal: CurveReveal,

    /// File the points were loaded from or last saved to.
    pub current_file: Option<PathBuf>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Colours for the plot.
    pub theme: PlotTheme,

    /// Coordinates typed into the "add point" row.
    pub new_point: [f64; 2],
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            calculator: RegressionCalculator::with_tolerances(settings.tolerances),
            current_file: settings.last_file.clone(),
            settings,
            fit: None,
            curve: Vec::new(),
            reveal: CurveReveal::Full,
            status_message: None,
            theme: PlotTheme::default(),
            new_point: [0.0, 0.0],
        }
    }

    /// Drop the cached fit after the points or the model changed.
    pub fn invalidate_fit(&mut self) {
        self.fit = None;
        self.curve.clear();
        self.reveal = CurveReveal::Full;
    }

    pub fn set_model(&mut self, model: ModelKind) {
        if self.settings.model != model {
            self.settings.model = model;
            self.invalidate_fit();
        }
    }

    pub fn set_degree(&mut self, degree: usize) {
        if self.settings.degree != degree {
            self.settings.degree = degree;
            self.invalidate_fit();
        }
    }

    pub fn add_point(&mut self) {
        let [x, y] = self.new_point;
        self.calculator.push(x, y);
        self.invalidate_fit();
    }

    pub fn remove_point(&mut self, index: usize) {
        if self.calculator.points_mut().remove(index).is_some() {
            self.invalidate_fit();
        }
    }

    pub fn clear_points(&mut self) {
        self.calculator.clear();
        self.invalidate_fit();
    }

    /// Fit the selected model and resample the curve.
    pub fn compute(&mut self) {
        let model = self.settings.regression_model();
        let required = model.required_points();
        let count = self.calculator.points().len();
        if count < required {
            self.invalidate_fit();
            self.status_message = Some(format!(
                "Enter at least {required} points for this model ({count} given)"
            ));
            return;
        }

        match self.calculator.compute(model) {
            Ok(fit) => {
                log::info!("Fitted {}", fit.equation());
                self.curve = match self.calculator.points().x_range() {
                    Some((lo, hi)) => sample_curve(&fit, lo, hi, self.settings.curve_samples),
                    None => Vec::new(),
                };
                self.reveal = if self.settings.animate_curve {
                    CurveReveal::Pending
                } else {
                    CurveReveal::Full
                };
                self.fit = Some(fit);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Fit failed: {e}");
                self.invalidate_fit();
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Number of curve samples to draw at UI time `now`. The first call
    /// after an animated fit starts the clock.
    pub fn revealed_len(&mut self, now: f64) -> usize {
        let shown = match self.reveal {
            CurveReveal::Full => self.curve.len(),
            CurveReveal::Pending => {
                self.reveal = CurveReveal::Since(now);
                1
            }
            CurveReveal::Since(start) => ((now - start).max(0.0) / REVEAL_TICK) as usize + 1,
        };
        if shown >= self.curve.len() {
            self.reveal = CurveReveal::Full;
            return self.curve.len();
        }
        shown
    }

    // -- files --

    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        let points = loader::load_points(path)
            .with_context(|| format!("loading points from {}", path.display()))?;
        *self.calculator.points_mut() = points;
        self.remember_file(path);
        self.invalidate_fit();
        Ok(())
    }

    pub fn save_file(&mut self, path: &Path) -> Result<()> {
        self.calculator
            .save(path)
            .with_context(|| format!("saving points to {}", path.display()))?;
        self.remember_file(path);
        Ok(())
    }

    pub fn export_report(&self, path: &Path) -> Result<()> {
        let fit = self.fit.as_ref().context("nothing to export, compute a fit first")?;
        let report = FitReport::new(self.calculator.points(), fit);
        export::write_report(path, &report)
    }

    pub fn save_settings(&self) -> Result<()> {
        self.settings.save(&Settings::location())
    }

    fn remember_file(&mut self, path: &Path) {
        self.current_file = Some(path.to_path_buf());
        self.settings.last_file = Some(path.to_path_buf());
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_points(points: &[(f64, f64)]) -> AppState {
        let mut state = AppState::default();
        for &(x, y) in points {
            state.new_point = [x, y];
            state.add_point();
        }
        state
    }

    #[test]
    fn compute_fills_fit_and_curve() {
        let mut state = state_with_points(&[(0.0, 3.0), (1.0, 5.0), (2.0, 7.0)]);
        state.compute();
        assert!(state.fit.is_some());
        assert_eq!(state.curve.len(), state.settings.curve_samples + 1);
        assert!(state.status_message.is_none());

        state.remove_point(0);
        assert!(state.fit.is_none());
        assert!(state.curve.is_empty());
    }

    #[test]
    fn animated_curve_is_revealed_over_time() {
        let mut state = state_with_points(&[(0.0, 1.0), (1.0, 2.0), (2.0, 4.0)]);
        state.settings.animate_curve = true;
        state.compute();
        let total = state.curve.len();

        assert_eq!(state.reveal, CurveReveal::Pending);
        assert_eq!(state.revealed_len(10.0), 1);
        assert_eq!(state.revealed_len(10.0 + 5.0 * REVEAL_TICK + 0.001), 6);
        assert_eq!(state.revealed_len(100.0), total);
        assert_eq!(state.reveal, CurveReveal::Full);

        state.settings.animate_curve = false;
        state.compute();
        assert_eq!(state.revealed_len(0.0), total);
    }

    #[test]
    fn oversized_degree_from_settings_reports_status() {
        let mut state = state_with_points(&[(0.0, 1.0), (1.0, 2.0)]);
        state.set_model(ModelKind::Polynomial);
        state.set_degree(usize::MAX);
        state.compute();
        assert!(state.fit.is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn too_few_points_reports_status() {
        let mut state = state_with_points(&[(0.0, 1.0), (1.0, 2.0)]);
        state.set_model(ModelKind::Polynomial);
        state.set_degree(3);
        state.compute();
        assert!(state.fit.is_none());
        let msg = state.status_message.unwrap();
        assert!(msg.contains("at least 4"));
    }

    #[test]
    fn degenerate_fit_reports_status() {
        let mut state = state_with_points(&[(5.0, 1.0), (5.0, 2.0), (5.0, 3.0)]);
        state.compute();
        assert!(state.fit.is_none());
        assert!(state.status_message.unwrap().contains("Degenerate"));
    }

    #[test]
    fn save_open_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let ini = dir.path().join("points.ini");
        let mut state = state_with_points(&[(0.0, 1.0), (1.0, 2.0), (2.0, 2.5)]);
        state.save_file(&ini).unwrap();

        let mut reopened = AppState::default();
        reopened.open_file(&ini).unwrap();
        assert_eq!(reopened.calculator.points(), state.calculator.points());
        assert_eq!(reopened.settings.last_file.as_deref(), Some(ini.as_path()));

        let report = dir.path().join("report.json");
        assert!(reopened.export_report(&report).is_err());
        reopened.compute();
        reopened.export_report(&report).unwrap();
        assert!(report.exists());
    }
}
