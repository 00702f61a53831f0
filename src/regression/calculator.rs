use std::path::Path;

use super::error::Result;
use super::linear::fit_linear;
use super::model::{FitResult, LinearFit, PolynomialFit, RegressionModel};
use super::polynomial::fit_polynomial;
use crate::config::Tolerances;
use crate::data::{loader, PointSet};

/// Owns a point set and fits least-squares curves to it.
///
/// Fit results are computed fresh on every call and never cached. The
/// calculator assumes exclusive, single-threaded access; separate instances
/// share nothing.
#[derive(Debug, Clone, Default)]
pub struct RegressionCalculator {
    points: PointSet,
    tolerances: Tolerances,
}

impl RegressionCalculator {
    /// An empty calculator with default tolerances.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerances(tolerances: Tolerances) -> Self {
        Self {
            points: PointSet::new(),
            tolerances,
        }
    }

    pub fn tolerances(&self) -> Tolerances {
        self.tolerances
    }

    pub fn set_tolerances(&mut self, tolerances: Tolerances) {
        self.tolerances = tolerances;
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut PointSet {
        &mut self.points
    }

    /// Replace all points; fails with a length mismatch without touching the
    /// current set.
    pub fn set_points(&mut self, x: Vec<f64>, y: Vec<f64>) -> Result<()> {
        self.points.set_points(x, y)
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.points.push(x, y);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    // -- fitting --

    /// Least-squares line `y = a·x + b`.
    pub fn compute_linear(&self) -> Result<LinearFit> {
        fit_linear(
            self.points.x(),
            self.points.y(),
            self.tolerances.linear_denominator,
        )
    }

    /// Least-squares polynomial of `degree`, coefficients in ascending power.
    pub fn compute_polynomial(&self, degree: usize) -> Result<PolynomialFit> {
        fit_polynomial(
            self.points.x(),
            self.points.y(),
            degree,
            self.tolerances.pivot,
        )
    }

    /// Fit whichever model is requested.
    pub fn compute(&self, model: RegressionModel) -> Result<FitResult> {
        match model {
            RegressionModel::Linear => self.compute_linear().map(FitResult::from),
            RegressionModel::Polynomial { degree } => {
                self.compute_polynomial(degree).map(FitResult::from)
            }
        }
    }

    // -- persistence --

    /// Replace the point set with the contents of an INI file. The current
    /// points are kept if loading fails.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.points = loader::load_ini(path)?;
        Ok(())
    }

    /// Write the point set to an INI file.
    pub fn save(&self, path: &Path) -> Result<()> {
        loader::save_ini(path, &self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::ErrorKind;
    use approx::assert_abs_diff_eq;

    #[test]
    fn compute_dispatches_on_model() {
        let mut calc = RegressionCalculator::new();
        calc.set_points(vec![0.0, 1.0, 2.0], vec![1.0, 3.0, 5.0]).unwrap();

        match calc.compute(RegressionModel::Linear).unwrap() {
            FitResult::Linear(fit) => {
                assert_abs_diff_eq!(fit.slope, 2.0, epsilon = 1e-9);
                assert_abs_diff_eq!(fit.intercept, 1.0, epsilon = 1e-9);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let result = calc.compute(RegressionModel::Polynomial { degree: 2 }).unwrap();
        assert_eq!(result.model(), RegressionModel::Polynomial { degree: 2 });
    }

    #[test]
    fn failed_load_keeps_points() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ini");
        std::fs::write(&path, "[Data]\nX=1;2;3\nY=1;2\n").unwrap();

        let mut calc = RegressionCalculator::new();
        calc.push(7.0, 8.0);
        let err = calc.load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(calc.points().x(), &[7.0]);
    }

    #[test]
    fn custom_tolerances_apply() {
        let mut calc = RegressionCalculator::with_tolerances(Tolerances {
            linear_denominator: 10.0,
            ..Tolerances::default()
        });
        // n·Σx² − (Σx)² = 2·1 − 1 = 1 < 10
        calc.set_points(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        assert_eq!(calc.compute_linear().unwrap_err().kind(), ErrorKind::Degenerate);

        calc.set_tolerances(Tolerances::default());
        assert!(calc.compute_linear().is_ok());
    }
}
