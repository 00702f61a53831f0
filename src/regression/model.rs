use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::PointSet;

/// Coefficients below this magnitude are left out of polynomial equations.
const NEGLIGIBLE_COEFFICIENT: f64 = 1e-9;

/// Ranges narrower than this are widened by one unit on each side when
/// sampling a curve.
const MIN_SAMPLE_SPAN: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Model selection
// ---------------------------------------------------------------------------

/// The family of curve to fit, without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModelKind {
    #[default]
    Linear,
    Polynomial,
}

impl ModelKind {
    pub fn with_degree(self, degree: usize) -> RegressionModel {
        match self {
            ModelKind::Linear => RegressionModel::Linear,
            ModelKind::Polynomial => RegressionModel::Polynomial { degree },
        }
    }
}

/// A fully specified regression model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegressionModel {
    /// `y = a·x + b`
    Linear,
    /// `y = Σ c[i]·x^i` for `i` in `0..=degree`
    Polynomial { degree: usize },
}

impl RegressionModel {
    /// Minimum number of points the fit needs.
    pub fn required_points(&self) -> usize {
        match self {
            RegressionModel::Linear => 2,
            RegressionModel::Polynomial { degree } => degree.saturating_add(1),
        }
    }

    /// Heading used in reports.
    pub fn title(&self) -> String {
        match self {
            RegressionModel::Linear => "Least squares, linear".to_string(),
            RegressionModel::Polynomial { degree } => {
                format!("Least squares, polynomial of degree {degree}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Fit results
// ---------------------------------------------------------------------------

/// Coefficients of `y = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

impl fmt::Display for LinearFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.intercept < 0.0 { '-' } else { '+' };
        write!(
            f,
            "y = {:.4} \u{00B7} x {sign} {:.4}",
            self.slope,
            self.intercept.abs()
        )
    }
}

/// Polynomial coefficients in ascending power order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolynomialFit {
    pub coefficients: Vec<f64>,
}

impl PolynomialFit {
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Horner evaluation.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }
}

impl fmt::Display for PolynomialFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y = ")?;
        if self.coefficients.is_empty() {
            return write!(f, "0");
        }
        let mut first = true;
        for (power, &c) in self.coefficients.iter().enumerate() {
            // The constant term is always shown.
            if power > 0 && c.abs() < NEGLIGIBLE_COEFFICIENT {
                continue;
            }
            if first {
                if c < 0.0 {
                    write!(f, "-")?;
                }
                first = false;
            } else {
                write!(f, "{}", if c < 0.0 { " - " } else { " + " })?;
            }
            write!(f, "{:.4}", c.abs())?;
            match power {
                0 => {}
                1 => write!(f, " \u{00B7} x")?,
                p => write!(f, " \u{00B7} x^{p}")?,
            }
        }
        Ok(())
    }
}

/// Outcome of a successful fit.
#[derive(Debug, Clone, PartialEq)]
pub enum FitResult {
    Linear(LinearFit),
    Polynomial(PolynomialFit),
}

impl FitResult {
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            FitResult::Linear(fit) => fit.evaluate(x),
            FitResult::Polynomial(fit) => fit.evaluate(x),
        }
    }

    pub fn model(&self) -> RegressionModel {
        match self {
            FitResult::Linear(_) => RegressionModel::Linear,
            FitResult::Polynomial(fit) => RegressionModel::Polynomial {
                degree: fit.degree(),
            },
        }
    }

    /// Human-readable equation with four decimals per coefficient.
    pub fn equation(&self) -> String {
        match self {
            FitResult::Linear(fit) => fit.to_string(),
            FitResult::Polynomial(fit) => fit.to_string(),
        }
    }

    /// Labelled coefficients, in the order they are reported.
    pub fn labelled_coefficients(&self) -> Vec<(String, f64)> {
        match self {
            FitResult::Linear(fit) => vec![
                ("a (slope)".to_string(), fit.slope),
                ("b (intercept)".to_string(), fit.intercept),
            ],
            FitResult::Polynomial(fit) => fit
                .coefficients
                .iter()
                .enumerate()
                .map(|(i, &c)| (format!("c[{i}] (x^{i})"), c))
                .collect(),
        }
    }

    /// Coefficient of determination `1 − SS_res / SS_tot` over `points`.
    ///
    /// `None` for an empty set or when every y is identical.
    pub fn r_squared(&self, points: &PointSet) -> Option<f64> {
        let mean = points.mean_y()?;
        let (mut ss_tot, mut ss_res) = (0.0, 0.0);
        for (x, y) in points.iter() {
            ss_tot += (y - mean) * (y - mean);
            let residual = y - self.evaluate(x);
            ss_res += residual * residual;
        }
        if ss_tot == 0.0 {
            return None;
        }
        Some(1.0 - ss_res / ss_tot)
    }
}

impl From<LinearFit> for FitResult {
    fn from(fit: LinearFit) -> Self {
        FitResult::Linear(fit)
    }
}

impl From<PolynomialFit> for FitResult {
    fn from(fit: PolynomialFit) -> Self {
        FitResult::Polynomial(fit)
    }
}

// ---------------------------------------------------------------------------
// Curve sampling
// ---------------------------------------------------------------------------

/// Evaluate `fit` at `samples + 1` evenly spaced x values in `[x_min, x_max]`.
///
/// A range narrower than `1e-9` is widened to `[x_min − 1, x_max + 1]`.
pub fn sample_curve(fit: &FitResult, x_min: f64, x_max: f64, samples: usize) -> Vec<[f64; 2]> {
    let (lo, hi) = if (x_max - x_min).abs() < MIN_SAMPLE_SPAN {
        (x_min - 1.0, x_max + 1.0)
    } else {
        (x_min, x_max)
    };
    if samples == 0 {
        return vec![[lo, fit.evaluate(lo)]];
    }
    let step = (hi - lo) / samples as f64;
    (0..=samples)
        .map(|i| {
            let x = lo + i as f64 * step;
            [x, fit.evaluate(x)]
        })
        .collect()
}
