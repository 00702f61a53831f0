//! Least-squares regression.
//!
//! [`RegressionCalculator`] is the entry point; the free functions
//! [`fit_linear`], [`fit_polynomial`] and [`solve`] operate on raw slices.

pub mod calculator;
pub mod error;
pub mod linear;
pub mod model;
pub mod polynomial;
pub mod solver;

pub use calculator::RegressionCalculator;
pub use error::{ErrorKind, FitError, Result};
pub use linear::fit_linear;
pub use model::{sample_curve, FitResult, LinearFit, ModelKind, PolynomialFit, RegressionModel};
pub use polynomial::{fit_polynomial, PolynomialDegree};
pub use solver::solve;
