//! Least-squares curve fitting: linear and polynomial regression over a point
//! set, INI persistence for the points, and a results report writer.
//!
//! ```no_run
//! use rusty_fit::regression::RegressionCalculator;
//!
//! let mut calc = RegressionCalculator::new();
//! calc.set_points(vec![0.0, 1.0, 2.0], vec![3.0, 5.0, 7.0])?;
//! let line = calc.compute_linear()?;
//! assert!((line.slope - 2.0).abs() < 1e-9);
//! # Ok::<(), rusty_fit::regression::FitError>(())
//! ```

pub mod config;
pub mod data;
pub mod export;
pub mod regression;
