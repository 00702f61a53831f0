use super::error::{FitError, Result};
use super::model::LinearFit;

/// Closed-form least-squares line through `(x[i], y[i])`.
///
/// Fails when the columns differ in length, when fewer than two points are
/// given, or when `|n·Σx² − (Σx)²|` is below `denominator_tolerance`
/// (all x equal, for instance).
pub fn fit_linear(x: &[f64], y: &[f64], denominator_tolerance: f64) -> Result<LinearFit> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(FitError::InsufficientData {
            required: 2,
            actual: x.len(),
            context: "linear fit".into(),
        });
    }

    let n = x.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xx, mut sum_xy) = (0.0, 0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        sum_x += xi;
        sum_y += yi;
        sum_xx += xi * xi;
        sum_xy += xi * yi;
    }

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() < denominator_tolerance {
        log::warn!("Linear fit rejected: denominator {denominator:e} below {denominator_tolerance:e}");
        return Err(FitError::Degenerate(format!(
            "linear denominator {denominator:e} is below {denominator_tolerance:e}; \
             points may share the same x value"
        )));
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y * sum_xx - sum_x * sum_xy) / denominator;
    log::debug!("Linear fit over {} points: a = {slope}, b = {intercept}", x.len());

    Ok(LinearFit { slope, intercept })
}
