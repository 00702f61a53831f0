use super::error::{FitError, Result};
use super::model::PolynomialFit;
use super::solver::solve;

/// A validated, non-negative polynomial degree.
///
/// The calculator takes `usize` degrees; this type is the conversion point
/// for callers that hold a signed value (text fields, foreign interfaces).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PolynomialDegree(usize);

impl PolynomialDegree {
    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<i64> for PolynomialDegree {
    type Error = FitError;

    fn try_from(degree: i64) -> Result<Self> {
        usize::try_from(degree).map(PolynomialDegree).map_err(|_| {
            FitError::InvalidArgument(format!("polynomial degree must be non-negative, got {degree}"))
        })
    }
}

impl From<usize> for PolynomialDegree {
    fn from(degree: usize) -> Self {
        PolynomialDegree(degree)
    }
}

/// Least-squares polynomial of the given degree through `(x[i], y[i])`.
///
/// Builds the normal equations `A[i][j] = Σ x^(i+j)`, `B[i] = Σ y·x^i` and
/// solves them with [`solve`]. Coefficients are returned in ascending power
/// order, `degree + 1` of them.
pub fn fit_polynomial(
    x: &[f64],
    y: &[f64],
    degree: usize,
    pivot_tolerance: f64,
) -> Result<PolynomialFit> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    let Some(k) = degree.checked_add(1) else {
        return Err(FitError::InvalidArgument(format!("polynomial degree {degree} is too large")));
    };
    if x.len() < k {
        return Err(FitError::InsufficientData {
            required: k,
            actual: x.len(),
            context: format!("polynomial fit of degree {degree}"),
        });
    }

    let (a, b) = normal_equations(x, y, degree);
    let coefficients = solve(&a, &b, pivot_tolerance).map_err(|e| match e {
        FitError::Degenerate(msg) => {
            log::warn!("Polynomial fit of degree {degree} is degenerate: {msg}");
            FitError::Degenerate(format!(
                "cannot solve the normal equations for degree {degree}: {msg}. \
                 Try a lower degree or check for collinear or duplicate x values"
            ))
        }
        other => other,
    })?;

    log::debug!("Polynomial fit of degree {degree} over {} points: {coefficients:?}", x.len());
    Ok(PolynomialFit { coefficients })
}

/// Assemble the `k×k` normal matrix and right-hand side for degree `k - 1`.
///
/// Callers guarantee `degree < x.len()`, so the sizes below cannot overflow.
fn normal_equations(x: &[f64], y: &[f64], degree: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
    let k = degree + 1;
    // power_sums[p] = Σ x^p for p in 0..=2·degree
    let mut power_sums = vec![0.0; 2 * degree + 1];
    let mut rhs = vec![0.0; k];

    for (&xi, &yi) in x.iter().zip(y) {
        let mut power = 1.0;
        for (p, sum) in power_sums.iter_mut().enumerate() {
            *sum += power;
            if p < k {
                rhs[p] += yi * power;
            }
            power *= xi;
        }
    }

    let matrix = (0..k).map(|i| power_sums[i..i + k].to_vec()).collect();
    (matrix, rhs)
}
