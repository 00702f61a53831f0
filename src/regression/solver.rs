//! Dense linear solve by Gauss–Jordan elimination with partial pivoting.

use super::error::{FitError, Result};

/// Solve `A·x = b` for a square `A`.
///
/// `a` is given row by row and must be `k×k` with `b.len() == k`. Pivots with
/// magnitude below `pivot_tolerance` are rejected as singular, and so is any
/// non-finite solution component.
pub fn solve(a: &[Vec<f64>], b: &[f64], pivot_tolerance: f64) -> Result<Vec<f64>> {
    let k = b.len();
    if a.len() != k {
        return Err(FitError::InvalidArgument(format!(
            "matrix has {} rows but right-hand side has {k} entries",
            a.len()
        )));
    }
    if let Some((r, row)) = a.iter().enumerate().find(|(_, row)| row.len() != k) {
        return Err(FitError::InvalidArgument(format!(
            "matrix row {r} has {} columns, expected {k}",
            row.len()
        )));
    }

    // k × (k + 1) augmented matrix [A | b]
    let mut aug: Vec<Vec<f64>> = a
        .iter()
        .zip(b)
        .map(|(row, &rhs)| {
            let mut r = Vec::with_capacity(k + 1);
            r.extend_from_slice(row);
            r.push(rhs);
            r
        })
        .collect();

    for i in 0..k {
        let mut max_row = i;
        for r in i + 1..k {
            if aug[r][i].abs() > aug[max_row][i].abs() {
                max_row = r;
            }
        }
        if max_row != i {
            aug.swap(i, max_row);
        }

        let pivot = aug[i][i];
        if pivot.abs() < pivot_tolerance {
            return Err(FitError::Degenerate(format!(
                "singular or ill-conditioned system: zero pivot in column {i} (|{pivot:e}| < {pivot_tolerance:e})"
            )));
        }

        for value in &mut aug[i][i..] {
            *value /= pivot;
        }

        let pivot_row = aug[i].clone();
        for (r, row) in aug.iter_mut().enumerate() {
            if r == i {
                continue;
            }
            let factor = row[i];
            if factor == 0.0 {
                continue;
            }
            for (value, &p) in row[i..].iter_mut().zip(&pivot_row[i..]) {
                *value -= factor * p;
            }
        }
    }

    let solution: Vec<f64> = aug.iter().map(|row| row[k]).collect();
    if let Some(idx) = solution.iter().position(|v| !v.is_finite()) {
        return Err(FitError::Degenerate(format!(
            "result not finite: component {idx} is {}; try a lower degree or check input data",
            solution[idx]
        )));
    }
    Ok(solution)
}
