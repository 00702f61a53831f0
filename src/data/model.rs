use crate::regression::{FitError, Result};

// ---------------------------------------------------------------------------
// PointSet – index-aligned x / y columns
// ---------------------------------------------------------------------------

/// An ordered set of `(x, y)` points stored as two columns of equal length.
///
/// The columns are private so every mutation keeps `x.len() == y.len()`.
/// Points keep insertion order and are never de-duplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl PointSet {
    /// An empty point set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from two columns, rejecting mismatched lengths.
    pub fn from_columns(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(FitError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    /// Replace both columns at once. On error the set is left untouched.
    pub fn set_points(&mut self, x: Vec<f64>, y: Vec<f64>) -> Result<()> {
        *self = Self::from_columns(x, y)?;
        Ok(())
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
    }

    /// Remove the point at `index`, returning it if it existed.
    pub fn remove(&mut self, index: usize) -> Option<(f64, f64)> {
        if index >= self.len() {
            return None;
        }
        Some((self.x.remove(index), self.y.remove(index)))
    }

    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Iterate over `(x, y)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Mutable access to individual coordinates, one pair per point.
    pub fn points_mut(&mut self) -> impl Iterator<Item = (&mut f64, &mut f64)> {
        self.x.iter_mut().zip(self.y.iter_mut())
    }

    /// Smallest and largest x, or `None` for an empty set.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        min_max(&self.x)
    }

    /// Arithmetic mean of the y column.
    pub fn mean_y(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.y.iter().sum::<f64>() / self.len() as f64)
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}
