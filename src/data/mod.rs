/// Data layer: the point set and its persistence.
///
/// Architecture:
/// ```text
///  .ini / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → PointSet, PointSet → .ini
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ PointSet  │  index-aligned x / y columns
///   └──────────┘
/// ```

pub mod loader;
pub mod model;

pub use model::PointSet;
