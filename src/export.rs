use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::PointSet;
use crate::regression::FitResult;

// ---------------------------------------------------------------------------
// Report model
// ---------------------------------------------------------------------------

/// A named coefficient as it appears in a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coefficient {
    pub name: String,
    pub value: f64,
}

/// One input point together with the fitted value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub x: f64,
    pub y: f64,
    pub fitted: f64,
    pub residual: f64,
}

/// Everything an exported results document contains.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitReport {
    pub title: String,
    pub equation: String,
    pub coefficients: Vec<Coefficient>,
    pub r_squared: Option<f64>,
    pub rows: Vec<ReportRow>,
}

impl FitReport {
    pub fn new(points: &PointSet, fit: &FitResult) -> Self {
        let rows = points
            .iter()
            .map(|(x, y)| {
                let fitted = fit.evaluate(x);
                ReportRow {
                    x,
                    y,
                    fitted,
                    residual: y - fitted,
                }
            })
            .collect();

        FitReport {
            title: fit.model().title(),
            equation: fit.equation(),
            coefficients: fit
                .labelled_coefficients()
                .into_iter()
                .map(|(name, value)| Coefficient { name, value })
                .collect(),
            r_squared: fit.r_squared(points),
            rows,
        }
    }
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Write a report.  Dispatch by extension: `.json` → JSON, anything else → CSV.
pub fn write_report(path: &Path, report: &FitReport) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => write_json(path, report),
        _ => write_csv(path, report),
    }?;
    log::info!("Exported report to {}", path.display());
    Ok(())
}

fn write_json(path: &Path, report: &FitReport) -> Result<()> {
    let text = serde_json::to_string_pretty(report).context("serializing report")?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// CSV layout: the per-point table, an empty record, then `key,value` rows
/// for the title, equation, coefficients and R².
fn write_csv(path: &Path, report: &FitReport) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    writer.write_record(["x", "y", "fitted", "residual"])?;
    for row in &report.rows {
        writer.serialize(row).context("writing point row")?;
    }

    writer.write_record([""])?;
    writer.write_record(["title", report.title.as_str()])?;
    writer.write_record(["equation", report.equation.as_str()])?;
    for c in &report.coefficients {
        writer.write_record([c.name.clone(), c.value.to_string()])?;
    }
    if let Some(r2) = report.r_squared {
        writer.write_record(["r_squared".to_string(), r2.to_string()])?;
    }
    writer.flush().context("flushing CSV writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::{LinearFit, PolynomialFit};

    fn sample() -> (PointSet, FitResult) {
        let points = PointSet::from_columns(vec![0.0, 1.0, 2.0], vec![1.0, 3.5, 5.0]).unwrap();
        let fit = FitResult::from(LinearFit {
            slope: 2.0,
            intercept: 1.0,
        });
        (points, fit)
    }

    #[test]
    fn report_rows_hold_residuals() {
        let (points, fit) = sample();
        let report = FitReport::new(&points, &fit);
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.rows[1].fitted, 3.0);
        assert_eq!(report.rows[1].residual, 0.5);
        assert_eq!(report.coefficients[0].name, "a (slope)");
        assert_eq!(report.title, "Least squares, linear");
        assert!(report.r_squared.is_some());
    }

    #[test]
    fn json_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let (points, fit) = sample();
        write_report(&path, &FitReport::new(&points, &fit)).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["equation"], "y = 2.0000 \u{00B7} x + 1.0000");
        assert_eq!(value["rows"].as_array().unwrap().len(), 3);
        assert_eq!(value["coefficients"][1]["value"], 1.0);
    }

    #[test]
    fn csv_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let points = PointSet::from_columns(vec![1.0, 2.0], vec![2.0, 4.0]).unwrap();
        let fit = FitResult::from(PolynomialFit {
            coefficients: vec![0.0, 2.0],
        });
        write_report(&path, &FitReport::new(&points, &fit)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("x,y,fitted,residual"));
        assert_eq!(lines.next(), Some("1.0,2.0,2.0,0.0"));
        assert!(text.contains("c[1] (x^1),2\n"));
        assert!(text.contains("r_squared,1\n"));
    }
}
