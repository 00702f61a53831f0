use std::fmt::Write as _;
use std::path::Path;

use super::model::PointSet;
use crate::regression::{FitError, Result};

/// Section holding the point columns.
const DATA_SECTION: &str = "Data";

/// Comment written at the top of saved files.
const HEADER_COMMENT: &str = "; Generated by rusty-fit";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load points from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` – header row with `x` and `y` columns, one point per row
/// * anything else – INI file with a `[Data]` section (see [`load_ini`])
pub fn load_points(path: &Path) -> Result<PointSet> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        _ => load_ini(path),
    }
}

/// Read the `[Data]` section of an INI file.
///
/// ```text
/// ; comment
/// [Data]
/// X=1;2;3.5
/// Y=2;4;7
/// ```
pub fn load_ini(path: &Path) -> Result<PointSet> {
    check_path(path)?;
    if !path.is_file() {
        return Err(FitError::NotFound(path.to_path_buf()));
    }
    // Legacy files may carry non-UTF-8 comments; undecodable bytes become
    // U+FFFD and only matter if they land in a value.
    let bytes = std::fs::read(path)?;
    let points = parse_ini(&String::from_utf8_lossy(&bytes))?;
    log::info!("Loaded {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Write the points as an INI file with a single `[Data]` section.
pub fn save_ini(path: &Path, points: &PointSet) -> Result<()> {
    check_path(path)?;
    std::fs::write(path, format_ini(points))?;
    log::info!("Saved {} points to {}", points.len(), path.display());
    Ok(())
}

fn check_path(path: &Path) -> Result<()> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(FitError::InvalidArgument("path must not be empty".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// INI format
// ---------------------------------------------------------------------------

/// Parse INI text into a point set.
///
/// Only key/value lines inside `[Data]` (any case) are considered. Keys `X`
/// and `Y` replace the respective column, so the last occurrence wins.
/// Unknown sections and keys, blank lines, `;` comments and lines without
/// `=` are ignored. A leading byte-order mark is skipped.
pub fn parse_ini(text: &str) -> Result<PointSet> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut in_data = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') {
            continue;
        }

        if trimmed.starts_with('[') && trimmed.ends_with(']') && trimmed.len() >= 2 {
            let section = &trimmed[1..trimmed.len() - 1];
            in_data = section.eq_ignore_ascii_case(DATA_SECTION);
            continue;
        }

        if !in_data {
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            continue;
        };
        let key = key.trim();

        if key.eq_ignore_ascii_case("X") {
            x = parse_values(key, value)?;
        } else if key.eq_ignore_ascii_case("Y") {
            y = parse_values(key, value)?;
        }
    }

    if x.len() != y.len() {
        return Err(FitError::CountMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    PointSet::from_columns(x, y)
}

fn parse_values(key: &str, value: &str) -> Result<Vec<f64>> {
    value
        .split(';')
        .map(str::trim)
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<f64>().map_err(|_| FitError::InvalidNumber {
                key: key.to_string(),
                token: tok.to_string(),
            })
        })
        .collect()
}

/// Render the INI text written by [`save_ini`].
///
/// Numbers use Rust's shortest round-trip formatting, which always uses `.`
/// as the decimal separator.
pub fn format_ini(points: &PointSet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{HEADER_COMMENT}");
    let _ = writeln!(out, "[{DATA_SECTION}]");
    let _ = writeln!(out, "X={}", join_values(points.x()));
    let _ = writeln!(out, "Y={}", join_values(points.y()));
    out
}

fn join_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(";")
}

// ---------------------------------------------------------------------------
// CSV import
// ---------------------------------------------------------------------------

/// CSV layout: header row naming `x` and `y` (any case), one point per row.
/// Other columns are ignored.
fn load_csv(path: &Path) -> Result<PointSet> {
    check_path(path)?;
    if !path.is_file() {
        return Err(FitError::NotFound(path.to_path_buf()));
    }
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| FitError::MissingColumn(name.to_string()))
    };
    let x_idx = column("x")?;
    let y_idx = column("y")?;

    let mut points = PointSet::new();
    for record in reader.records() {
        let record = record?;
        let x = parse_cell(&record, x_idx, "x")?;
        let y = parse_cell(&record, y_idx, "y")?;
        points.push(x, y);
    }

    log::info!("Imported {} points from {}", points.len(), path.display());
    Ok(points)
}

fn parse_cell(record: &csv::StringRecord, idx: usize, name: &str) -> Result<f64> {
    let tok = record.get(idx).unwrap_or("");
    tok.parse::<f64>().map_err(|_| FitError::InvalidNumber {
        key: name.to_string(),
        token: tok.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::ErrorKind;

    #[test]
    fn parses_data_section_case_insensitively() {
        let text = "\
; comment line
[Other]
X=100;200
[data]
x = 1; 2.5 ;3
Note=ignored
no equals sign here
Y=-1;0.5;1e3
";
        let points = parse_ini(text).unwrap();
        assert_eq!(points.x(), &[1.0, 2.5, 3.0]);
        assert_eq!(points.y(), &[-1.0, 0.5, 1000.0]);
    }

    #[test]
    fn last_key_occurrence_wins() {
        let text = "[Data]\nX=1;2\nY=3;4\nX=5;6\n";
        let points = parse_ini(text).unwrap();
        assert_eq!(points.x(), &[5.0, 6.0]);
    }

    #[test]
    fn empty_tokens_are_skipped() {
        let points = parse_ini("[Data]\nX=1;;2;\nY=3;4\n").unwrap();
        assert_eq!(points.x(), &[1.0, 2.0]);
    }

    #[test]
    fn byte_order_mark_is_skipped() {
        let points = parse_ini("\u{feff}[Data]\nX=1;2;3\nY=4;5;6\n").unwrap();
        assert_eq!(points.x(), &[1.0, 2.0, 3.0]);
        assert_eq!(points.y(), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn non_utf8_comment_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.ini");
        std::fs::write(&path, b"; \xcf\xf0\xe8\n[Data]\nX=1\nY=2\n").unwrap();

        let points = load_ini(&path).unwrap();
        assert_eq!(points.x(), &[1.0]);
        assert_eq!(points.y(), &[2.0]);
    }

    #[test]
    fn non_utf8_value_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbled.ini");
        std::fs::write(&path, b"[Data]\nX=1;\xff\nY=2;3\n").unwrap();

        let err = load_ini(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn keys_outside_data_are_ignored() {
        let points = parse_ini("X=1;2\nY=3\n[Data]\n").unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn bad_token_names_key() {
        let err = parse_ini("[Data]\nX=1;2\nY=1;two\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        match err {
            FitError::InvalidNumber { key, token } => {
                assert_eq!(key, "Y");
                assert_eq!(token, "two");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn comma_decimal_is_rejected() {
        let err = parse_ini("[Data]\nX=1,5\nY=2\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn count_mismatch_is_parse_error() {
        let err = parse_ini("[Data]\nX=1;2;3\nY=1;2\n").unwrap_err();
        assert!(matches!(err, FitError::CountMismatch { x_len: 3, y_len: 2 }));
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn format_is_invariant() {
        let points = PointSet::from_columns(vec![0.1, -2.0, 1e-7], vec![3.25, 4.0, 5.5]).unwrap();
        let text = format_ini(&points);
        assert!(text.starts_with(HEADER_COMMENT));
        assert!(text.contains("[Data]\nX=0.1;-2;0.0000001\nY=3.25;4;5.5\n"));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.ini");
        let points =
            PointSet::from_columns(vec![0.1, 1.0 / 3.0, -7.25], vec![2.0, f64::MAX, 1e-300]).unwrap();

        save_ini(&path, &points).unwrap();
        assert_eq!(load_ini(&path).unwrap(), points);
    }

    #[test]
    fn missing_and_empty_paths() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_ini(&dir.path().join("nope.ini")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = load_ini(Path::new("")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = save_ini(Path::new("  "), &PointSet::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn save_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("points.ini");
        let err = save_ini(&path, &PointSet::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn csv_import_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.csv");
        std::fs::write(&path, "label,X,Y\na, 1.5 ,2\nb,3,-4\n").unwrap();

        let points = load_points(&path).unwrap();
        assert_eq!(points.x(), &[1.5, 3.0]);
        assert_eq!(points.y(), &[2.0, -4.0]);
    }

    #[test]
    fn csv_without_y_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.csv");
        std::fs::write(&path, "x,z\n1,2\n").unwrap();

        let err = load_points(&path).unwrap_err();
        assert!(matches!(err, FitError::MissingColumn(ref c) if c == "y"));
    }

    #[test]
    fn ini_dispatch_for_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.txt");
        std::fs::write(&path, "[DATA]\nX=1\nY=2\n").unwrap();
        let points = load_points(&path).unwrap();
        assert_eq!(points.len(), 1);
    }
}
