//! Whitespace-delimited numeric table input.
//!
//! The course datasets are plain text: one record per line, columns
//! separated by whitespace, optionally preceded by a fixed number of
//! header lines to skip. No binary format, no schema versioning.

use std::path::Path;
use toyfit_core::{Error, Observation, Result};

/// Parse a whitespace-delimited numeric table from text.
///
/// The first `skip_header` lines are ignored; blank lines are skipped.
/// Every remaining line must hold the same number of numeric columns.
/// Errors carry 1-based line numbers.
pub fn parse_table(text: &str, skip_header: usize) -> Result<Vec<Vec<f64>>> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut width: Option<usize> = None;

    for (idx, line) in text.lines().enumerate().skip(skip_header) {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let mut row = Vec::new();
        for field in line.split_whitespace() {
            let value: f64 = field.parse().map_err(|_| Error::Parse {
                line: line_no,
                message: format!("invalid numeric field '{}'", field),
            })?;
            row.push(value);
        }
        match width {
            None => width = Some(row.len()),
            Some(w) if w != row.len() => {
                return Err(Error::Parse {
                    line: line_no,
                    message: format!("expected {} columns, found {}", w, row.len()),
                });
            }
            Some(_) => {}
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Read and parse a table file.
pub fn read_table(path: impl AsRef<Path>, skip_header: usize) -> Result<Vec<Vec<f64>>> {
    let text = std::fs::read_to_string(path)?;
    parse_table(&text, skip_header)
}

/// Assemble observations from a table with `x`, `y`, `sigma_y` columns.
pub fn dataset_from_table(rows: &[Vec<f64>]) -> Result<Vec<Observation>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            if row.len() < 3 {
                return Err(Error::Parse {
                    line: i + 1,
                    message: format!("need x, y, sigma_y columns, found {}", row.len()),
                });
            }
            Ok(Observation::new(row[0], row[1], row[2]))
        })
        .collect()
}

/// Assemble observations from a two-column `x`, `y` table with a known
/// constant measurement uncertainty.
pub fn dataset_with_sigma(rows: &[Vec<f64>], sigma_y: f64) -> Result<Vec<Observation>> {
    if !sigma_y.is_finite() || sigma_y <= 0.0 {
        return Err(Error::InvalidConfiguration(format!(
            "sigma_y must be finite and > 0, got {}",
            sigma_y
        )));
    }
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            if row.len() < 2 {
                return Err(Error::Parse {
                    line: i + 1,
                    message: format!("need x, y columns, found {}", row.len()),
                });
            }
            Ok(Observation::new(row[0], row[1], sigma_y))
        })
        .collect()
}
