//! Delimited-text dataset loader.
//!
//! Cells are separated by whitespace, commas, semicolons or tabs. A first
//! row that does not parse is treated as a header. Later rows with a
//! non-numeric cell or the wrong number of cells are dropped. Columns are
//! labelled A, B, C, … by position.

use std::fs;
use std::path::Path;

use psee_core::errors::{DataError, PseeResult};
use psee_core::Dataset;
use tracing::{debug, info};

/// Load and clean a dataset from `path`.
pub fn load_dataset(path: &Path) -> PseeResult<Dataset> {
    let text = fs::read_to_string(path)?;
    let data = parse_dataset(&text)?;
    info!(
        path = %path.display(),
        variables = data.n_vars(),
        rows = data.n_rows(),
        "dataset loaded"
    );
    Ok(data)
}

/// Parse delimited text into a dataset.
pub fn parse_dataset(text: &str) -> PseeResult<Dataset> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut width: Option<usize> = None;
    let mut dropped = 0usize;

    for (line_no, line) in text.lines().enumerate() {
        let cells = split_cells(line);
        if cells.is_empty() {
            continue;
        }
        let parsed: Option<Vec<f64>> = cells.iter().map(|c| parse_cell(c)).collect();
        let Some(values) = parsed else {
            if rows.is_empty() && width.is_none() {
                debug!(line = line_no + 1, "skipping header row");
                width = Some(cells.len());
            } else {
                dropped += 1;
            }
            continue;
        };
        match width {
            Some(w) if w != values.len() && !rows.is_empty() => dropped += 1,
            _ => {
                width = Some(values.len());
                rows.push(values);
            }
        }
    }

    if dropped > 0 {
        debug!(dropped, "dropped malformed rows");
    }
    if rows.is_empty() {
        return Err(DataError::Empty.into());
    }
    Dataset::from_rows(&rows)
}

fn split_cells(line: &str) -> Vec<&str> {
    line.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|cell| !cell.is_empty())
        .collect()
}

fn parse_cell(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}
