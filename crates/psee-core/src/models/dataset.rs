//! Column-major numeric table with positional variable labels.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_VARIABLES, MIN_VARIABLES, VARIABLE_LABELS};
use crate::errors::{DataError, PseeError, PseeResult};

/// Label for the column at `index` (A, B, C, …).
pub fn variable_label(index: usize) -> String {
    match VARIABLE_LABELS.get(index) {
        Some(label) => (*label).to_string(),
        None => format!("V{index}"),
    }
}

/// An ordered table of i.i.d. numeric observations.
///
/// Every column has the same length, every cell is finite, and the number of
/// columns lies in `MIN_VARIABLES..=MAX_VARIABLES`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    labels: Vec<String>,
    columns: Vec<Vec<f64>>,
}

/// Unchecked wire form; deserialisation goes through [`Dataset::new`].
#[derive(Deserialize)]
struct RawDataset {
    labels: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = PseeError;

    fn try_from(raw: RawDataset) -> Result<Self, Self::Error> {
        Self::new(raw.labels, raw.columns)
    }
}

impl Dataset {
    /// Build from explicit labels and columns.
    pub fn new(labels: Vec<String>, columns: Vec<Vec<f64>>) -> PseeResult<Self> {
        if columns.len() < MIN_VARIABLES || columns.len() > MAX_VARIABLES {
            return Err(DataError::UnsupportedDimension {
                count: columns.len(),
                min: MIN_VARIABLES,
                max: MAX_VARIABLES,
            }
            .into());
        }
        if labels.len() != columns.len() {
            return Err(DataError::Parse {
                reason: format!("{} labels for {} columns", labels.len(), columns.len()),
            }
            .into());
        }

        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(DataError::DuplicateLabel {
                    label: label.clone(),
                }
                .into());
            }
        }

        let rows = columns[0].len();
        if rows == 0 {
            return Err(DataError::Empty.into());
        }
        for (label, column) in labels.iter().zip(&columns) {
            if column.len() != rows {
                return Err(DataError::RaggedColumns {
                    label: label.clone(),
                    expected: rows,
                    actual: column.len(),
                }
                .into());
            }
            if let Some(row) = column.iter().position(|v| !v.is_finite()) {
                return Err(DataError::NonFinite {
                    label: label.clone(),
                    row,
                }
                .into());
            }
        }

        Ok(Self { labels, columns })
    }

    /// Build from columns, labelling them A, B, C, … by position.
    pub fn from_columns(columns: Vec<Vec<f64>>) -> PseeResult<Self> {
        let labels = (0..columns.len()).map(variable_label).collect();
        Self::new(labels, columns)
    }

    /// Build from row-major records, labelling columns by position.
    pub fn from_rows(rows: &[Vec<f64>]) -> PseeResult<Self> {
        let width = rows.first().map(Vec::len).ok_or(DataError::Empty)?;
        let mut columns = vec![Vec::with_capacity(rows.len()); width];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(DataError::Parse {
                    reason: format!("row {i} has {} cells, expected {width}", row.len()),
                }
                .into());
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(*value);
            }
        }
        Self::from_columns(columns)
    }

    /// Variable labels in column order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of variables.
    pub fn n_vars(&self) -> usize {
        self.columns.len()
    }

    /// Number of observations.
    pub fn n_rows(&self) -> usize {
        self.columns[0].len()
    }

    /// Position of a label.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Position of a label, failing on unknown labels.
    pub fn require_index(&self, label: &str) -> PseeResult<usize> {
        self.index_of(label).ok_or_else(|| {
            DataError::UnknownVariable {
                label: label.to_string(),
            }
            .into()
        })
    }

    /// Column by label.
    pub fn column(&self, label: &str) -> Option<&[f64]> {
        self.index_of(label).map(|i| self.columns[i].as_slice())
    }

    /// Column by position. Panics when out of range.
    pub fn column_at(&self, index: usize) -> &[f64] {
        &self.columns[index]
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    /// Sub-dataset restricted to `labels`, in the requested order, keeping the
    /// original labels and row order.
    pub fn select(&self, labels: &[&str]) -> PseeResult<Dataset> {
        let mut picked_labels = Vec::with_capacity(labels.len());
        let mut picked_columns = Vec::with_capacity(labels.len());
        for label in labels {
            let idx = self.require_index(label)?;
            picked_labels.push(self.labels[idx].clone());
            picked_columns.push(self.columns[idx].clone());
        }
        Dataset::new(picked_labels, picked_columns)
    }
}
