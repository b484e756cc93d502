//! Labelled 0/1 adjacency matrix derived from a directed graph.

use serde::{Deserialize, Serialize};

/// Square matrix where cell (row, col) is 1 iff the edge row → col exists.
///
/// Not symmetrised. Built once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyMatrix {
    labels: Vec<String>,
    cells: Vec<Vec<u8>>,
}

impl AdjacencyMatrix {
    /// All-zero matrix over `labels`.
    pub fn zeros<S: AsRef<str>>(labels: &[S]) -> Self {
        let n = labels.len();
        Self {
            labels: labels.iter().map(|l| l.as_ref().to_string()).collect(),
            cells: vec![vec![0; n]; n],
        }
    }

    /// Matrix over `labels` with a 1 for every edge whose endpoints are both
    /// labelled. Edges touching other nodes are ignored.
    pub fn from_edges<S, I, A, B>(labels: &[S], edges: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut matrix = Self::zeros(labels);
        for (source, target) in edges {
            let row = matrix.position(source.as_ref());
            let col = matrix.position(target.as_ref());
            if let (Some(row), Some(col)) = (row, col) {
                matrix.cells[row][col] = 1;
            }
        }
        matrix
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Axis labels (shared by rows and columns).
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// (rows, cols).
    pub fn shape(&self) -> (usize, usize) {
        (self.labels.len(), self.labels.len())
    }

    /// Cell by labels; `None` when either label is not an axis label.
    pub fn get(&self, row: &str, col: &str) -> Option<u8> {
        Some(self.cells[self.position(row)?][self.position(col)?])
    }

    /// Row-major cells.
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.cells
    }

    /// Number of ones.
    pub fn edge_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&c| c == 1).count())
            .sum()
    }
}

impl std::fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.labels.iter().map(String::len).max().unwrap_or(1);
        write!(f, "{:width$}", "")?;
        for label in &self.labels {
            write!(f, "  {label:>width$}")?;
        }
        for (label, row) in self.labels.iter().zip(&self.cells) {
            writeln!(f)?;
            write!(f, "{label:<width$}")?;
            for cell in row {
                write!(f, "  {cell:>width$}")?;
            }
        }
        Ok(())
    }
}
