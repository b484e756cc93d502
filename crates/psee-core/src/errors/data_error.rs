/// Dataset construction and lookup errors.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("dataset has no rows")]
    Empty,

    #[error("unsupported variable count {count}: expected {min}..={max}")]
    UnsupportedDimension { count: usize, min: usize, max: usize },

    #[error("column {label} has {actual} rows, expected {expected}")]
    RaggedColumns {
        label: String,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate variable label: {label}")]
    DuplicateLabel { label: String },

    #[error("non-finite value in column {label} at row {row}")]
    NonFinite { label: String, row: usize },

    #[error("unknown variable: {label}")]
    UnknownVariable { label: String },

    #[error("parse error: {reason}")]
    Parse { reason: String },
}
