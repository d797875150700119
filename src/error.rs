use thiserror::Error;

/// Failures raised while reading, cleaning or exporting the delivery table.
///
/// An empty table is never an error: filters and aggregates hand back empty
/// results instead.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("required column `{column}` is missing from the input table")]
    SchemaMismatch { column: &'static str },

    #[error("column `{column}` row {row}: {reason} (got {value:?})")]
    MalformedValue {
        column: &'static str,
        row: usize,
        value: String,
        reason: &'static str,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    pub fn malformed(
        column: &'static str,
        row: usize,
        value: &str,
        reason: &'static str,
    ) -> Self {
        ReportError::MalformedValue {
            column,
            row,
            value: value.to_string(),
            reason,
        }
    }
}
