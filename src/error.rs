// ============================================================
// Error Taxonomy
// ============================================================
// Every library module returns `Result<T, SurrogateError>`.
// The application and CLI layers wrap these in anyhow with
// extra context, so the user sees the full chain on exit.
//
// Nothing in the pipeline recovers locally: an error halts
// the run and is reported as-is.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurrogateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed data at row {row}, column '{column}': {reason}")]
    MalformedData {
        row: usize,
        column: String,
        reason: String,
    },

    #[error("Dataset '{0}' has a header but no data rows")]
    EmptyDataset(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported model file: expected format '{expected}' v{expected_version}, found '{found}' v{found_version}")]
    UnsupportedFormat {
        expected: &'static str,
        expected_version: u32,
        found: String,
        found_version: u32,
    },

    #[error("Column '{column}' is constant (every value is {value}); min-max normalization is undefined")]
    DegenerateColumn { column: String, value: f64 },

    #[error("Training diverged at epoch {epoch}: loss is {loss}")]
    NumericDivergence { epoch: usize, loss: f64 },

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, SurrogateError>;
