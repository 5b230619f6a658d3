// ============================================================
// Layer 3 - Core Traits
// ============================================================
// The application layer programs against these, so the CSV
// loader and the burn-backed predictor can be swapped without
// touching the use cases.

use crate::domain::{dataset::Dataset, model_config::ModelConfig};
use crate::error::Result;

// ─── DatasetSource ────────────────────────────────────────────────────────────
/// Anything that can produce a table of named numeric columns.
///
/// Implementations:
///   - CsvLoader → delimited text file with a header row
pub trait DatasetSource {
    fn load(&self) -> Result<Dataset>;
}

// ─── Surrogate ────────────────────────────────────────────────────────────────
/// A trained model that maps raw input rows to raw output rows.
///
/// Implementations:
///   - Predictor → burn MLP restored from a model file
pub trait Surrogate {
    /// The configuration the model was trained with.
    fn config(&self) -> &ModelConfig;

    /// Evaluate on unscaled inputs whose columns match
    /// `config().input_labels`, returning unscaled outputs.
    fn predict(&self, inputs: &Dataset) -> Result<Dataset>;
}
