// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust types describing what the system works with:
// tables of named numeric columns, per-column bounds, and the
// configuration record that travels with a trained model.
//
// Rules for this layer:
//   - NO Burn framework types
//   - NO file I/O
//   - Only structs, enums, traits and their invariants

/// Named numeric table and its input/output column split
pub mod dataset;

/// Per-column (min, max) bounds used for min-max scaling
pub mod bounds;

/// Model hyperparameters plus the metadata saved with a model
pub mod model_config;

/// Per-layer description of a configured network
pub mod summary;

/// Abstractions implemented by the data and ml layers
pub mod traits;
