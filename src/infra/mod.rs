// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by several other layers:
//
//   model_store.rs - the single-file model format: config,
//                    architecture and full-precision weights
//                    in one self-describing JSON document
//
//   metrics.rs     - per-epoch loss / MAE / MSE, kept as a
//                    TrainingHistory and optionally appended
//                    to a CSV file
//
//   device.rs      - CPU / GPU selection from the environment

/// Model file saving and loading
pub mod model_store;

/// Training metrics history and CSV logger
pub mod metrics;

/// Backend device selection
pub mod device;
