// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// From a CSV file on disk to tensor batches:
//
//   data.csv
//       │
//       ▼
//   CsvLoader         → header + rows as a Dataset
//       │
//       ▼
//   split_columns     → inputs (first n) / outputs (rest)
//       │
//       ▼
//   Normalizer        → per-column min-max scaling into [0, 1]
//       │
//       ▼
//   RegressionDataset → implements Burn's Dataset trait
//       │
//       ▼
//   RegressionBatcher → stacks samples into [batch, features]
//
// The generator produces a synthetic table with the same
// layout, for demos and end-to-end runs.

/// Reads delimited files with a header row
pub mod loader;

/// Min-max scaling and its inverse
pub mod normalizer;

/// Implements Burn's Dataset trait for regression samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Seeded synthetic process data
pub mod generator;
