// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each
// (train, predict, inspect, generate).
//
// Rules for this layer:
//   - No tensor math or model code here
//   - No printing (that's Layer 1)
//   - Only workflow coordination and error context

// CSV → normalized data → trained model file
pub mod train_use_case;

// model file + CSV of inputs → predictions
pub mod predict_use_case;

// model description and synthetic data
pub mod inspect_use_case;
