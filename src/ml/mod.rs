// ============================================================
// Layer 5 - ML / Model Layer (Burn)
// ============================================================
// Everything that touches Burn tensors lives here (plus the
// batcher and the model store, which move tensors in and out).
//
//   model.rs      - SurrogateMlp: n_hidden dense layers of
//                   n_neurons units, then a fixed-width output
//                   layer; TrainedModel bundles it with its
//                   ModelConfig and history
//
//   seed.rs       - the explicit seeding step
//
//   trainer.rs    - fixed-epoch RMSprop/MSE loop with MAE and
//                   MSE tracking and divergence detection
//
//   inferencer.rs - Predictor: scale, forward, unscale

use burn::backend::{Autodiff, NdArray};

pub mod model;

pub mod seed;

pub mod trainer;

pub mod inferencer;

/// CPU backend used for inference and for loading model files.
pub type CpuBackend = NdArray;

/// CPU backend with gradients, used for training.
pub type CpuTrainBackend = Autodiff<NdArray>;
