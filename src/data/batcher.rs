// ============================================================
// Layer 4 - Regression Batcher
// ============================================================
// Implements Burn's Batcher trait: a Vec<RegressionSample>
// becomes two float tensors.
//
//   Input:  N samples, each with D inputs and K targets
//   Output: inputs [N, D], targets [N, K]
//
// All samples in a batch share D and K, so the rows are simply
// flattened and reshaped.

use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::data::dataset::RegressionSample;

#[derive(Debug, Clone)]
pub struct RegressionBatch<B: Backend> {
    /// shape: [batch_size, n_inputs]
    pub inputs: Tensor<B, 2>,
    /// shape: [batch_size, n_outputs]
    pub targets: Tensor<B, 2>,
}

#[derive(Clone, Debug)]
pub struct RegressionBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> RegressionBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<RegressionSample, RegressionBatch<B>> for RegressionBatcher<B> {
    fn batch(&self, items: Vec<RegressionSample>) -> RegressionBatch<B> {
        let batch_size = items.len();
        let n_inputs = items.first().map(|s| s.inputs.len()).unwrap_or(0);
        let n_outputs = items.first().map(|s| s.targets.len()).unwrap_or(0);

        let input_flat: Vec<f32> = items.iter().flat_map(|s| s.inputs.iter().copied()).collect();
        let target_flat: Vec<f32> = items.iter().flat_map(|s| s.targets.iter().copied()).collect();

        let inputs = Tensor::<B, 2>::from_data(
            TensorData::new(input_flat, [batch_size, n_inputs]),
            &self.device,
        );
        let targets = Tensor::<B, 2>::from_data(
            TensorData::new(target_flat, [batch_size, n_outputs]),
            &self.device,
        );

        RegressionBatch { inputs, targets }
    }
}
