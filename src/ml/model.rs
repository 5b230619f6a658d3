use burn::{
    nn::{Initializer, Linear, LinearConfig},
    prelude::*,
    tensor::activation,
};

use crate::domain::model_config::{Activation, ModelConfig};
use crate::infra::metrics::TrainingHistory;

#[derive(Config, Debug)]
pub struct SurrogateMlpConfig {
    pub n_inputs: usize,
    pub n_outputs: usize,
    #[config(default = 1)]
    pub n_hidden: usize,
    #[config(default = 12)]
    pub n_neurons: usize,
}

impl SurrogateMlpConfig {
    pub fn from_model_config(cfg: &ModelConfig) -> Self {
        Self::new(cfg.n_inputs, cfg.n_outputs)
            .with_n_hidden(cfg.n_hidden)
            .with_n_neurons(cfg.n_neurons)
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> SurrogateMlp<B> {
        let mut fan_in = self.n_inputs;
        let mut hidden = Vec::with_capacity(self.n_hidden);
        for _ in 0..self.n_hidden {
            hidden.push(dense(fan_in, self.n_neurons, device));
            fan_in = self.n_neurons;
        }
        let output = dense(fan_in, self.n_outputs, device);
        SurrogateMlp { hidden, output }
    }
}

// Glorot uniform, as most dense-network frameworks default to.
fn dense<B: Backend>(d_in: usize, d_out: usize, device: &B::Device) -> Linear<B> {
    LinearConfig::new(d_in, d_out)
        .with_initializer(Initializer::XavierUniform { gain: 1.0 })
        .init(device)
}

/// Activations are not parameters, so they live outside the module
/// and are passed to `forward`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activations {
    pub hidden: Activation,
    pub output: Activation,
}

impl Activations {
    pub fn from_model_config(cfg: &ModelConfig) -> Self {
        Self { hidden: cfg.layer_act, output: cfg.out_act }
    }
}

pub fn activate<B: Backend, const D: usize>(act: Activation, x: Tensor<B, D>) -> Tensor<B, D> {
    match act {
        Activation::Relu => activation::relu(x),
        Activation::Sigmoid => activation::sigmoid(x),
        Activation::Tanh => activation::tanh(x),
        Activation::Gelu => activation::gelu(x),
        Activation::Linear => x,
    }
}

#[derive(Module, Debug)]
pub struct SurrogateMlp<B: Backend> {
    pub hidden: Vec<Linear<B>>,
    pub output: Linear<B>,
}

impl<B: Backend> SurrogateMlp<B> {
    /// inputs: [batch, n_inputs] → [batch, n_outputs]
    pub fn forward(&self, inputs: Tensor<B, 2>, acts: Activations) -> Tensor<B, 2> {
        let mut x = inputs;
        for layer in &self.hidden {
            x = activate(acts.hidden, layer.forward(x));
        }
        activate(acts.output, self.output.forward(x))
    }

    pub fn input_units(&self) -> usize {
        match self.hidden.first() {
            Some(first) => first.weight.val().dims()[0],
            None => self.output.weight.val().dims()[0],
        }
    }

    pub fn output_units(&self) -> usize {
        self.output.weight.val().dims()[1]
    }
}

/// A fitted network plus the record that explains it.
pub struct TrainedModel<B: Backend> {
    pub network: SurrogateMlp<B>,
    pub config: ModelConfig,
    pub history: TrainingHistory,
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type B = NdArray;

    #[test]
    fn test_output_layer_width_is_fixed() {
        let device = Default::default();
        for (h, n) in [(0, 4), (1, 12), (3, 7), (6, 64)] {
            let m = SurrogateMlpConfig::new(6, 2)
                .with_n_hidden(h)
                .with_n_neurons(n)
                .init::<B>(&device);
            assert_eq!(m.hidden.len(), h);
            assert_eq!(m.output_units(), 2);
            assert_eq!(m.input_units(), 6);
        }
    }

    #[test]
    fn test_parameter_count_matches_summary_arithmetic() {
        let device = Default::default();
        let m = SurrogateMlpConfig::new(6, 2).init::<B>(&device);
        // 6*12 + 12 + 12*2 + 2
        assert_eq!(m.num_params(), 110);
    }

    #[test]
    fn test_forward_shape_and_sigmoid_range() {
        let device = Default::default();
        let m = SurrogateMlpConfig::new(3, 2).with_n_hidden(2).init::<B>(&device);
        let acts = Activations { hidden: Activation::Relu, output: Activation::Sigmoid };
        let x = Tensor::<B, 2>::from_data(
            TensorData::new(vec![0.0f32, 0.5, 1.0, 1.0, 0.0, 0.25], [2, 3]),
            &device,
        );
        let y = m.forward(x, acts);
        assert_eq!(y.dims(), [2, 2]);
        for v in y.into_data().to_vec::<f32>().unwrap() {
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_linear_activation_is_identity() {
        let device = Default::default();
        let x = Tensor::<B, 1>::from_data(TensorData::new(vec![-2.0f32, 3.0], [2]), &device);
        let y = activate(Activation::Linear, x).into_data().to_vec::<f32>().unwrap();
        assert_eq!(y, vec![-2.0, 3.0]);

        let x = Tensor::<B, 1>::from_data(TensorData::new(vec![-2.0f32, 3.0], [2]), &device);
        let y = activate(Activation::Relu, x).into_data().to_vec::<f32>().unwrap();
        assert_eq!(y, vec![0.0, 3.0]);
    }
}
