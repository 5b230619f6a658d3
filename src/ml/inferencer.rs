// ============================================================
// Layer 5 - Predictor
// ============================================================
// Evaluates a trained model on new rows. When the model was
// trained on normalized data, inputs are scaled with the saved
// input bounds and outputs are unscaled with the saved output
// bounds, so callers work in physical units throughout.

use std::path::Path;

use burn::prelude::*;

use crate::data::normalizer::{denormalize, normalize, DegeneratePolicy};
use crate::domain::{dataset::Dataset, model_config::ModelConfig, traits::Surrogate};
use crate::error::{Result, SurrogateError};
use crate::infra::model_store::ModelStore;
use crate::ml::model::{Activations, SurrogateMlp, TrainedModel};

pub struct Predictor<B: Backend> {
    network: SurrogateMlp<B>,
    config: ModelConfig,
    device: B::Device,
}

impl<B: Backend> Predictor<B> {
    pub fn new(network: SurrogateMlp<B>, config: ModelConfig, device: B::Device) -> Self {
        Self { network, config, device }
    }

    pub fn from_trained(trained: TrainedModel<B>, device: B::Device) -> Self {
        Self::new(trained.network, trained.config, device)
    }

    pub fn from_file(path: &Path, device: B::Device) -> Result<Self> {
        let (network, config) = ModelStore::new(path).load::<B>(&device)?;
        tracing::info!(
            "Model loaded from '{}' ({} inputs -> {} outputs)",
            path.display(),
            config.n_inputs,
            config.n_outputs
        );
        Ok(Self { network, config, device })
    }

    pub fn network(&self) -> &SurrogateMlp<B> {
        &self.network
    }

    /// Forward pass on rows that are already in the model's scale.
    pub fn predict_normalized(&self, inputs: &Dataset) -> Result<Dataset> {
        self.check_inputs(inputs)?;

        let n_rows = inputs.n_rows();
        let n_out = self.config.n_outputs;
        if n_rows == 0 {
            return Dataset::new(self.config.output_labels.clone(), Vec::new());
        }

        let x = Tensor::<B, 2>::from_data(
            TensorData::new(inputs.to_f32_flat(), [n_rows, self.config.n_inputs]),
            &self.device,
        );
        let y = self
            .network
            .forward(x, Activations::from_model_config(&self.config))
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| SurrogateError::Backend(format!("{e:?}")))?;

        let rows = y
            .chunks(n_out)
            .map(|r| r.iter().map(|&v| v as f64).collect())
            .collect();
        Dataset::new(self.config.output_labels.clone(), rows)
    }

    fn check_inputs(&self, inputs: &Dataset) -> Result<()> {
        if inputs.columns() != self.config.input_labels.as_slice() {
            return Err(SurrogateError::ShapeMismatch(format!(
                "model expects input columns [{}], got [{}]",
                self.config.input_labels.join(", "),
                inputs.columns().join(", ")
            )));
        }
        Ok(())
    }
}

impl<B: Backend> Surrogate for Predictor<B> {
    fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn predict(&self, inputs: &Dataset) -> Result<Dataset> {
        if !self.config.normalized {
            return self.predict_normalized(inputs);
        }

        // A degenerate input column can only exist here if training used
        // the zero policy, so apply the same mapping.
        self.check_inputs(inputs)?;
        let scaled = normalize(inputs, &self.config.input_bounds, DegeneratePolicy::Zero)?;
        let out = self.predict_normalized(&scaled)?;
        denormalize(&out, &self.config.output_bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        bounds::{Bounds, ColumnBounds},
        model_config::{Activation, Hyperparameters},
    };
    use crate::ml::model::SurrogateMlpConfig;
    use burn::backend::NdArray;

    type B = NdArray;

    fn predictor(normalized: bool) -> Predictor<B> {
        let inputs = ColumnBounds::from_entries(vec![
            ("a".into(), Bounds::new(0.0, 10.0)),
            ("b".into(), Bounds::new(-1.0, 1.0)),
        ]);
        let outputs = ColumnBounds::from_entries(vec![
            ("y1".into(), Bounds::new(100.0, 200.0)),
            ("y2".into(), Bounds::new(0.0, 0.5)),
        ]);
        let hyper = Hyperparameters { out_act: Activation::Sigmoid, ..Default::default() };
        let cfg = ModelConfig::new(&hyper, inputs, outputs, normalized).unwrap();
        let device = Default::default();
        let net = SurrogateMlpConfig::from_model_config(&cfg).init::<B>(&device);
        Predictor::new(net, cfg, device)
    }

    fn rows() -> Dataset {
        Dataset::new(
            vec!["a".into(), "b".into()],
            vec![vec![0.0, -1.0], vec![5.0, 0.0], vec![10.0, 1.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_normalized_outputs_in_unit_interval() {
        let p = predictor(true);
        let out = p.predict_normalized(&rows()).unwrap();
        assert_eq!(out.columns(), &["y1".to_string(), "y2".to_string()]);
        assert_eq!(out.n_rows(), 3);
        assert!(out.rows().iter().flatten().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_predict_unscales_into_output_bounds() {
        let p = predictor(true);
        let out = p.predict(&rows()).unwrap();
        for row in out.rows() {
            assert!((100.0..=200.0).contains(&row[0]), "y1 = {}", row[0]);
            assert!((0.0..=0.5).contains(&row[1]), "y2 = {}", row[1]);
        }
    }

    #[test]
    fn test_unnormalized_model_skips_scaling() {
        let p = predictor(false);
        let raw = p.predict(&rows()).unwrap();
        let direct = p.predict_normalized(&rows()).unwrap();
        assert_eq!(raw, direct);
    }

    #[test]
    fn test_wrong_columns_rejected() {
        let p = predictor(true);
        let bad = Dataset::new(vec!["b".into(), "a".into()], vec![vec![0.0, 0.0]]).unwrap();
        assert!(matches!(p.predict(&bad), Err(SurrogateError::ShapeMismatch(_))));
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        let p = predictor(true);
        let empty = Dataset::new(vec!["a".into(), "b".into()], vec![]).unwrap();
        let out = p.predict_normalized(&empty).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.n_columns(), 2);
    }
}
