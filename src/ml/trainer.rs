// ============================================================
// Layer 5 - Training Loop
// ============================================================
// Fits the MLP for a fixed number of epochs:
//
//   loss       mean squared error
//   optimiser  RMSprop (decay 0.9, epsilon 1e-7)
//   metrics    MAE and MSE per epoch
//
// No validation split, no early stopping, no checkpoints. The
// loop either finishes every epoch or stops on the first
// non-finite loss with NumericDivergence.
//
// Training runs on MyBackend = Autodiff<_>; the returned model
// is converted with .valid() to the plain inner backend.

use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    nn::loss::{MseLoss, Reduction},
    optim::{GradientsParams, Optimizer, RmsPropConfig},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use serde::{Deserialize, Serialize};

use crate::data::{batcher::RegressionBatcher, dataset::RegressionDataset};
use crate::domain::{dataset::Dataset, model_config::ModelConfig};
use crate::error::{Result, SurrogateError};
use crate::infra::metrics::{EpochMetrics, MetricsLogger, TrainingHistory};
use crate::ml::{
    model::{Activations, SurrogateMlp, SurrogateMlpConfig, TrainedModel},
    seed::Seeds,
};

const INFO_EVERY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingOptions {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self { epochs: 500, batch_size: 32, learning_rate: 1e-3 }
    }
}

impl TrainingOptions {
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(SurrogateError::InvalidConfig("epochs must be at least 1".into()));
        }
        if self.batch_size == 0 {
            return Err(SurrogateError::InvalidConfig("batch size must be at least 1".into()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(SurrogateError::InvalidConfig(format!(
                "learning rate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

/// Seed, build, fit. `inputs` and `targets` are the (already scaled)
/// training tables; `config` describes them.
pub fn run_training<B: AutodiffBackend>(
    config: ModelConfig,
    inputs: &Dataset,
    targets: &Dataset,
    options: &TrainingOptions,
    seeds: &Seeds,
    device: &B::Device,
    logger: Option<&MetricsLogger>,
) -> Result<TrainedModel<B::InnerBackend>> {
    options.validate()?;
    if inputs.n_columns() != config.n_inputs || targets.n_columns() != config.n_outputs {
        return Err(SurrogateError::ShapeMismatch(format!(
            "model expects {} inputs / {} outputs, data has {} / {}",
            config.n_inputs,
            config.n_outputs,
            inputs.n_columns(),
            targets.n_columns()
        )));
    }

    seeds.apply::<B>();

    let model: SurrogateMlp<B> = SurrogateMlpConfig::from_model_config(&config).init(device);
    tracing::info!(
        "Model ready: {} -> {}x{} ({}) -> {} ({}), {} parameters",
        config.n_inputs,
        config.n_hidden,
        config.n_neurons,
        config.layer_act,
        config.n_outputs,
        config.out_act,
        model.num_params()
    );

    let dataset = RegressionDataset::from_tables(inputs, targets)?;
    let acts = Activations::from_model_config(&config);
    let (model, history) = fit(model, acts, dataset, options, seeds.shuffle_seed(), device, logger)?;

    Ok(TrainedModel { network: model.valid(), config, history })
}

pub fn fit<B: AutodiffBackend>(
    mut model: SurrogateMlp<B>,
    acts: Activations,
    dataset: RegressionDataset,
    options: &TrainingOptions,
    shuffle_seed: u64,
    device: &B::Device,
    logger: Option<&MetricsLogger>,
) -> Result<(SurrogateMlp<B>, TrainingHistory)> {
    options.validate()?;
    if dataset.sample_count() == 0 {
        return Err(SurrogateError::EmptyDataset("training set".into()));
    }

    let n_samples = dataset.sample_count();

    // ── RMSprop ───────────────────────────────────────────────────────────────
    // v = ρ*v + (1-ρ)*g²
    // θ = θ - lr * g / (√v + ε)
    let mut optim = RmsPropConfig::new()
        .with_alpha(0.9)
        .with_epsilon(1e-7)
        .init();
    let mse = MseLoss::new();

    // No worker threads: batch order depends only on the seed.
    let batcher = RegressionBatcher::<B>::new(device.clone());
    let loader = DataLoaderBuilder::new(batcher)
        .batch_size(options.batch_size)
        .shuffle(shuffle_seed)
        .build(dataset);

    let mut history = TrainingHistory::default();

    for epoch in 1..=options.epochs {
        let mut sq_sum = 0.0f64;
        let mut abs_sum = 0.0f64;
        let mut n_values = 0usize;

        for batch in loader.iter() {
            let [rows, cols] = batch.targets.dims();

            let preds = model.forward(batch.inputs, acts);
            let loss = mse.forward(preds.clone(), batch.targets.clone(), Reduction::Mean);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            if !loss_val.is_finite() {
                tracing::warn!("Non-finite loss {} at epoch {}", loss_val, epoch);
                return Err(SurrogateError::NumericDivergence { epoch, loss: loss_val });
            }

            let abs_err: f64 = (preds.detach() - batch.targets)
                .abs()
                .sum()
                .into_scalar()
                .elem::<f64>();

            sq_sum += loss_val * (rows * cols) as f64;
            abs_sum += abs_err;
            n_values += rows * cols;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(options.learning_rate, model, grads);
        }

        let mse_val = sq_sum / n_values as f64;
        let metrics = EpochMetrics::new(epoch, mse_val, abs_sum / n_values as f64, mse_val);

        if epoch % INFO_EVERY == 0 || epoch == options.epochs {
            tracing::info!(
                "Epoch {:>4}/{} | loss={:.6} | mae={:.6} | mse={:.6}",
                epoch, options.epochs, metrics.loss, metrics.mae, metrics.mse
            );
        } else {
            tracing::debug!("Epoch {}: loss={:.6} mae={:.6}", epoch, metrics.loss, metrics.mae);
        }

        if let Some(logger) = logger {
            logger.log(&metrics)?;
        }
        history.push(metrics);
    }

    tracing::info!("Training complete: {} epochs over {} samples", options.epochs, n_samples);
    Ok((model, history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        bounds::ColumnBounds,
        model_config::{Activation, Hyperparameters},
    };
    use burn::backend::{Autodiff, NdArray};

    type MyBackend = Autodiff<NdArray>;

    // z1 = x, z2 = 1 - x on a small grid
    fn tables(rows: usize) -> (Dataset, Dataset) {
        let xs: Vec<Vec<f64>> = (0..rows).map(|i| vec![i as f64 / (rows - 1) as f64]).collect();
        let zs: Vec<Vec<f64>> = xs.iter().map(|x| vec![x[0], 1.0 - x[0]]).collect();
        (
            Dataset::new(vec!["x".into()], xs).unwrap(),
            Dataset::new(vec!["z1".into(), "z2".into()], zs).unwrap(),
        )
    }

    fn config(x: &Dataset, z: &Dataset, hyper: Hyperparameters) -> ModelConfig {
        ModelConfig::new(
            &hyper,
            ColumnBounds::compute(x).unwrap(),
            ColumnBounds::compute(z).unwrap(),
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_history_has_one_entry_per_epoch() {
        let (x, z) = tables(16);
        let cfg = config(&x, &z, Hyperparameters::default());
        let opts = TrainingOptions { epochs: 5, batch_size: 4, learning_rate: 1e-3 };
        let trained = run_training::<MyBackend>(cfg, &x, &z, &opts, &Seeds::default(), &Default::default(), None)
            .unwrap();
        assert_eq!(trained.history.len(), 5);
        assert_eq!(trained.history.epochs[0].epoch, 1);
        assert!(trained.history.epochs.iter().all(|m| m.loss.is_finite() && m.mae >= 0.0));
        assert_eq!(trained.network.output_units(), 2);
    }

    #[test]
    fn test_loss_decreases_on_simple_target() {
        let (x, z) = tables(32);
        let hyper = Hyperparameters { out_act: Activation::Linear, ..Default::default() };
        let cfg = config(&x, &z, hyper);
        let opts = TrainingOptions { epochs: 200, batch_size: 8, learning_rate: 1e-2 };
        let trained = run_training::<MyBackend>(cfg, &x, &z, &opts, &Seeds::default(), &Default::default(), None)
            .unwrap();
        let first = trained.history.epochs.first().unwrap().loss;
        let last = trained.history.last().unwrap().loss;
        assert!(last < first, "loss did not fall: {first} -> {last}");
    }

    #[test]
    fn test_divergence_surfaces_as_error() {
        let (x, z) = tables(16);
        let hyper = Hyperparameters {
            layer_act: Activation::Linear,
            out_act: Activation::Linear,
            ..Default::default()
        };
        let cfg = config(&x, &z, hyper);
        let opts = TrainingOptions { epochs: 50, batch_size: 4, learning_rate: 1e30 };
        let err = run_training::<MyBackend>(cfg, &x, &z, &opts, &Seeds::default(), &Default::default(), None)
            .err()
            .expect("training should diverge");
        match err {
            SurrogateError::NumericDivergence { loss, .. } => assert!(!loss.is_finite()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_options_rejected() {
        let bad = [
            TrainingOptions { epochs: 0, ..Default::default() },
            TrainingOptions { batch_size: 0, ..Default::default() },
            TrainingOptions { learning_rate: -1.0, ..Default::default() },
            TrainingOptions { learning_rate: f64::NAN, ..Default::default() },
        ];
        for opts in bad {
            assert!(matches!(opts.validate(), Err(SurrogateError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_metrics_logger_receives_every_epoch() {
        let dir = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path().join("m.csv")).unwrap();
        let (x, z) = tables(8);
        let cfg = config(&x, &z, Hyperparameters::default());
        let opts = TrainingOptions { epochs: 3, batch_size: 4, learning_rate: 1e-3 };
        run_training::<MyBackend>(cfg, &x, &z, &opts, &Seeds::default(), &Default::default(), Some(&logger))
            .unwrap();
        let text = std::fs::read_to_string(logger.csv_path()).unwrap();
        assert_eq!(text.lines().count(), 4);
    }
}
