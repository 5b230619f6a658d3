// ============================================================
// Layer 2 - TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the CSV              (Layer 4 - data)
//   Step 2: Split inputs / outputs    (Layer 3 - domain)
//   Step 3: Compute column bounds     (Layer 3 - domain)
//   Step 4: Normalize both groups     (Layer 4 - data)
//   Step 5: Build the ModelConfig     (Layer 3 - domain)
//   Step 6: Pick a device             (Layer 6 - infra)
//   Step 7: Seed and train            (Layer 5 - ml)
//   Step 8: Save the model file       (Layer 6 - infra)
//
// Any failure stops the run; nothing is retried and no partial
// model is written.

use std::path::Path;

use anyhow::{bail, Context, Result};
use burn::{module::Module, tensor::backend::AutodiffBackend};
use serde::{Deserialize, Serialize};

use crate::data::{
    loader::CsvLoader,
    normalizer::{normalize, DegeneratePolicy},
};
use crate::domain::{
    bounds::ColumnBounds,
    dataset::Dataset,
    model_config::{Activation, Hyperparameters, ModelConfig},
    traits::DatasetSource,
};
use crate::infra::{
    device::DeviceChoice,
    metrics::{EpochMetrics, MetricsLogger},
    model_store::ModelStore,
};
use crate::ml::{
    seed::Seeds,
    trainer::{run_training, TrainingOptions},
    CpuTrainBackend,
};

// ─── Training Configuration ──────────────────────────────────────────────────
// Everything a training run needs. Loadable from JSON; fields
// missing from the file take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub data_path: String,
    pub output_path: String,
    pub delimiter: char,
    pub n_inputs: usize,
    pub n_outputs: usize,
    pub n_hidden: usize,
    pub n_neurons: usize,
    pub layer_act: Activation,
    pub out_act: Activation,
    pub epochs: usize,
    pub batch_size: usize,
    pub lr: f64,
    pub degenerate: DegeneratePolicy,
    pub normalize: bool,
    pub metrics_csv: Option<String>,
    pub seeds: Seeds,
}

impl Default for TrainConfig {
    fn default() -> Self {
        let hyper = Hyperparameters::default();
        let opts = TrainingOptions::default();
        Self {
            data_path: "data/dataset.csv".to_string(),
            output_path: "surrogate_model.json".to_string(),
            delimiter: ',',
            n_inputs: 6,
            n_outputs: hyper.n_outputs,
            n_hidden: hyper.n_hidden,
            n_neurons: hyper.n_neurons,
            layer_act: hyper.layer_act,
            out_act: hyper.out_act,
            epochs: opts.epochs,
            batch_size: opts.batch_size,
            lr: opts.learning_rate,
            degenerate: DegeneratePolicy::default(),
            normalize: true,
            metrics_csv: None,
            seeds: Seeds::default(),
        }
    }
}

impl TrainConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read training config '{}'", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid training config '{}'", path.display()))
    }

    pub fn hyperparameters(&self) -> Hyperparameters {
        Hyperparameters {
            n_hidden: self.n_hidden,
            n_neurons: self.n_neurons,
            layer_act: self.layer_act,
            out_act: self.out_act,
            n_outputs: self.n_outputs,
        }
    }

    pub fn training_options(&self) -> TrainingOptions {
        TrainingOptions {
            epochs: self.epochs,
            batch_size: self.batch_size,
            learning_rate: self.lr,
        }
    }

    fn delimiter_byte(&self) -> Result<u8> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter must be a single ASCII character, got '{}'", self.delimiter);
        }
        Ok(self.delimiter as u8)
    }
}

/// What a finished run reports back to the caller.
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub rows: usize,
    pub parameters: usize,
    pub final_metrics: Option<EpochMetrics>,
    pub best_metrics: Option<EpochMetrics>,
    pub model_config: ModelConfig,
    pub output_path: String,
}

/// Inputs and outputs ready for the trainer, plus the bounds
/// that were used to scale them.
pub struct PreparedData {
    pub inputs: Dataset,
    pub outputs: Dataset,
    pub input_bounds: ColumnBounds,
    pub output_bounds: ColumnBounds,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn execute(&self) -> Result<TrainReport> {
        let cfg = &self.config;
        cfg.training_options().validate()?;

        // ── Step 1: Load the dataset ──────────────────────────────────────────
        let loader = CsvLoader::new(&cfg.data_path).with_delimiter(cfg.delimiter_byte()?);
        tracing::info!("Loading dataset from '{}'", loader.path().display());
        let raw = loader
            .load()
            .with_context(|| format!("Cannot load dataset '{}'", cfg.data_path))?;
        tracing::info!("Loaded {} rows x {} columns", raw.n_rows(), raw.n_columns());

        // ── Steps 2-4: Split, bound, normalize ────────────────────────────────
        let prepared = self.prepare(&raw)?;

        // ── Step 5: Model metadata ────────────────────────────────────────────
        let model_cfg = ModelConfig::new(
            &cfg.hyperparameters(),
            prepared.input_bounds.clone(),
            prepared.output_bounds.clone(),
            cfg.normalize,
        )
        .context("Invalid model configuration")?;

        // ── Step 6: Device ────────────────────────────────────────────────────
        let choice = DeviceChoice::from_env().resolve();
        tracing::info!("Training device: {:?}", choice);

        #[cfg(feature = "gpu")]
        if let DeviceChoice::Gpu(index) = choice {
            let device = crate::infra::device::wgpu_device(index);
            return self.train_and_save::<burn::backend::Autodiff<burn::backend::Wgpu>>(
                model_cfg, &prepared, &device,
            );
        }

        self.train_and_save::<CpuTrainBackend>(model_cfg, &prepared, &Default::default())
    }

    /// Split the raw table and scale both halves.
    pub fn prepare(&self, raw: &Dataset) -> Result<PreparedData> {
        let cfg = &self.config;

        let (x_raw, z_raw) = raw
            .split_columns(cfg.n_inputs)
            .context("Cannot split dataset into input and output columns")?;
        tracing::info!(
            "Inputs: [{}] | Outputs: [{}]",
            x_raw.columns().join(", "),
            z_raw.columns().join(", ")
        );

        let input_bounds = ColumnBounds::compute(&x_raw)?;
        let output_bounds = ColumnBounds::compute(&z_raw)?;

        let (inputs, outputs) = if cfg.normalize {
            (
                normalize(&x_raw, &input_bounds, cfg.degenerate).context("Cannot normalize inputs")?,
                normalize(&z_raw, &output_bounds, cfg.degenerate).context("Cannot normalize outputs")?,
            )
        } else {
            tracing::warn!("Normalization disabled: training on raw values");
            (x_raw, z_raw)
        };

        Ok(PreparedData { inputs, outputs, input_bounds, output_bounds })
    }

    fn train_and_save<B: AutodiffBackend>(
        &self,
        model_cfg: ModelConfig,
        data: &PreparedData,
        device: &B::Device,
    ) -> Result<TrainReport> {
        let cfg = &self.config;

        let logger = cfg
            .metrics_csv
            .as_ref()
            .map(MetricsLogger::new)
            .transpose()
            .context("Cannot open metrics CSV")?;

        let trained = run_training::<B>(
            model_cfg,
            &data.inputs,
            &data.outputs,
            &cfg.training_options(),
            &cfg.seeds,
            device,
            logger.as_ref(),
        )
        .context("Training failed")?;

        ModelStore::new(&cfg.output_path)
            .save(&trained.network, &trained.config)
            .with_context(|| format!("Cannot save model to '{}'", cfg.output_path))?;

        Ok(TrainReport {
            rows: data.inputs.n_rows(),
            parameters: trained.network.num_params(),
            final_metrics: trained.history.last().copied(),
            best_metrics: trained.history.best().copied(),
            model_config: trained.config,
            output_path: cfg.output_path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::save_csv;
    use tempfile::tempdir;

    fn raw() -> Dataset {
        Dataset::new(
            vec!["a".into(), "b".into(), "y1".into(), "y2".into()],
            vec![
                vec![1.0, 10.0, 5.0, -1.0],
                vec![2.0, 30.0, 6.0, 1.0],
                vec![3.0, 20.0, 7.0, 0.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_partial_json_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("train.json");
        std::fs::write(&p, r#"{ "epochs": 7, "layer_act": "tanh", "seeds": { "numeric": 1, "hash": 2, "backend": 3 } }"#).unwrap();
        let cfg = TrainConfig::from_json_file(&p).unwrap();
        assert_eq!(cfg.epochs, 7);
        assert_eq!(cfg.layer_act, Activation::Tanh);
        assert_eq!(cfg.seeds.backend, 3);
        assert_eq!(cfg.n_inputs, 6);
        assert_eq!(cfg.n_outputs, 2);
        assert!(cfg.normalize);
    }

    #[test]
    fn test_prepare_scales_each_group() {
        let uc = TrainUseCase::new(TrainConfig { n_inputs: 2, ..Default::default() });
        let p = uc.prepare(&raw()).unwrap();
        assert_eq!(p.inputs.columns(), &["a".to_string(), "b".to_string()]);
        assert_eq!(p.inputs.rows()[1], vec![0.5, 1.0]);
        assert_eq!(p.outputs.rows()[2], vec![1.0, 0.5]);
        assert_eq!(p.output_bounds.get("y2").unwrap().min, -1.0);
    }

    #[test]
    fn test_prepare_without_normalization_keeps_raw_values() {
        let uc = TrainUseCase::new(TrainConfig { n_inputs: 2, normalize: false, ..Default::default() });
        let p = uc.prepare(&raw()).unwrap();
        assert_eq!(p.inputs.rows()[1], vec![2.0, 30.0]);
    }

    #[test]
    fn test_execute_writes_model_with_flag() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("d.csv");
        let model = dir.path().join("m.json");
        save_csv(&raw(), &data).unwrap();

        let cfg = TrainConfig {
            data_path: data.display().to_string(),
            output_path: model.display().to_string(),
            n_inputs: 2,
            epochs: 3,
            ..Default::default()
        };
        let report = TrainUseCase::new(cfg).execute().unwrap();
        assert_eq!(report.rows, 3);
        assert!(report.model_config.normalized);
        assert!(model.exists());
        assert_eq!(ModelStore::new(&model).load_config().unwrap(), report.model_config);
    }

    #[test]
    fn test_constant_column_stops_the_pipeline() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("d.csv");
        let model = dir.path().join("m.json");
        let table = Dataset::new(
            vec!["a".into(), "k".into(), "y1".into(), "y2".into()],
            vec![vec![1.0, 4.0, 0.0, 1.0], vec![2.0, 4.0, 1.0, 0.0]],
        )
        .unwrap();
        save_csv(&table, &data).unwrap();

        let cfg = TrainConfig {
            data_path: data.display().to_string(),
            output_path: model.display().to_string(),
            n_inputs: 2,
            epochs: 1,
            ..Default::default()
        };
        let err = TrainUseCase::new(cfg).execute().unwrap_err();
        assert!(err
            .chain()
            .any(|e| matches!(
                e.downcast_ref::<crate::error::SurrogateError>(),
                Some(crate::error::SurrogateError::DegenerateColumn { .. })
            )));
        assert!(!model.exists());
    }

    #[test]
    fn test_wrong_output_width_rejected() {
        let uc = TrainUseCase::new(TrainConfig { n_inputs: 1, ..Default::default() });
        let p = uc.prepare(&raw()).unwrap();
        // three output columns, model fixed at two
        assert!(ModelConfig::new(&uc.config().hyperparameters(), p.input_bounds, p.output_bounds, true).is_err());
    }
}
