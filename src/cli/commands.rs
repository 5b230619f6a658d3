// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Defines the subcommands `train`, `predict`, `summary` and
// `generate` and all their configurable flags.
//
// Activation names and the degenerate-column policy are parsed
// through their FromStr impls, so `--layer-act GELU` and
// `--degenerate zero` are validated before any work starts.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;
use crate::data::normalizer::DegeneratePolicy;
use crate::domain::model_config::Activation;
use crate::ml::seed::Seeds;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train a surrogate network on a CSV dataset
    Train(TrainArgs),

    /// Run a saved model on a CSV of raw inputs
    Predict(PredictArgs),

    /// Describe a saved model file
    Summary(SummaryArgs),

    /// Write a seeded synthetic dataset
    Generate(GenerateArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV file with a header row; inputs first, then outputs
    /// [default: data/dataset.csv]
    #[arg(long)]
    pub data: Option<String>,

    /// Where to write the model file [default: surrogate_model.json]
    #[arg(long)]
    pub output: Option<String>,

    /// JSON training config. Replaces every flag below except
    /// --hash-seed; --data, --output and the hash seed still apply
    /// when given
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of leading columns that are model inputs
    #[arg(long, default_value_t = 6)]
    pub n_inputs: usize,

    /// Number of output columns (width of the output layer)
    #[arg(long, default_value_t = 2)]
    pub n_outputs: usize,

    /// Number of hidden layers
    #[arg(long, default_value_t = 1)]
    pub n_hidden: usize,

    /// Units per hidden layer
    #[arg(long, default_value_t = 12)]
    pub n_neurons: usize,

    /// Hidden-layer activation (relu, sigmoid, tanh, gelu, linear)
    #[arg(long, default_value = "relu")]
    pub layer_act: Activation,

    /// Output-layer activation
    #[arg(long, default_value = "sigmoid")]
    pub out_act: Activation,

    #[arg(long, default_value_t = 500)]
    pub epochs: usize,

    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// RMSprop learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// What to do with constant columns: reject or zero
    #[arg(long, default_value = "reject")]
    pub degenerate: DegeneratePolicy,

    /// Train on raw values instead of min-max scaled ones
    #[arg(long)]
    pub no_normalize: bool,

    /// Append per-epoch loss / MAE / MSE to this CSV file
    #[arg(long)]
    pub metrics_csv: Option<String>,

    /// Field delimiter of the dataset
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Seed for the host-side generator (batch shuffle order)
    #[arg(long, default_value_t = 46)]
    pub numeric_seed: u64,

    /// Seed mixed into the batch shuffle order [default: 1342]
    #[arg(long, env = "SURROGATE_HASH_SEED")]
    pub hash_seed: Option<u64>,

    /// Seed for the tensor backend (weight initialisation)
    #[arg(long, default_value_t = 62)]
    pub backend_seed: u64,
}

impl TrainArgs {
    /// Resolve the effective config: the JSON file when `--config`
    /// is given, otherwise the flags. Paths and the hash seed that
    /// were supplied (flag or environment) win over the file.
    pub fn into_config(self) -> anyhow::Result<TrainConfig> {
        let Some(path) = self.config.clone() else {
            return Ok(self.into());
        };

        let mut cfg = TrainConfig::from_json_file(&path)?;
        if let Some(data) = self.data {
            cfg.data_path = data;
        }
        if let Some(output) = self.output {
            cfg.output_path = output;
        }
        if let Some(hash) = self.hash_seed {
            cfg.seeds.hash = hash;
        }
        Ok(cfg)
    }
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        let defaults = TrainConfig::default();
        TrainConfig {
            data_path:   a.data.unwrap_or(defaults.data_path),
            output_path: a.output.unwrap_or(defaults.output_path),
            delimiter:   a.delimiter,
            n_inputs:    a.n_inputs,
            n_outputs:   a.n_outputs,
            n_hidden:    a.n_hidden,
            n_neurons:   a.n_neurons,
            layer_act:   a.layer_act,
            out_act:     a.out_act,
            epochs:      a.epochs,
            batch_size:  a.batch_size,
            lr:          a.lr,
            degenerate:  a.degenerate,
            normalize:   !a.no_normalize,
            metrics_csv: a.metrics_csv,
            seeds: Seeds {
                numeric: a.numeric_seed,
                hash:    a.hash_seed.unwrap_or(defaults.seeds.hash),
                backend: a.backend_seed,
            },
        }
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Model file written by `train`
    #[arg(long)]
    pub model: PathBuf,

    /// CSV of raw inputs (extra trailing output columns are ignored)
    #[arg(long)]
    pub data: PathBuf,

    /// Write predictions here instead of printing them
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[arg(long)]
    pub model: PathBuf,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(long)]
    pub output: PathBuf,

    #[arg(long, default_value_t = 100)]
    pub rows: usize,

    #[arg(long, default_value_t = 6)]
    pub n_inputs: usize,

    #[arg(long, default_value_t = 2)]
    pub n_outputs: usize,

    #[arg(long, default_value_t = 46)]
    pub seed: u64,
}
