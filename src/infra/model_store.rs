// ============================================================
// Layer 6 - Model Store
// ============================================================
// Saves a trained model as ONE self-describing JSON file and
// restores it without the training data.
//
// What the file holds:
//   1. format / version   - checked on load
//   2. config             - ModelConfig: hyperparameters, labels,
//                           bounds, normalized flag
//   3. architecture       - per-layer units / activation / params
//   4. weights            - Burn record item, full precision
//
// Loading reads the header first, rebuilds the network from
// `config`, then loads the weights into it and checks that the
// resulting shapes agree with `config`.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use burn::{
    prelude::*,
    record::{FullPrecisionSettings, Record},
};
use serde::{Deserialize, Serialize};

use crate::domain::{
    model_config::ModelConfig,
    summary::{LayerSpec, ModelSummary},
};
use crate::error::{Result, SurrogateError};
use crate::ml::model::{SurrogateMlp, SurrogateMlpConfig};

pub const FORMAT: &str = "surrogate-mlp";
pub const VERSION: u32 = 1;

type WeightsItem<B> =
    <<SurrogateMlp<B> as Module<B>>::Record as Record<B>>::Item<FullPrecisionSettings>;

#[derive(Serialize, Deserialize)]
struct ModelFile<W> {
    format: String,
    version: u32,
    config: ModelConfig,
    architecture: Vec<LayerSpec>,
    weights: W,
}

#[derive(Deserialize)]
struct Header {
    format: String,
    version: u32,
}

pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn save<B: Backend>(&self, network: &SurrogateMlp<B>, config: &ModelConfig) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = ModelFile {
            format: FORMAT.to_string(),
            version: VERSION,
            config: config.clone(),
            architecture: ModelSummary::from_config(config).layers,
            weights: network.clone().into_record().into_item::<FullPrecisionSettings>(),
        };

        // Written beside the target and renamed into place, so a failed
        // save never leaves a truncated model at `path`.
        let tmp = self.temp_path();
        let written = write_json(&tmp, &file).and_then(|()| Ok(fs::rename(&tmp, &self.path)?));
        if written.is_err() && tmp.exists() {
            if let Err(e) = fs::remove_file(&tmp) {
                tracing::warn!("Cannot remove '{}': {}", tmp.display(), e);
            }
        }
        written?;

        tracing::info!("Saved model to '{}'", self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Only the metadata; the weights are parsed but not turned into tensors.
    pub fn load_config(&self) -> Result<ModelConfig> {
        let value = self.read_checked()?;
        let config = value
            .get("config")
            .cloned()
            .ok_or_else(|| SurrogateError::ShapeMismatch("model file has no 'config' section".into()))?;
        Ok(serde_json::from_value(config)?)
    }

    pub fn load<B: Backend>(&self, device: &B::Device) -> Result<(SurrogateMlp<B>, ModelConfig)> {
        let value = self.read_checked()?;
        let file: ModelFile<WeightsItem<B>> = serde_json::from_value(value)?;

        let expected = ModelSummary::from_config(&file.config).layers;
        if file.architecture != expected {
            return Err(SurrogateError::ShapeMismatch(
                "architecture section does not match the stored config".into(),
            ));
        }

        let record = <SurrogateMlp<B> as Module<B>>::Record::from_item::<FullPrecisionSettings>(
            file.weights,
            device,
        );
        let network = SurrogateMlpConfig::from_model_config(&file.config)
            .init::<B>(device)
            .load_record(record);

        let cfg = &file.config;
        if network.hidden.len() != cfg.n_hidden
            || network.input_units() != cfg.n_inputs
            || network.output_units() != cfg.n_outputs
        {
            return Err(SurrogateError::ShapeMismatch(format!(
                "stored weights describe {} -> {} with {} hidden layers, config says {} -> {} with {}",
                network.input_units(),
                network.output_units(),
                network.hidden.len(),
                cfg.n_inputs,
                cfg.n_outputs,
                cfg.n_hidden
            )));
        }

        Ok((network, file.config))
    }

    fn read_checked(&self) -> Result<serde_json::Value> {
        let reader = BufReader::new(File::open(&self.path)?);
        let value: serde_json::Value = serde_json::from_reader(reader)?;

        let header: Header = serde_json::from_value(value.clone()).map_err(|_| {
            SurrogateError::UnsupportedFormat {
                expected: FORMAT,
                expected_version: VERSION,
                found: "<missing header>".into(),
                found_version: 0,
            }
        })?;
        if header.format != FORMAT || header.version != VERSION {
            return Err(SurrogateError::UnsupportedFormat {
                expected: FORMAT,
                expected_version: VERSION,
                found: header.format,
                found_version: header.version,
            });
        }
        Ok(value)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
