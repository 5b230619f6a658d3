// ============================================================
// Layer 2 - Predict Use Case
// ============================================================
// Loads a model file and evaluates it on a CSV of raw inputs:
//   1. Restore the Predictor from the model file
//   2. Load the CSV; if it also carries output columns (e.g. the
//      training file itself), keep only the input columns
//   3. Scale, run, unscale (Surrogate::predict)
//   4. Write or return the predictions

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::data::loader::{save_csv, CsvLoader};
use crate::domain::{
    dataset::Dataset,
    traits::{DatasetSource, Surrogate},
};
use crate::ml::{inferencer::Predictor, CpuBackend};

pub struct PredictUseCase {
    data_path: PathBuf,
    output_path: Option<PathBuf>,
    predictor: Predictor<CpuBackend>,
}

impl PredictUseCase {
    pub fn new(model_path: PathBuf, data_path: PathBuf, output_path: Option<PathBuf>) -> Result<Self> {
        let predictor = Predictor::from_file(&model_path, Default::default())
            .with_context(|| format!("Cannot load model '{}'", model_path.display()))?;
        Ok(Self { data_path, output_path, predictor })
    }

    pub fn execute(&self) -> Result<Dataset> {
        let data = CsvLoader::new(&self.data_path)
            .load()
            .with_context(|| format!("Cannot load inputs '{}'", self.data_path.display()))?;

        let inputs = self.select_inputs(data)?;
        let outputs = self.predictor.predict(&inputs).context("Prediction failed")?;
        tracing::info!("Predicted {} rows", outputs.n_rows());

        if let Some(path) = &self.output_path {
            save_csv(&outputs, path)
                .with_context(|| format!("Cannot write predictions to '{}'", path.display()))?;
            tracing::info!("Predictions written to '{}'", path.display());
        }
        Ok(outputs)
    }

    fn select_inputs(&self, data: Dataset) -> Result<Dataset> {
        let cfg = self.predictor.config();
        let n = cfg.n_inputs;
        if data.n_columns() > n && data.columns()[..n] == cfg.input_labels[..] {
            let (inputs, _) = data.split_columns(n)?;
            return Ok(inputs);
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        bounds::{Bounds, ColumnBounds},
        model_config::{Hyperparameters, ModelConfig},
    };
    use crate::error::SurrogateError;
    use crate::infra::model_store::ModelStore;
    use crate::ml::model::SurrogateMlpConfig;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_model(path: &Path) {
        let cfg = ModelConfig::new(
            &Hyperparameters::default(),
            ColumnBounds::from_entries(vec![
                ("a".into(), Bounds::new(0.0, 10.0)),
                ("b".into(), Bounds::new(-1.0, 1.0)),
            ]),
            ColumnBounds::from_entries(vec![
                ("y1".into(), Bounds::new(100.0, 200.0)),
                ("y2".into(), Bounds::new(0.0, 0.5)),
            ]),
            true,
        )
        .unwrap();
        let net = SurrogateMlpConfig::from_model_config(&cfg).init::<CpuBackend>(&Default::default());
        ModelStore::new(path).save(&net, &cfg).unwrap();
    }

    fn write_table(path: &Path, columns: &[&str], rows: Vec<Vec<f64>>) {
        let table = Dataset::new(columns.iter().map(|c| c.to_string()).collect(), rows).unwrap();
        save_csv(&table, path).unwrap();
    }

    #[test]
    fn test_input_only_csv() {
        let dir = tempdir().unwrap();
        let model = dir.path().join("m.json");
        let data = dir.path().join("x.csv");
        write_model(&model);
        write_table(&data, &["a", "b"], vec![vec![1.0, 0.0], vec![9.0, 0.5]]);

        let out = PredictUseCase::new(model, data, None).unwrap().execute().unwrap();
        assert_eq!(out.columns(), &["y1".to_string(), "y2".to_string()]);
        assert_eq!(out.n_rows(), 2);
        assert!(out.rows().iter().all(|r| (100.0..=200.0).contains(&r[0])));
    }

    #[test]
    fn test_trailing_output_columns_are_dropped() {
        let dir = tempdir().unwrap();
        let model = dir.path().join("m.json");
        let data = dir.path().join("train.csv");
        let out_csv = dir.path().join("pred.csv");
        write_model(&model);
        write_table(
            &data,
            &["a", "b", "y1", "y2"],
            vec![vec![1.0, 0.0, 150.0, 0.1], vec![9.0, 0.5, 190.0, 0.4]],
        );

        let out = PredictUseCase::new(model, data, Some(out_csv.clone()))
            .unwrap()
            .execute()
            .unwrap();
        assert_eq!(out.n_columns(), 2);
        assert_eq!(out.n_rows(), 2);
        let written = CsvLoader::new(&out_csv).load().unwrap();
        assert_eq!(written, out);
    }

    #[test]
    fn test_mismatched_columns_rejected() {
        let dir = tempdir().unwrap();
        let model = dir.path().join("m.json");
        let data = dir.path().join("bad.csv");
        write_model(&model);
        write_table(&data, &["b", "a", "y1", "y2"], vec![vec![0.0, 1.0, 150.0, 0.1]]);

        let err = PredictUseCase::new(model, data, None).unwrap().execute().unwrap_err();
        assert!(err.chain().any(|e| matches!(
            e.downcast_ref::<SurrogateError>(),
            Some(SurrogateError::ShapeMismatch(_))
        )));
    }
}
