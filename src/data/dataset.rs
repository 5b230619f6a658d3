use burn::data::dataset::Dataset;

use crate::domain::dataset::Dataset as Table;
use crate::error::{Result, SurrogateError};

/// One training example: scaled inputs and their scaled targets.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionSample {
    pub inputs: Vec<f32>,
    pub targets: Vec<f32>,
}

pub struct RegressionDataset {
    samples: Vec<RegressionSample>,
}

impl RegressionDataset {
    /// Pair row `i` of `inputs` with row `i` of `targets`.
    pub fn from_tables(inputs: &Table, targets: &Table) -> Result<Self> {
        if inputs.n_rows() != targets.n_rows() {
            return Err(SurrogateError::ShapeMismatch(format!(
                "{} input rows but {} target rows",
                inputs.n_rows(),
                targets.n_rows()
            )));
        }

        let samples = inputs
            .rows()
            .iter()
            .zip(targets.rows())
            .map(|(x, z)| RegressionSample {
                inputs: x.iter().map(|&v| v as f32).collect(),
                targets: z.iter().map(|&v| v as f32).collect(),
            })
            .collect();

        Ok(Self { samples })
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl Dataset<RegressionSample> for RegressionDataset {
    fn get(&self, index: usize) -> Option<RegressionSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
