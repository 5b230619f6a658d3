// ============================================================
// Layer 6 - Metrics
// ============================================================
// Per-epoch training metrics, kept in memory as a
// TrainingHistory and optionally appended to a CSV file.
//
// Metrics recorded per epoch:
//   - loss: mean-squared-error objective, averaged over samples
//   - mae:  mean absolute error over every output value
//   - mse:  mean squared error over every output value
//
// Output file format:
//   epoch,loss,mae,mse
//   1,0.084512,0.241007,0.084512
//   2,0.071230,0.219843,0.071230

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One row of metrics for a single epoch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// Starts at 1
    pub epoch: usize,
    pub loss: f64,
    pub mae: f64,
    pub mse: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, loss: f64, mae: f64, mse: f64) -> Self {
        Self { epoch, loss, mae, mse }
    }

    pub fn is_improvement(&self, best_loss: f64) -> bool {
        self.loss < best_loss
    }
}

/// Every epoch of one training run, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    pub epochs: Vec<EpochMetrics>,
}

impl TrainingHistory {
    pub fn push(&mut self, m: EpochMetrics) {
        self.epochs.push(m);
    }

    pub fn last(&self) -> Option<&EpochMetrics> {
        self.epochs.last()
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    /// Epoch with the lowest loss.
    pub fn best(&self) -> Option<&EpochMetrics> {
        let mut best: Option<&EpochMetrics> = None;
        for m in &self.epochs {
            if best.map_or(true, |b| m.is_improvement(b.loss)) {
                best = Some(m);
            }
        }
        best
    }
}

/// Appends epoch metrics to a CSV file.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Writes the header if the file does not exist yet, so
    /// repeated runs append to one log.
    pub fn new(csv_path: impl Into<PathBuf>) -> Result<Self> {
        let csv_path = csv_path.into();

        if let Some(parent) = csv_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,loss,mae,mse")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(f, "{},{:.6},{:.6},{:.6}", m.epoch, m.loss, m.mae, m.mse)?;
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
