// ============================================================
// Layer 3 - Model Summary
// ============================================================
// A per-layer listing of a configured network, used by the
// `summary` command and written into the model file as its
// architecture description.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::model_config::{Activation, ModelConfig};

/// One dense layer: `units` neurons fed by `inputs` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub layer: String,
    pub inputs: usize,
    pub units: usize,
    pub activation: Activation,
    pub parameters: usize,
}

impl LayerSpec {
    fn dense(layer: String, inputs: usize, units: usize, activation: Activation) -> Self {
        // weights + biases
        let parameters = inputs * units + units;
        Self { layer, inputs, units, activation, parameters }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelSummary {
    pub layers: Vec<LayerSpec>,
}

impl ModelSummary {
    pub fn from_config(cfg: &ModelConfig) -> Self {
        let mut layers = Vec::with_capacity(cfg.n_hidden + 1);
        let mut fan_in = cfg.n_inputs;

        for i in 0..cfg.n_hidden {
            layers.push(LayerSpec::dense(
                format!("hidden_{i}"),
                fan_in,
                cfg.n_neurons,
                cfg.layer_act,
            ));
            fan_in = cfg.n_neurons;
        }
        layers.push(LayerSpec::dense("output".into(), fan_in, cfg.n_outputs, cfg.out_act));

        Self { layers }
    }

    pub fn total_parameters(&self) -> usize {
        self.layers.iter().map(|l| l.parameters).sum()
    }

    pub fn output_units(&self) -> usize {
        self.layers.last().map(|l| l.units).unwrap_or(0)
    }
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<12} {:>8} {:>8} {:<10} {:>10}", "Layer", "Inputs", "Units", "Activation", "Params")?;
        writeln!(f, "{}", "-".repeat(52))?;
        for l in &self.layers {
            writeln!(
                f,
                "{:<12} {:>8} {:>8} {:<10} {:>10}",
                l.layer, l.inputs, l.units, l.activation, l.parameters
            )?;
        }
        writeln!(f, "{}", "-".repeat(52))?;
        write!(f, "Total params: {}", self.total_parameters())
    }
}
