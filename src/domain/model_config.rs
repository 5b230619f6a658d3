// ============================================================
// Layer 3 - ModelConfig
// ============================================================
// The record that travels with a trained model:
//
//   hyperparameters      n_hidden, n_neurons, layer_act, out_act
//   shape                n_inputs, n_outputs
//   data metadata        labels, bounds, normalized flag
//
// A loaded model is interpreted entirely from this record;
// nothing is re-derived from the training data.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::bounds::ColumnBounds;
use crate::error::{Result, SurrogateError};

/// Per-neuron nonlinearity applied after each dense layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Relu,
    Sigmoid,
    Tanh,
    Gelu,
    Linear,
}

impl Activation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activation::Relu => "relu",
            Activation::Sigmoid => "sigmoid",
            Activation::Tanh => "tanh",
            Activation::Gelu => "gelu",
            Activation::Linear => "linear",
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Activation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relu" => Ok(Activation::Relu),
            "sigmoid" => Ok(Activation::Sigmoid),
            "tanh" => Ok(Activation::Tanh),
            "gelu" => Ok(Activation::Gelu),
            "linear" | "identity" => Ok(Activation::Linear),
            other => Err(format!(
                "unknown activation '{other}' (expected relu, sigmoid, tanh, gelu or linear)"
            )),
        }
    }
}

/// Network shape and activations, chosen before any data is seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    pub n_hidden: usize,
    pub n_neurons: usize,
    pub layer_act: Activation,
    pub out_act: Activation,
    /// Width of the output layer. Fixed by configuration, not by the data.
    pub n_outputs: usize,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            n_hidden: 1,
            n_neurons: 12,
            layer_act: Activation::Relu,
            out_act: Activation::Sigmoid,
            n_outputs: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub n_hidden: usize,
    pub n_neurons: usize,
    pub layer_act: Activation,
    pub out_act: Activation,
    pub n_inputs: usize,
    pub n_outputs: usize,
    pub input_labels: Vec<String>,
    pub output_labels: Vec<String>,
    pub input_bounds: ColumnBounds,
    pub output_bounds: ColumnBounds,
    /// Whether the model was trained on min-max scaled data.
    /// Consumers scale inputs and unscale outputs when set.
    pub normalized: bool,
}

impl ModelConfig {
    /// Combine hyperparameters with the data-derived metadata.
    ///
    /// Labels come from the bounds, so the two can never disagree.
    /// Fails if the output bounds do not describe exactly
    /// `hyper.n_outputs` columns.
    pub fn new(
        hyper: &Hyperparameters,
        input_bounds: ColumnBounds,
        output_bounds: ColumnBounds,
        normalized: bool,
    ) -> Result<Self> {
        if input_bounds.is_empty() {
            return Err(SurrogateError::InvalidConfig(
                "a model needs at least one input column".into(),
            ));
        }
        if hyper.n_outputs == 0 {
            return Err(SurrogateError::InvalidConfig(
                "output layer width must be at least 1".into(),
            ));
        }
        if hyper.n_hidden > 0 && hyper.n_neurons == 0 {
            return Err(SurrogateError::InvalidConfig(format!(
                "{} hidden layers requested with 0 neurons each",
                hyper.n_hidden
            )));
        }
        if output_bounds.len() != hyper.n_outputs {
            return Err(SurrogateError::ShapeMismatch(format!(
                "output layer has {} units but the data has {} output columns ({})",
                hyper.n_outputs,
                output_bounds.len(),
                output_bounds.labels().join(", ")
            )));
        }

        Ok(Self {
            n_hidden: hyper.n_hidden,
            n_neurons: hyper.n_neurons,
            layer_act: hyper.layer_act,
            out_act: hyper.out_act,
            n_inputs: input_bounds.len(),
            n_outputs: hyper.n_outputs,
            input_labels: input_bounds.labels(),
            output_labels: output_bounds.labels(),
            input_bounds,
            output_bounds,
            normalized,
        })
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
}
