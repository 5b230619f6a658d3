// ============================================================
// Layer 2 - Inspect / Generate Use Cases
// ============================================================
// Two small workflows that need no training:
//   - describe a saved model (layers, labels, bounds)
//   - write a seeded synthetic dataset to disk

use std::{fmt::Write, path::Path};

use anyhow::{Context, Result};

use crate::data::{generator::generate_dataset, loader::save_csv};
use crate::domain::{bounds::ColumnBounds, summary::ModelSummary};
use crate::infra::model_store::ModelStore;

/// Human-readable description of the model stored at `path`.
pub fn describe_model(path: &Path) -> Result<String> {
    let cfg = ModelStore::new(path)
        .load_config()
        .with_context(|| format!("Cannot read model '{}'", path.display()))?;

    let mut out = String::new();
    writeln!(out, "Model: {}", path.display())?;
    writeln!(out, "{}", ModelSummary::from_config(&cfg))?;
    writeln!(out, "Normalized: {}", cfg.normalized)?;
    write_bounds(&mut out, "Inputs", &cfg.input_bounds)?;
    write_bounds(&mut out, "Outputs", &cfg.output_bounds)?;
    Ok(out)
}

fn write_bounds(out: &mut String, title: &str, bounds: &ColumnBounds) -> std::fmt::Result {
    writeln!(out, "{title}:")?;
    for (label, b) in bounds.iter() {
        writeln!(out, "  {label:<24} [{}, {}]", b.min, b.max)?;
    }
    Ok(())
}

pub fn generate_to_csv(
    path: &Path,
    rows: usize,
    n_inputs: usize,
    n_outputs: usize,
    seed: u64,
) -> Result<()> {
    let data = generate_dataset(rows, n_inputs, n_outputs, seed)?;
    save_csv(&data, path).with_context(|| format!("Cannot write '{}'", path.display()))?;
    tracing::info!(
        "Generated {} rows ({} inputs, {} outputs) into '{}'",
        rows,
        n_inputs,
        n_outputs,
        path.display()
    );
    Ok(())
}
