// ============================================================
// Layer 4 - Synthetic Dataset Generator
// ============================================================
// Produces a seeded table with the same layout as a real
// process dataset: `n_inputs` input columns followed by
// `n_outputs` output columns.
//
// Input column j is sampled uniformly from its own range
//   [10·j, 10·j + 5 + j]
// so every column has distinct bounds. Each output is a smooth
// nonlinear function of the inputs.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::domain::dataset::Dataset;
use crate::error::{Result, SurrogateError};

pub fn generate_dataset(
    rows: usize,
    n_inputs: usize,
    n_outputs: usize,
    seed: u64,
) -> Result<Dataset> {
    if rows < 2 || n_inputs == 0 || n_outputs == 0 {
        return Err(SurrogateError::InvalidConfig(format!(
            "generator needs at least 2 rows, 1 input and 1 output \
             (got {rows} rows, {n_inputs} inputs, {n_outputs} outputs)"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);

    let ranges: Vec<(f64, f64)> = (0..n_inputs)
        .map(|j| {
            let lo = 10.0 * j as f64;
            (lo, lo + 5.0 + j as f64)
        })
        .collect();

    let mut columns: Vec<String> = (1..=n_inputs).map(|j| format!("x{j}")).collect();
    columns.extend((1..=n_outputs).map(|k| format!("z{k}")));

    let mut data = Vec::with_capacity(rows);
    for _ in 0..rows {
        let x: Vec<f64> = ranges.iter().map(|&(lo, hi)| rng.gen_range(lo..hi)).collect();

        // unit-scaled copy drives the outputs
        let u: Vec<f64> = x
            .iter()
            .zip(&ranges)
            .map(|(v, (lo, hi))| (v - lo) / (hi - lo))
            .collect();

        let mut row = x;
        for k in 0..n_outputs {
            let phase = k as f64 + 1.0;
            let z: f64 = u
                .iter()
                .enumerate()
                .map(|(j, uj)| {
                    let w = ((j + 1) as f64 * phase).sin();
                    w * uj + 0.25 * (phase * uj * std::f64::consts::PI).cos()
                })
                .sum();
            row.push(100.0 * phase + z);
        }
        data.push(row);
    }

    Dataset::new(columns, data)
}
