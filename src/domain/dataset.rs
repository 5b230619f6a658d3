// ============================================================
// Layer 3 - Dataset Domain Type
// ============================================================
// An ordered sequence of rows, each row a fixed-width ordered
// sequence of named numeric fields.
//
// The column split is positional: the first `n_inputs`
// columns are model inputs, everything after them is an
// output. Column names are never consulted for the split.

use crate::error::{Result, SurrogateError};

/// A rectangular table of `f64` values with named columns.
///
/// Every row has exactly `columns.len()` values; `Dataset::new`
/// refuses anything ragged.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != columns.len())
        {
            return Err(SurrogateError::ShapeMismatch(format!(
                "row {} has {} values but there are {} columns",
                idx,
                row.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |row| row[index])
    }

    /// Split into `(inputs, outputs)` at column `n_inputs`.
    ///
    /// Both halves must be non-empty.
    pub fn split_columns(&self, n_inputs: usize) -> Result<(Dataset, Dataset)> {
        if n_inputs == 0 || n_inputs >= self.columns.len() {
            return Err(SurrogateError::ShapeMismatch(format!(
                "cannot take {} input columns from a table with {} columns \
                 (at least one output column is required)",
                n_inputs,
                self.columns.len()
            )));
        }

        let (in_cols, out_cols) = self.columns.split_at(n_inputs);
        let mut in_rows = Vec::with_capacity(self.rows.len());
        let mut out_rows = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let (x, z) = row.split_at(n_inputs);
            in_rows.push(x.to_vec());
            out_rows.push(z.to_vec());
        }

        Ok((
            Dataset { columns: in_cols.to_vec(), rows: in_rows },
            Dataset { columns: out_cols.to_vec(), rows: out_rows },
        ))
    }

    /// Row-major values narrowed to `f32`, ready to become a tensor.
    pub fn to_f32_flat(&self) -> Vec<f32> {
        self.rows
            .iter()
            .flat_map(|row| row.iter().map(|&v| v as f32))
            .collect()
    }
}
