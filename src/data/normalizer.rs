// ============================================================
// Layer 4 - Min-Max Normalizer
// ============================================================
// Rescales every column into [0, 1]:
//
//   scaled = (value - min) / (max - min)
//
// and back again:
//
//   value  = scaled * (max - min) + min
//
// Bounds are computed once from the raw data (ColumnBounds)
// and then applied value by value. Input and output column
// groups each get their own bounds.
//
// A constant column (max == min) has no defined scaling. The
// DegeneratePolicy decides what happens: fail, or map to 0.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{bounds::ColumnBounds, dataset::Dataset};
use crate::error::{Result, SurrogateError};

/// What to do with a column whose min equals its max.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegeneratePolicy {
    /// Fail with `DegenerateColumn`.
    #[default]
    Reject,
    /// Scale every value of the column to 0.0.
    Zero,
}

impl FromStr for DegeneratePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(DegeneratePolicy::Reject),
            "zero" => Ok(DegeneratePolicy::Zero),
            other => Err(format!("unknown degenerate-column policy '{other}' (expected reject or zero)")),
        }
    }
}

/// Scale `dataset` into [0, 1] using `bounds`.
///
/// `bounds` must name the dataset's columns in order.
pub fn normalize(
    dataset: &Dataset,
    bounds: &ColumnBounds,
    policy: DegeneratePolicy,
) -> Result<Dataset> {
    check_columns(dataset, bounds)?;

    let spans: Vec<(f64, f64)> = bounds.iter().map(|(_, b)| (b.min, b.span())).collect();

    if policy == DegeneratePolicy::Reject {
        if let Some((label, b)) = bounds.iter().find(|(_, b)| b.is_degenerate()) {
            return Err(SurrogateError::DegenerateColumn {
                column: label.to_string(),
                value: b.min,
            });
        }
    }

    let mut rows = Vec::with_capacity(dataset.n_rows());
    for row in dataset.rows() {
        let mut scaled = Vec::with_capacity(row.len());
        for (j, &value) in row.iter().enumerate() {
            let (min, span) = spans[j];
            scaled.push(if span == 0.0 { 0.0 } else { (value - min) / span });
        }
        rows.push(scaled);
    }

    Dataset::new(dataset.columns().to_vec(), rows)
}

/// Reverse [`normalize`]. A constant column maps back to its min.
pub fn denormalize(dataset: &Dataset, bounds: &ColumnBounds) -> Result<Dataset> {
    check_columns(dataset, bounds)?;

    let spans: Vec<(f64, f64)> = bounds.iter().map(|(_, b)| (b.min, b.span())).collect();

    let rows = dataset
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(j, &v)| {
                    let (min, span) = spans[j];
                    v * span + min
                })
                .collect()
        })
        .collect();

    Dataset::new(dataset.columns().to_vec(), rows)
}

fn check_columns(dataset: &Dataset, bounds: &ColumnBounds) -> Result<()> {
    if bounds.matches_columns(dataset.columns()) {
        Ok(())
    } else {
        Err(SurrogateError::ShapeMismatch(format!(
            "bounds describe [{}] but the data has columns [{}]",
            bounds.labels().join(", "),
            dataset.columns().join(", ")
        )))
    }
}
