// ============================================================
// Layer 4 - CSV Loader
// ============================================================
// Reads a delimited text file with a header row into a
// Dataset. Column names come from the header; every other
// field must parse as a finite f64.
//
// File layout expected by the training pipeline:
//
//   x1,x2,x3,x4,x5,x6,z1,z2      ← header
//   0.12,3.4,...,0.88,17.2       ← one row per sample
//
// Nothing here knows which columns are inputs; that split
// happens later, by position.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, Trim, WriterBuilder};

use crate::domain::{dataset::Dataset, traits::DatasetSource};
use crate::error::{Result, SurrogateError};

/// Loads one delimited file. Implements [`DatasetSource`].
pub struct CsvLoader {
    path: PathBuf,
    delimiter: u8,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), delimiter: b',' }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for CsvLoader {
    fn load(&self) -> Result<Dataset> {
        let file = File::open(&self.path)?;

        // flexible: ragged rows are reported by us, with the row number
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(file);

        let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        if columns.is_empty() {
            return Err(SurrogateError::MalformedData {
                row: 0,
                column: String::new(),
                reason: "header row is empty".into(),
            });
        }

        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let row_no = idx + 1;

            if record.len() != columns.len() {
                return Err(SurrogateError::MalformedData {
                    row: row_no,
                    column: String::new(),
                    reason: format!(
                        "expected {} fields, found {}",
                        columns.len(),
                        record.len()
                    ),
                });
            }

            let mut row = Vec::with_capacity(columns.len());
            for (field, column) in record.iter().zip(&columns) {
                let value: f64 = field.parse().map_err(|_| SurrogateError::MalformedData {
                    row: row_no,
                    column: column.clone(),
                    reason: format!("'{field}' is not a number"),
                })?;
                if !value.is_finite() {
                    return Err(SurrogateError::MalformedData {
                        row: row_no,
                        column: column.clone(),
                        reason: format!("'{field}' is not finite"),
                    });
                }
                row.push(value);
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(SurrogateError::EmptyDataset(self.path.display().to_string()));
        }

        tracing::debug!(
            "Loaded '{}': {} rows x {} columns",
            self.path.display(),
            rows.len(),
            columns.len()
        );
        Dataset::new(columns, rows)
    }
}

/// Write `dataset` as a comma-separated file with a header row.
pub fn save_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().from_writer(file);

    writer.write_record(dataset.columns())?;
    for row in dataset.rows() {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;

    tracing::debug!("Wrote {} rows to '{}'", dataset.n_rows(), path.display());
    Ok(())
}
