// ============================================================
// Layer 3 - Column Bounds
// ============================================================
// Per-column (min, max) pairs computed once from the raw data
// before normalization. They are stored with the model so a
// loaded model can scale new inputs and unscale its outputs
// without the original dataset.
//
// Serialized form (column order preserved):
//   { "temperature": [300.0, 420.0], "pressure": [1.0, 2.5] }

use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::domain::dataset::Dataset;
use crate::error::{Result, SurrogateError};

/// Closed interval `[min, max]` observed in one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// A constant column: min-max scaling would divide by zero.
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl From<(f64, f64)> for Bounds {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<Bounds> for (f64, f64) {
    fn from(b: Bounds) -> Self {
        (b.min, b.max)
    }
}

/// Ordered mapping from column label to its [`Bounds`].
///
/// Iteration order is column order, never hash order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnBounds {
    entries: Vec<(String, Bounds)>,
}

impl ColumnBounds {
    /// Scan every column of `dataset` once and record its min and max.
    pub fn compute(dataset: &Dataset) -> Result<Self> {
        if dataset.is_empty() {
            return Err(SurrogateError::EmptyDataset(format!(
                "columns [{}]",
                dataset.columns().join(", ")
            )));
        }

        let entries = dataset
            .columns()
            .iter()
            .enumerate()
            .map(|(j, label)| {
                let (min, max) = dataset
                    .column(j)
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                        (lo.min(v), hi.max(v))
                    });
                (label.clone(), Bounds::new(min, max))
            })
            .collect();

        Ok(Self { entries })
    }

    pub fn from_entries(entries: Vec<(String, Bounds)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, label: &str) -> Option<Bounds> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, b)| *b)
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(l, _)| l.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Bounds)> {
        self.entries.iter().map(|(l, b)| (l.as_str(), *b))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when `columns` names exactly these labels in the same order.
    pub fn matches_columns(&self, columns: &[String]) -> bool {
        self.entries.len() == columns.len()
            && self.entries.iter().zip(columns).all(|((l, _), c)| l == c)
    }
}

impl Serialize for ColumnBounds {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, bounds) in &self.entries {
            map.serialize_entry(label, bounds)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ColumnBounds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = ColumnBounds;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from column label to [min, max]")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, bounds)) = access.next_entry::<String, Bounds>()? {
                    entries.push((label, bounds));
                }
                Ok(ColumnBounds { entries })
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}
