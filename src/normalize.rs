//! Min-max normalization of raw metric columns.
//!
//! Every normalized value lies in [0,1] with higher meaning better: columns
//! whose raw values are better when lower are inverted. Missing values stay
//! missing and do not take part in the min/max.

use crate::dataset::{Dataset, RawDataset};
use crate::error::{MapperError, MapperResult};
use crate::metrics::{Column, Polarity};
use tracing::{debug, warn};

/// Value assigned to every present entry of a constant column.
pub const NEUTRAL_SCORE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub column: Column,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub present: usize,
    pub missing: usize,
    pub degenerate: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizationReport {
    /// Normalized values came from the input file rather than this pass.
    pub precomputed: bool,
    pub columns: Vec<ColumnStats>,
    /// Constant columns that were assigned `NEUTRAL_SCORE`.
    pub degenerate: Vec<Column>,
}

impl NormalizationReport {
    pub fn stats(&self, column: Column) -> Option<&ColumnStats> {
        self.columns.iter().find(|s| s.column == column)
    }
}

pub fn min_max(values: &[Option<f64>]) -> Option<(f64, f64)> {
    values.iter().flatten().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Rescales one column to [0,1], inverting lower-is-better columns.
///
/// Fails with `DegenerateColumn` when every present value is identical.
/// An all-missing column is returned unchanged.
pub fn normalize_column(column: Column, values: &[Option<f64>]) -> MapperResult<Vec<Option<f64>>> {
    let Some((min, max)) = min_max(values) else {
        return Ok(values.to_vec());
    };
    // Work in units of the largest magnitude so `max - min` cannot overflow.
    let scale = max.abs().max(min.abs());
    let (lo, hi) = (min / scale, max / scale);
    let span = hi - lo;
    if max == min || span == 0.0 {
        return Err(MapperError::DegenerateColumn { column });
    }

    let polarity = column.polarity();
    Ok(values
        .iter()
        .map(|v| {
            v.map(|x| {
                let n = ((x / scale - lo) / span).clamp(0.0, 1.0);
                match polarity {
                    Polarity::HigherIsBetter => n,
                    Polarity::LowerIsBetter => 1.0 - n,
                }
            })
        })
        .collect())
}

fn column_stats(column: Column, values: &[Option<f64>], degenerate: bool) -> ColumnStats {
    let bounds = min_max(values);
    let present = values.iter().flatten().count();
    ColumnStats {
        column,
        min: bounds.map(|b| b.0),
        max: bounds.map(|b| b.1),
        present,
        missing: values.len() - present,
        degenerate,
    }
}

/// Normalizes every column of the dataset.
///
/// Constant columns are recovered with `NEUTRAL_SCORE` and a single warning.
/// When the file already carried normalized columns they are kept as loaded.
pub fn normalize_dataset(raw: RawDataset) -> MapperResult<Dataset> {
    let RawDataset {
        mut records,
        precomputed,
    } = raw;

    let mut report = NormalizationReport {
        precomputed,
        ..Default::default()
    };

    for column in Column::all() {
        let values: Vec<Option<f64>> = records.iter().map(|r| r.raw(column)).collect();

        if precomputed {
            report.columns.push(column_stats(column, &values, false));
            continue;
        }

        let normalized = match normalize_column(column, &values) {
            Ok(n) => {
                report.columns.push(column_stats(column, &values, false));
                n
            }
            Err(MapperError::DegenerateColumn { column }) => {
                warn!(
                    "⚠️  Column '{}' is constant across all records; using neutral score {}.",
                    column, NEUTRAL_SCORE
                );
                report.columns.push(column_stats(column, &values, true));
                report.degenerate.push(column);
                values.iter().map(|v| v.map(|_| NEUTRAL_SCORE)).collect()
            }
            Err(e) => return Err(e),
        };

        for (record, value) in records.iter_mut().zip(normalized) {
            match value {
                Some(v) => record.normalized.insert(column, v),
                None => record.normalized.remove(&column),
            };
        }
    }

    debug!(
        "Normalized {} records ({} degenerate columns).",
        records.len(),
        report.degenerate.len()
    );

    Ok(Dataset::new(records, report))
}
