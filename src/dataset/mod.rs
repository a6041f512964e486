pub mod loader;
pub mod schema;
pub mod writer;

use crate::metrics::Column;
use crate::normalize::NormalizationReport;
use std::collections::{BTreeMap, HashMap};

/// One row of the dataset: a single ZIP code.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ZipRecord {
    pub zip_code: String,
    pub place_name: Option<String>,
    /// Boundary reference for the map layer. Never interpreted here.
    pub geometry: String,
    /// Raw values. An absent key means the value is missing.
    pub raw: BTreeMap<Column, f64>,
    /// Normalized values in [0,1], higher is better.
    pub normalized: BTreeMap<Column, f64>,
}

impl ZipRecord {
    pub fn new(zip_code: impl Into<String>) -> Self {
        Self {
            zip_code: zip_code.into(),
            ..Default::default()
        }
    }

    pub fn with_place(mut self, name: impl Into<String>) -> Self {
        self.place_name = Some(name.into());
        self
    }

    pub fn with_geometry(mut self, geometry: impl Into<String>) -> Self {
        self.geometry = geometry.into();
        self
    }

    pub fn with_raw(mut self, column: Column, value: f64) -> Self {
        self.raw.insert(column, value);
        self
    }

    pub fn with_normalized(mut self, column: Column, value: f64) -> Self {
        self.normalized.insert(column, value);
        self
    }

    #[inline]
    pub fn raw(&self, column: Column) -> Option<f64> {
        self.raw.get(&column).copied()
    }

    #[inline]
    pub fn normalized(&self, column: Column) -> Option<f64> {
        self.normalized.get(&column).copied()
    }
}

/// Records as parsed from the input file, before normalization.
#[derive(Debug, Clone, Default)]
pub struct RawDataset {
    pub records: Vec<ZipRecord>,
    /// True when the file carried every `norm_*` column.
    pub precomputed: bool,
}

/// Immutable, normalized record set used for scoring.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<ZipRecord>,
    index: HashMap<String, usize>,
    report: NormalizationReport,
}

impl Dataset {
    pub(crate) fn new(records: Vec<ZipRecord>, report: NormalizationReport) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.zip_code.clone(), i))
            .collect();
        Self {
            records,
            index,
            report,
        }
    }

    pub fn records(&self) -> &[ZipRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, zip_code: &str) -> Option<&ZipRecord> {
        self.index.get(zip_code).map(|&i| &self.records[i])
    }

    pub fn report(&self) -> &NormalizationReport {
        &self.report
    }
}
