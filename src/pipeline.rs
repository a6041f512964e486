//! Dataset preparation as a chain of typed stages.
//!
//! `ReadTable -> ParseRows -> Normalize`. A chain only compiles when each
//! stage's output is the next stage's input.

use crate::dataset::loader::{parse_rows, read_table, read_table_from_path, CsvTable};
use crate::dataset::{Dataset, RawDataset};
use crate::error::MapperResult;
use crate::normalize::normalize_dataset;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub trait Stage {
    type Input;
    type Output;

    fn name(&self) -> &'static str;

    fn run(&self, input: Self::Input) -> MapperResult<Self::Output>;

    fn then<S>(self, next: S) -> Chain<Self, S>
    where
        Self: Sized,
        S: Stage<Input = Self::Output>,
    {
        Chain { first: self, next }
    }
}

pub struct Chain<A, B> {
    first: A,
    next: B,
}

impl<A, B> Stage for Chain<A, B>
where
    A: Stage,
    B: Stage<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    fn name(&self) -> &'static str {
        self.next.name()
    }

    fn run(&self, input: Self::Input) -> MapperResult<Self::Output> {
        let mid = self.first.run(input)?;
        debug!("Stage '{}' complete.", self.first.name());
        self.next.run(mid)
    }
}

/// Reads the input file into untyped rows.
pub struct ReadTable;

impl Stage for ReadTable {
    type Input = PathBuf;
    type Output = CsvTable;

    fn name(&self) -> &'static str {
        "read_table"
    }

    fn run(&self, path: PathBuf) -> MapperResult<CsvTable> {
        info!("📂 Loading dataset: {}", path.display());
        read_table_from_path(path)
    }
}

/// Checks the schema and types each row.
pub struct ParseRows;

impl Stage for ParseRows {
    type Input = CsvTable;
    type Output = RawDataset;

    fn name(&self) -> &'static str {
        "parse_rows"
    }

    fn run(&self, table: CsvTable) -> MapperResult<RawDataset> {
        parse_rows(table)
    }
}

/// Fills normalized fields and collects column statistics.
pub struct Normalize;

impl Stage for Normalize {
    type Input = RawDataset;
    type Output = Dataset;

    fn name(&self) -> &'static str {
        "normalize"
    }

    fn run(&self, raw: RawDataset) -> MapperResult<Dataset> {
        normalize_dataset(raw)
    }
}

pub fn load_dataset<P: AsRef<Path>>(path: P) -> MapperResult<Dataset> {
    let dataset = ReadTable
        .then(ParseRows)
        .then(Normalize)
        .run(path.as_ref().to_path_buf())?;
    info!("✅ Loaded {} ZIP records.", dataset.len());
    Ok(dataset)
}

pub fn load_dataset_from_reader<R: Read>(reader: R) -> MapperResult<Dataset> {
    ParseRows.then(Normalize).run(read_table(reader)?)
}
