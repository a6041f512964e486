use super::schema::{GEOMETRY_HEADER, PLACE_HEADER, ZIP_HEADER};
use super::Dataset;
use crate::error::MapperResult;
use crate::metrics::Column;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

fn fmt_value(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Writes raw and normalized columns, in a layout `load_dataset` reads back.
pub fn write_dataset<W: Write>(dataset: &Dataset, writer: W) -> MapperResult<()> {
    let columns = Column::all();
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec![
        ZIP_HEADER.to_string(),
        PLACE_HEADER.to_string(),
        GEOMETRY_HEADER.to_string(),
    ];
    header.extend(columns.iter().map(Column::raw_header));
    header.extend(columns.iter().map(Column::norm_header));
    wtr.write_record(&header)?;

    for record in dataset.records() {
        let mut row = vec![
            record.zip_code.clone(),
            record.place_name.clone().unwrap_or_default(),
            record.geometry.clone(),
        ];
        row.extend(columns.iter().map(|&c| fmt_value(record.raw(c))));
        row.extend(columns.iter().map(|&c| fmt_value(record.normalized(c))));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_dataset_to_path<P: AsRef<Path>>(dataset: &Dataset, path: P) -> MapperResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_dataset(dataset, file)?;
    info!("💾 Wrote {} records to {}", dataset.len(), path.display());
    Ok(())
}
