#![allow(dead_code)]

use opportunity_mapper::dataset::ZipRecord;
use opportunity_mapper::metrics::{Column, UnitSize};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

pub const HEADER: &str = "ZIP,PO_NAME,GEOMETRY,RENT_STUDIO,RENT_1BD,RENT_2BD,RENT_3BD,RENT_4BD,CRIME_RATE,CRIME_TREND,TRANSIT_DISTANCE,MEDIAN_INCOME";

pub const RENT_1BD: Column = Column::Rent(UnitSize::OneBedroom);

/// Four ZIPs with one missing transit value (94103).
pub fn sample_csv() -> String {
    [
        HEADER,
        "94101,Alpha,g/94101,1000,2000,3000,4000,5000,10,1,0.5,100000",
        "94102,Beta,g/94102,1500,3000,3500,4500,5500,30,-1,1.5,50000",
        "94103,Gamma,g/94103,2000,4000,4000,5000,6000,20,0,NA,150000",
        "94104,Delta,g/94104,1200,2500,3200,4200,5200,40,2,1.0,75000",
    ]
    .join("\n")
}

pub fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", contents).unwrap();
    file.flush().unwrap();
    file
}

/// Record carrying only normalized values.
pub fn norm_record(zip: &str, values: &[(Column, f64)]) -> ZipRecord {
    values
        .iter()
        .fold(ZipRecord::new(zip), |r, &(c, v)| r.with_normalized(c, v))
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a plain-text subscriber and returns what it logged.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(move || writer.clone())
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).to_string();
    (out, logs)
}
