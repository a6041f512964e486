use super::schema::Schema;
use super::{RawDataset, ZipRecord};
use crate::error::{MapperError, MapperResult};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

const MISSING_TOKENS: [&str; 5] = ["", "na", "n/a", "nan", "null"];

/// Header row plus string rows, before any typing.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<csv::StringRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell {
    Missing,
    Number(f64),
    Invalid,
}

fn parse_cell(raw: &str) -> Cell {
    let s = raw.trim();
    if MISSING_TOKENS.iter().any(|t| s.eq_ignore_ascii_case(t)) {
        return Cell::Missing;
    }
    let digits = if s.contains(',') {
        match strip_grouping(s) {
            Some(d) => d,
            None => return Cell::Invalid,
        }
    } else {
        s.to_string()
    };
    match digits.parse::<f64>() {
        Ok(v) if v.is_finite() => Cell::Number(v),
        _ => Cell::Invalid,
    }
}

/// Removes thousands separators from `"1,250.5"`-style numbers.
///
/// Groups after the first must be exactly three digits and the first one to
/// three, otherwise the cell is rejected (`"1,2,3"` is not `123`).
fn strip_grouping(s: &str) -> Option<String> {
    let unsigned = s.strip_prefix(['-', '+']).unwrap_or(s);
    let (int_part, frac) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    if frac.is_some_and(|f| f.contains(',')) {
        return None;
    }

    let mut groups = int_part.split(',');
    let lead = groups.next()?;
    let all_digits = |g: &str| g.bytes().all(|b| b.is_ascii_digit());
    if lead.is_empty() || lead.len() > 3 || !all_digits(lead) {
        return None;
    }
    if !groups.all(|g| g.len() == 3 && all_digits(g)) {
        return None;
    }
    Some(s.replace(',', ""))
}

pub fn read_table<R: Read>(reader: R) -> MapperResult<CsvTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let mut rows = Vec::new();
    for result in rdr.records() {
        rows.push(result?);
    }
    Ok(CsvTable { headers, rows })
}

pub fn read_table_from_path<P: AsRef<Path>>(path: P) -> MapperResult<CsvTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        MapperError::Io(std::io::Error::new(
            e.kind(),
            format!("could not open dataset at '{}': {}", path.display(), e),
        ))
    })?;
    read_table(file)
}

/// Types every row against the resolved schema.
pub fn parse_rows(table: CsvTable) -> MapperResult<RawDataset> {
    let schema = Schema::resolve(&table.headers)?;
    let mut records = Vec::with_capacity(table.rows.len());
    let mut seen = HashSet::new();
    let mut invalid_cells = 0usize;

    for (row_idx, row) in table.rows.iter().enumerate() {
        // Header is line 1.
        let line = row_idx + 2;
        let cell = |idx: usize| row.get(idx).unwrap_or("").trim();

        let zip_code = cell(schema.zip).to_string();
        if zip_code.is_empty() {
            warn!("[Line {}] Skipping row without a ZIP code.", line);
            continue;
        }
        if !seen.insert(zip_code.clone()) {
            return Err(MapperError::Validation(format!(
                "duplicate ZIP code '{}' at line {}",
                zip_code, line
            )));
        }

        let mut record = ZipRecord::new(zip_code).with_geometry(cell(schema.geometry));
        if let Some(name) = schema.place.map(cell).filter(|n| !n.is_empty()) {
            record = record.with_place(name);
        }

        for (&column, &idx) in &schema.raw {
            match parse_cell(cell(idx)) {
                Cell::Number(v) => {
                    record.raw.insert(column, v);
                }
                Cell::Missing => {}
                Cell::Invalid => {
                    invalid_cells += 1;
                    warn!(
                        "[Line {}] Unreadable value '{}' in {}; treating as missing.",
                        line,
                        cell(idx),
                        column.raw_header()
                    );
                }
            }
        }

        if let Some(norm) = &schema.normalized {
            for (&column, &idx) in norm {
                match parse_cell(cell(idx)) {
                    Cell::Number(v) if (0.0..=1.0).contains(&v) => {
                        record.normalized.insert(column, v);
                    }
                    Cell::Number(v) => {
                        return Err(MapperError::Validation(format!(
                            "{} = {} at line {} is outside [0, 1]",
                            column.norm_header(),
                            v,
                            line
                        )));
                    }
                    Cell::Missing => {}
                    Cell::Invalid => {
                        invalid_cells += 1;
                        warn!(
                            "[Line {}] Unreadable value '{}' in {}; treating as missing.",
                            line,
                            cell(idx),
                            column.norm_header()
                        );
                    }
                }
            }
        }

        records.push(record);
    }

    debug!(
        "Parsed {} ZIP records ({} unreadable cells, normalized columns {}).",
        records.len(),
        invalid_cells,
        if schema.has_normalized() {
            "present"
        } else {
            "absent"
        }
    );

    Ok(RawDataset {
        records,
        precomputed: schema.has_normalized(),
    })
}
