use crate::error::{MapperError, MapperResult};
use crate::metrics::Column;
use std::collections::BTreeMap;

pub const ZIP_HEADER: &str = "ZIP";
pub const PLACE_HEADER: &str = "PO_NAME";
pub const GEOMETRY_HEADER: &str = "GEOMETRY";

/// Column positions resolved from a header row.
#[derive(Debug, Clone)]
pub struct Schema {
    pub zip: usize,
    pub place: Option<usize>,
    pub geometry: usize,
    pub raw: BTreeMap<Column, usize>,
    /// `None` when the file carries no `norm_*` columns.
    pub normalized: Option<BTreeMap<Column, usize>>,
}

impl Schema {
    /// Headers every input file must carry.
    pub fn required_headers() -> Vec<String> {
        let mut headers = vec![ZIP_HEADER.to_string(), GEOMETRY_HEADER.to_string()];
        headers.extend(Column::all().iter().map(Column::raw_header));
        headers
    }

    /// Resolves header positions, reporting every missing column at once.
    pub fn resolve(headers: &[String]) -> MapperResult<Schema> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let mut missing = Vec::new();
        let mut require = |name: String| match find(&name) {
            Some(idx) => Some(idx),
            None => {
                missing.push(name);
                None
            }
        };

        let zip = require(ZIP_HEADER.to_string());
        let geometry = require(GEOMETRY_HEADER.to_string());

        let mut raw = BTreeMap::new();
        for column in Column::all() {
            if let Some(idx) = require(column.raw_header()) {
                raw.insert(column, idx);
            }
        }

        let norm_found: Vec<(Column, Option<usize>)> = Column::all()
            .into_iter()
            .map(|c| (c, find(&c.norm_header())))
            .collect();
        let present = norm_found.iter().filter(|(_, idx)| idx.is_some()).count();

        let normalized = if present == 0 {
            None
        } else {
            // Normalized columns come all-or-nothing.
            for (column, idx) in &norm_found {
                if idx.is_none() {
                    missing.push(column.norm_header());
                }
            }
            Some(
                norm_found
                    .into_iter()
                    .filter_map(|(c, idx)| idx.map(|i| (c, i)))
                    .collect(),
            )
        };

        match (zip, geometry) {
            (Some(zip), Some(geometry)) if missing.is_empty() => Ok(Schema {
                zip,
                place: find(PLACE_HEADER),
                geometry,
                raw,
                normalized,
            }),
            _ => Err(MapperError::SchemaMismatch { missing }),
        }
    }

    pub fn has_normalized(&self) -> bool {
        self.normalized.is_some()
    }
}
