pub mod engine;

use crate::config::{ScoringConfig, WeightVector};
use crate::dataset::ZipRecord;
use crate::error::MapperResult;
use crate::metrics::Column;
use serde::Serialize;
use tracing::debug;

/// One entry of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredZip {
    pub zip_code: String,
    /// Opportunity Score in [0,1].
    pub score: f64,
    /// Position of the record in the scored slice.
    #[serde(skip)]
    pub index: usize,
}

impl ScoredZip {
    /// Score on a 0-100 scale, rounded to one decimal.
    pub fn percent(&self) -> f64 {
        (self.score * 1000.0).round() / 10.0
    }
}

/// Scores every record with the default unit size, no budget and the default
/// missing-value policy. Sorted by descending score.
pub fn score_all(records: &[ZipRecord], weights: &WeightVector) -> MapperResult<Vec<ScoredZip>> {
    score_with(records, &ScoringConfig::with_weights(*weights))
}

/// Filters by budget, scores, and ranks. Ties are broken by ZIP code.
pub fn score_with(records: &[ZipRecord], config: &ScoringConfig) -> MapperResult<Vec<ScoredZip>> {
    config.validate()?;

    let terms: Vec<(Column, f64)> = config
        .weights
        .iter()
        .filter(|&(_, w)| w > 0.0)
        .map(|(m, w)| (m.column(config.unit), w))
        .collect();
    let rent_column = Column::Rent(config.unit);

    let mut ranked = Vec::with_capacity(records.len());
    let mut over_budget = 0usize;
    let mut unscored = 0usize;

    for (index, record) in records.iter().enumerate() {
        if let Some(budget) = config.max_rent {
            match record.raw(rent_column) {
                Some(rent) if rent <= budget => {}
                _ => {
                    over_budget += 1;
                    continue;
                }
            }
        }

        match engine::weighted_mean(record, &terms, config.missing) {
            Some(score) => ranked.push(ScoredZip {
                zip_code: record.zip_code.clone(),
                score,
                index,
            }),
            None => unscored += 1,
        }
    }

    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.zip_code.cmp(&b.zip_code))
    });

    debug!(
        "Scored {} of {} ZIPs ({} over budget, {} without usable metrics).",
        ranked.len(),
        records.len(),
        over_budget,
        unscored
    );

    Ok(ranked)
}
