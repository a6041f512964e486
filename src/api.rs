use crate::config::ScoringConfig;
use crate::dataset::{Dataset, ZipRecord};
use crate::error::MapperResult;
use crate::metrics::Column;
use crate::pipeline::load_dataset;
use crate::scorer::{score_with, ScoredZip};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// An immutable dataset plus the last ranking that scored successfully.
pub struct Session {
    dataset: Dataset,
    config: ScoringConfig,
    ranking: Vec<ScoredZip>,
}

/// Ranked row handed to a map widget.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapEntry {
    pub rank: usize,
    pub zip_code: String,
    pub place_name: Option<String>,
    pub score: f64,
    pub percent: f64,
    pub rent: Option<f64>,
    pub geometry: String,
}

impl Session {
    /// Scores the dataset once; the initial configuration must be valid.
    pub fn new(dataset: Dataset, config: ScoringConfig) -> MapperResult<Self> {
        let ranking = score_with(dataset.records(), &config)?;
        Ok(Self {
            dataset,
            config,
            ranking,
        })
    }

    pub fn open<P: AsRef<Path>>(path: P, config: ScoringConfig) -> MapperResult<Self> {
        let dataset = load_dataset(path)?;
        Self::new(dataset, config)
    }

    /// Recomputes the ranking. On failure the previous ranking and
    /// configuration stay in place and the error is returned.
    pub fn rescore(&mut self, config: ScoringConfig) -> MapperResult<&[ScoredZip]> {
        match score_with(self.dataset.records(), &config) {
            Ok(ranking) => {
                info!(
                    "⚖️  Rescored {} ZIPs ({} ranked).",
                    self.dataset.len(),
                    ranking.len()
                );
                self.ranking = ranking;
                self.config = config;
                Ok(self.ranking.as_slice())
            }
            Err(e) => {
                warn!("Keeping previous ranking: {}", e);
                Err(e)
            }
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn ranking(&self) -> &[ScoredZip] {
        &self.ranking
    }

    pub fn top(&self, n: usize) -> &[ScoredZip] {
        &self.ranking[..n.min(self.ranking.len())]
    }

    pub fn record(&self, scored: &ScoredZip) -> &ZipRecord {
        &self.dataset.records()[scored.index]
    }

    pub fn map_entries(&self) -> Vec<MapEntry> {
        let rent_column = Column::Rent(self.config.unit);
        self.ranking
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let record = self.record(s);
                MapEntry {
                    rank: i + 1,
                    zip_code: s.zip_code.clone(),
                    place_name: record.place_name.clone(),
                    score: s.score,
                    percent: s.percent(),
                    rent: record.raw(rent_column),
                    geometry: record.geometry.clone(),
                }
            })
            .collect()
    }
}
