use crate::error::{MapperError, MapperResult};
use crate::metrics::{Metric, UnitSize};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumString};

/// Everything a single scoring call depends on.
#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    #[command(flatten)]
    pub weights: WeightVector,

    /// Apartment size whose rent feeds the rent metric.
    #[arg(long, default_value_t = UnitSize::OneBedroom)]
    pub unit: UnitSize,

    /// Monthly budget; ZIPs above it (or with unknown rent) are excluded.
    #[arg(long)]
    pub max_rent: Option<f64>,

    #[arg(long, default_value_t = MissingPolicy::Exclude)]
    pub missing: MissingPolicy,
}

/// How a missing normalized value is treated when scoring a record.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Leave the term out of numerator and denominator for that record.
    #[default]
    Exclude,
    /// Drop any record missing a positively weighted metric.
    Drop,
}

/// Non-negative importance per metric. Defaults to equal weighting.
#[derive(Args, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightVector {
    #[arg(long, default_value_t = 1.0)]
    pub rent: f64,
    #[arg(long, default_value_t = 1.0)]
    pub crime_rate: f64,
    #[arg(long, default_value_t = 1.0)]
    pub crime_trend: f64,
    #[arg(long, default_value_t = 1.0)]
    pub transit_distance: f64,
    #[arg(long, default_value_t = 1.0)]
    pub median_income: f64,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            rent: 1.0,
            crime_rate: 1.0,
            crime_trend: 1.0,
            transit_distance: 1.0,
            median_income: 1.0,
        }
    }
}

impl WeightVector {
    pub fn zeroed() -> Self {
        Self {
            rent: 0.0,
            crime_rate: 0.0,
            crime_trend: 0.0,
            transit_distance: 0.0,
            median_income: 0.0,
        }
    }

    /// Builds a vector from `(metric name, weight)` pairs. Unlisted metrics get zero.
    pub fn from_pairs<'a, I>(pairs: I) -> MapperResult<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut weights = Self::zeroed();
        for (name, value) in pairs {
            let metric = Metric::from_str(name.trim()).map_err(|_| {
                MapperError::InvalidWeights(format!("unknown metric '{}'", name))
            })?;
            weights.set(metric, value);
        }
        Ok(weights)
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Rent => self.rent,
            Metric::CrimeRate => self.crime_rate,
            Metric::CrimeTrend => self.crime_trend,
            Metric::TransitDistance => self.transit_distance,
            Metric::MedianIncome => self.median_income,
        }
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        let slot = match metric {
            Metric::Rent => &mut self.rent,
            Metric::CrimeRate => &mut self.crime_rate,
            Metric::CrimeTrend => &mut self.crime_trend,
            Metric::TransitDistance => &mut self.transit_distance,
            Metric::MedianIncome => &mut self.median_income,
        };
        *slot = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::iter().map(move |m| (m, self.get(m)))
    }

    pub fn total(&self) -> f64 {
        self.iter().map(|(_, w)| w).sum()
    }

    /// Fraction of the total carried by each metric, or zero for an empty vector.
    ///
    /// Computed on weights divided by the largest one, so huge finite weights
    /// do not overflow the sum.
    pub fn shares(&self) -> Vec<(Metric, f64)> {
        let scale = self.iter().map(|(_, w)| w).fold(0.0, f64::max);
        if scale <= 0.0 {
            return self.iter().map(|(m, _)| (m, 0.0)).collect();
        }
        let total: f64 = self.iter().map(|(_, w)| w.max(0.0) / scale).sum();
        self.iter()
            .map(|(m, w)| (m, w.max(0.0) / scale / total))
            .collect()
    }

    /// Rejects negative or non-finite weights and an all-zero vector.
    pub fn validate(&self) -> MapperResult<()> {
        for (metric, w) in self.iter() {
            if !w.is_finite() {
                return Err(MapperError::InvalidWeights(format!(
                    "weight for '{}' is not a finite number",
                    metric
                )));
            }
            if w < 0.0 {
                return Err(MapperError::InvalidWeights(format!(
                    "weight for '{}' is negative ({})",
                    metric, w
                )));
            }
        }
        if !self.iter().any(|(_, w)| w > 0.0) {
            return Err(MapperError::InvalidWeights(
                "all weights are zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads a JSON object of `metric name -> weight`. Unlisted metrics get zero.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> MapperResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            MapperError::Config(format!(
                "failed to read weights file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> MapperResult<Self> {
        let raw: BTreeMap<String, f64> = serde_json::from_str(content)?;
        Self::from_pairs(raw.iter().map(|(k, v)| (k.as_str(), *v)))
    }

    /// Overwrites only the weights the user passed explicitly on the command line.
    pub fn merge_from_cli(&mut self, cli_weights: &WeightVector, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_weights.$field;
                }
            };
        }

        update_if_present!(rent, "rent");
        update_if_present!(crime_rate, "crime_rate");
        update_if_present!(crime_trend, "crime_trend");
        update_if_present!(transit_distance, "transit_distance");
        update_if_present!(median_income, "median_income");
    }
}

impl ScoringConfig {
    pub fn with_weights(weights: WeightVector) -> Self {
        Self {
            weights,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> MapperResult<()> {
        self.weights.validate()?;
        if let Some(budget) = self.max_rent {
            if !budget.is_finite() || budget < 0.0 {
                return Err(MapperError::Config(format!(
                    "max rent must be a non-negative number, got {}",
                    budget
                )));
            }
        }
        Ok(())
    }
}
