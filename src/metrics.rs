use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Direction of a raw metric. Normalized values are always "higher is better".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    LowerIsBetter,
    HigherIsBetter,
}

/// A weighted scoring dimension.
#[derive(
    Debug,
    Clone,
    Copy,
    EnumIter,
    EnumString,
    Display,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[strum(to_string = "rent", serialize = "cost")]
    Rent,
    #[strum(to_string = "crime_rate", serialize = "crime", serialize = "safety")]
    CrimeRate,
    #[strum(to_string = "crime_trend", serialize = "trend")]
    CrimeTrend,
    #[strum(to_string = "transit_distance", serialize = "transit")]
    TransitDistance,
    #[strum(to_string = "median_income", serialize = "income")]
    MedianIncome,
}

impl Metric {
    pub fn polarity(&self) -> Polarity {
        match self {
            Self::MedianIncome => Polarity::HigherIsBetter,
            Self::Rent | Self::CrimeRate | Self::CrimeTrend | Self::TransitDistance => {
                Polarity::LowerIsBetter
            }
        }
    }

    /// Human label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rent => "Low Cost",
            Self::CrimeRate => "Safety (Current Rate)",
            Self::CrimeTrend => "Safety (Improving Trend)",
            Self::TransitDistance => "Transit Access",
            Self::MedianIncome => "Career / Human Capital",
        }
    }

    /// Column feeding this metric. Only rent depends on the unit size.
    pub fn column(&self, unit: UnitSize) -> Column {
        match self {
            Self::Rent => Column::Rent(unit),
            Self::CrimeRate => Column::CrimeRate,
            Self::CrimeTrend => Column::CrimeTrend,
            Self::TransitDistance => Column::TransitDistance,
            Self::MedianIncome => Column::MedianIncome,
        }
    }
}

/// Apartment size whose rent column feeds the rent metric.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    EnumIter,
    EnumString,
    Display,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum UnitSize {
    #[strum(to_string = "studio")]
    #[serde(rename = "studio")]
    Studio,
    #[default]
    #[strum(to_string = "1bd", serialize = "one_bedroom")]
    #[serde(rename = "1bd")]
    OneBedroom,
    #[strum(to_string = "2bd", serialize = "two_bedroom")]
    #[serde(rename = "2bd")]
    TwoBedroom,
    #[strum(to_string = "3bd", serialize = "three_bedroom")]
    #[serde(rename = "3bd")]
    ThreeBedroom,
    #[strum(to_string = "4bd", serialize = "four_bedroom")]
    #[serde(rename = "4bd")]
    FourBedroom,
}

/// One numeric column of the dataset, raw or normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Rent(UnitSize),
    CrimeRate,
    CrimeTrend,
    TransitDistance,
    MedianIncome,
}

impl Column {
    pub fn all() -> Vec<Column> {
        UnitSize::iter()
            .map(Column::Rent)
            .chain([
                Column::CrimeRate,
                Column::CrimeTrend,
                Column::TransitDistance,
                Column::MedianIncome,
            ])
            .collect()
    }

    pub fn metric(&self) -> Metric {
        match self {
            Self::Rent(_) => Metric::Rent,
            Self::CrimeRate => Metric::CrimeRate,
            Self::CrimeTrend => Metric::CrimeTrend,
            Self::TransitDistance => Metric::TransitDistance,
            Self::MedianIncome => Metric::MedianIncome,
        }
    }

    pub fn polarity(&self) -> Polarity {
        self.metric().polarity()
    }

    /// Snake-case key, e.g. `rent_1bd` or `crime_rate`.
    pub fn key(&self) -> String {
        match self {
            Self::Rent(unit) => format!("rent_{}", unit),
            other => other.metric().to_string(),
        }
    }

    /// Header of the raw column in the input file, e.g. `RENT_1BD`.
    pub fn raw_header(&self) -> String {
        self.key().to_ascii_uppercase()
    }

    /// Header of the normalized column, e.g. `norm_rent_1bd`.
    pub fn norm_header(&self) -> String {
        format!("norm_{}", self.key())
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
