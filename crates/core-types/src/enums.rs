use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The granularity at which return records are grouped.
///
/// The derived `Ord` follows declaration order, which is also the display
/// priority used for drill-down views (Monthly before Quarterly before Yearly).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    Monthly,
    Quarterly,
    Yearly,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Monthly, Timeframe::Quarterly, Timeframe::Yearly];

    /// The lowercase key used in data files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Timeframe::Monthly => "monthly",
            Timeframe::Quarterly => "quarterly",
            Timeframe::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::Monthly => write!(f, "Monthly"),
            Timeframe::Quarterly => write!(f, "Quarterly"),
            Timeframe::Yearly => write!(f, "Yearly"),
        }
    }
}

impl FromStr for Timeframe {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" | "m" => Ok(Timeframe::Monthly),
            "quarterly" | "quarter" | "q" => Ok(Timeframe::Quarterly),
            "yearly" | "year" | "y" => Ok(Timeframe::Yearly),
            _ => Err(CoreError::InvalidInput("timeframe".to_string(), s.to_string())),
        }
    }
}

/// Classification of a sector by its pooled average return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectorStatus {
    Stable,
    Cooling,
    Emerging,
    Hot,
}

impl fmt::Display for SectorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectorStatus::Stable => write!(f, "Stable"),
            SectorStatus::Cooling => write!(f, "Cooling"),
            SectorStatus::Emerging => write!(f, "Emerging"),
            SectorStatus::Hot => write!(f, "Hot"),
        }
    }
}

/// What a free-form label refers to. Stocks and sectors share one namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Stock,
    Sector,
}

/// How per-timeframe figures are combined into a cross-timeframe view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    /// Only timeframes with at least one valid return contribute. Zero averages count.
    #[default]
    Strict,
    /// Drops zero averages from the mean and substitutes 0 for absent maxima.
    Legacy,
}

impl FromStr for MergePolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(MergePolicy::Strict),
            "legacy" => Ok(MergePolicy::Legacy),
            _ => Err(CoreError::InvalidInput("merge policy".to_string(), s.to_string())),
        }
    }
}

/// Sort key for per-timeframe stock listings. Every key sorts descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    AvgReturn,
    MaxReturn,
    /// Number of appearances.
    Consistency,
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "avg_return" | "avg" => Ok(SortKey::AvgReturn),
            "max_return" | "max" => Ok(SortKey::MaxReturn),
            "consistency" | "appearances" => Ok(SortKey::Consistency),
            _ => Err(CoreError::InvalidInput("sort key".to_string(), s.to_string())),
        }
    }
}
