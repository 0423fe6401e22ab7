use crate::enums::Timeframe;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Placeholder used wherever a record carries no sector or index.
pub const UNKNOWN: &str = "Unknown";

/// A single stock's return for one period of one timeframe.
///
/// Records are taken as-is: nothing enforces uniqueness of `(period, stock)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnRecord {
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub stock: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub index: Option<String>,
    /// Percentage return. `None` means "no data", which is not the same as 0.
    #[serde(default)]
    pub returns: Option<Decimal>,
}

impl ReturnRecord {
    pub fn new(
        period: impl Into<String>,
        stock: impl Into<String>,
        sector: impl Into<String>,
        index: impl Into<String>,
        returns: Option<Decimal>,
    ) -> Self {
        Self {
            period: period.into(),
            stock: stock.into(),
            sector: Some(sector.into()),
            index: Some(index.into()),
            returns,
        }
    }

    /// The sector, or [`UNKNOWN`] when missing or empty.
    pub fn sector_or_unknown(&self) -> &str {
        non_empty_or_unknown(self.sector.as_deref())
    }

    /// The index membership, or [`UNKNOWN`] when missing or empty.
    pub fn index_or_unknown(&self) -> &str {
        non_empty_or_unknown(self.index.as_deref())
    }
}

fn non_empty_or_unknown(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => UNKNOWN,
    }
}

/// The three raw record lists, one per timeframe, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub monthly: Vec<ReturnRecord>,
    #[serde(default)]
    pub quarterly: Vec<ReturnRecord>,
    #[serde(default)]
    pub yearly: Vec<ReturnRecord>,
}

impl Dataset {
    pub fn records(&self, timeframe: Timeframe) -> &[ReturnRecord] {
        match timeframe {
            Timeframe::Monthly => &self.monthly,
            Timeframe::Quarterly => &self.quarterly,
            Timeframe::Yearly => &self.yearly,
        }
    }

    pub fn records_mut(&mut self, timeframe: Timeframe) -> &mut Vec<ReturnRecord> {
        match timeframe {
            Timeframe::Monthly => &mut self.monthly,
            Timeframe::Quarterly => &mut self.quarterly,
            Timeframe::Yearly => &mut self.yearly,
        }
    }

    pub fn total_records(&self) -> usize {
        self.monthly.len() + self.quarterly.len() + self.yearly.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_records() == 0
    }
}
