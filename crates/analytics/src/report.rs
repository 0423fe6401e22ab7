use core_types::{EntityKind, SectorStatus, Timeframe};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The aggregated view of one timeframe's records.
///
/// This struct is the output of the aggregator and the input of every
/// cross-timeframe and sector calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeframeAggregate {
    /// One row per stock, sorted by stock name; cells follow `periods`.
    pub matrix: Vec<MatrixRow>,
    /// Distinct period labels in chronological order.
    pub periods: Vec<String>,
    /// One entry per stock, in the same order as `matrix`.
    pub stock_stats: Vec<StockStats>,
    /// Distinct sectors carried by the records, in first-seen order. Missing
    /// sectors are not listed as `Unknown`.
    pub sectors: Vec<String>,
    /// Distinct indices carried by the records, in first-seen order.
    pub indices: Vec<String>,
}

impl TimeframeAggregate {
    pub fn stock(&self, name: &str) -> Option<&StockStats> {
        self.stock_stats
            .binary_search_by(|s| s.stock.as_str().cmp(name))
            .ok()
            .map(|i| &self.stock_stats[i])
    }

    pub fn row(&self, name: &str) -> Option<&MatrixRow> {
        self.matrix
            .binary_search_by(|r| r.stock.as_str().cmp(name))
            .ok()
            .map(|i| &self.matrix[i])
    }

    pub fn has_stock(&self, name: &str) -> bool {
        self.stock(name).is_some()
    }

    pub fn has_sector(&self, name: &str) -> bool {
        self.sectors.iter().any(|s| s == name)
    }

    /// Position of a period on the chronological axis.
    pub fn period_position(&self, period: &str) -> Option<usize> {
        self.periods.iter().position(|p| p == period)
    }

    pub fn is_empty(&self) -> bool {
        self.stock_stats.is_empty()
    }
}

/// A stock's row of the stock×period matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub stock: String,
    /// `None` where the stock has no return for that period.
    pub cells: Vec<Option<Decimal>>,
}

/// One valid return of a stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodReturn {
    pub period: String,
    #[serde(rename = "return")]
    pub value: Decimal,
}

/// Per-stock statistics for a single timeframe.
///
/// `appearances == returns.len()` always holds. A stock with no valid return
/// still has an entry, with `avg_return` and `max_return` of 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockStats {
    pub stock: String,
    pub appearances: usize,
    pub avg_return: Decimal,
    pub max_return: Decimal,
    pub periods_appeared: Vec<String>,
    pub sector: String,
    pub index: String,
    pub returns: Vec<PeriodReturn>,
}

/// A stock's statistics merged across the three timeframes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossTimeframeStockView {
    pub stock: String,
    pub timeframes: Vec<Timeframe>,
    pub total_timeframes: usize,
    pub sector: String,
    pub avg_return: Decimal,
    pub max_return: Decimal,
}

/// Pooled statistics of one sector, for one timeframe or for all of them.
///
/// For a single-timeframe scope `timeframes` holds that timeframe only and
/// only its own average field is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorStats {
    pub sector: String,
    pub overall_avg_return: Decimal,
    pub max_return: Decimal,
    pub status: SectorStatus,
    pub timeframes: Vec<Timeframe>,
    pub monthly_avg: Option<Decimal>,
    pub quarterly_avg: Option<Decimal>,
    pub yearly_avg: Option<Decimal>,
    pub total_timeframes: usize,
    /// Number of individual returns pooled into the averages.
    pub return_count: usize,
    pub stock_count: usize,
}

impl SectorStats {
    pub fn timeframe_avg(&self, timeframe: Timeframe) -> Option<Decimal> {
        match timeframe {
            Timeframe::Monthly => self.monthly_avg,
            Timeframe::Quarterly => self.quarterly_avg,
            Timeframe::Yearly => self.yearly_avg,
        }
    }
}

/// Every sector view, each sorted by `overall_avg_return` descending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorAnalysis {
    pub cross_timeframe: Vec<SectorStats>,
    pub monthly: Vec<SectorStats>,
    pub quarterly: Vec<SectorStats>,
    pub yearly: Vec<SectorStats>,
    pub hot_sectors: Vec<SectorStats>,
    pub emerging_sectors: Vec<SectorStats>,
    pub cooling_sectors: Vec<SectorStats>,
}

impl SectorAnalysis {
    /// The per-timeframe view, or the combined one for `None`.
    pub fn scope(&self, timeframe: Option<Timeframe>) -> &[SectorStats] {
        match timeframe {
            None => &self.cross_timeframe,
            Some(Timeframe::Monthly) => &self.monthly,
            Some(Timeframe::Quarterly) => &self.quarterly,
            Some(Timeframe::Yearly) => &self.yearly,
        }
    }
}

/// A single valid return, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub timeframe: Timeframe,
    pub period: String,
    pub stock: String,
    #[serde(rename = "return")]
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDetails {
    pub stock: String,
    pub sector: String,
    pub total_appearances: usize,
    pub overall_avg_return: Decimal,
    pub overall_max_return: Decimal,
    pub monthly_avg_return: Option<Decimal>,
    pub quarterly_avg_return: Option<Decimal>,
    pub yearly_avg_return: Option<Decimal>,
    pub monthly_appearances: usize,
    pub quarterly_appearances: usize,
    pub yearly_appearances: usize,
    pub all_appearances: Vec<Appearance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorDetails {
    pub sector: String,
    pub total_appearances: usize,
    pub overall_avg_return: Decimal,
    pub overall_max_return: Decimal,
    pub monthly_avg_return: Option<Decimal>,
    pub quarterly_avg_return: Option<Decimal>,
    pub yearly_avg_return: Option<Decimal>,
    pub monthly_appearances: usize,
    pub quarterly_appearances: usize,
    pub yearly_appearances: usize,
    pub stock_count: usize,
    pub stocks: Vec<String>,
    pub all_appearances: Vec<Appearance>,
}

/// The drill-down for a selected label, tagged by what the label resolved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntityDetails {
    Stock(StockDetails),
    Sector(SectorDetails),
}

impl EntityDetails {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityDetails::Stock(_) => EntityKind::Stock,
            EntityDetails::Sector(_) => EntityKind::Sector,
        }
    }
}
