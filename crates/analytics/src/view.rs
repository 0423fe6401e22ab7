use crate::report::{CrossTimeframeStockView, SectorStats, StockStats};
use configuration::ViewDefaults;
use core_types::{SectorStatus, SortKey};
use rust_decimal::Decimal;
use serde::Serialize;

/// Row filter shared by the stock, cross-timeframe and sector views.
#[derive(Debug, Clone, PartialEq)]
pub struct StockFilter {
    /// Case-insensitive substring of the stock or sector name. Empty matches all.
    pub search: String,
    pub min_return: Decimal,
    pub min_appearances: usize,
}

impl Default for StockFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            min_return: Decimal::ZERO,
            min_appearances: 1,
        }
    }
}

impl StockFilter {
    pub fn from_defaults(defaults: &ViewDefaults) -> Self {
        Self {
            search: String::new(),
            min_return: defaults.min_return,
            min_appearances: defaults.min_appearances,
        }
    }

    fn matches_name(&self, name: &str) -> bool {
        self.search.is_empty() || name.to_lowercase().contains(&self.search.to_lowercase())
    }
}

/// Filters one timeframe's stock statistics and sorts them descending by `sort_by`.
pub fn filter_stock_stats(stats: &[StockStats], filter: &StockFilter, sort_by: SortKey) -> Vec<StockStats> {
    let mut rows: Vec<StockStats> = stats
        .iter()
        .filter(|s| {
            filter.matches_name(&s.stock)
                && s.appearances >= filter.min_appearances
                && s.avg_return >= filter.min_return
        })
        .cloned()
        .collect();

    match sort_by {
        SortKey::AvgReturn => rows.sort_by(|a, b| b.avg_return.cmp(&a.avg_return)),
        SortKey::MaxReturn => rows.sort_by(|a, b| b.max_return.cmp(&a.max_return)),
        SortKey::Consistency => rows.sort_by(|a, b| b.appearances.cmp(&a.appearances)),
    }
    rows
}

/// Filters the merged view; `min_appearances` applies to the timeframe count.
pub fn filter_cross_timeframe(
    views: &[CrossTimeframeStockView],
    filter: &StockFilter,
) -> Vec<CrossTimeframeStockView> {
    views
        .iter()
        .filter(|v| {
            filter.matches_name(&v.stock)
                && v.total_timeframes >= filter.min_appearances
                && v.avg_return >= filter.min_return
        })
        .cloned()
        .collect()
}

pub fn filter_sectors(stats: &[SectorStats], filter: &StockFilter) -> Vec<SectorStats> {
    stats
        .iter()
        .filter(|s| filter.matches_name(&s.sector) && s.overall_avg_return >= filter.min_return)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub hot: usize,
    pub emerging: usize,
    pub cooling: usize,
    pub stable: usize,
}

pub fn status_counts(stats: &[SectorStats]) -> StatusCounts {
    stats.iter().fold(StatusCounts::default(), |mut counts, s| {
        match s.status {
            SectorStatus::Hot => counts.hot += 1,
            SectorStatus::Emerging => counts.emerging += 1,
            SectorStatus::Cooling => counts.cooling += 1,
            SectorStatus::Stable => counts.stable += 1,
        }
        counts
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::aggregate;
    use crate::cross_timeframe::merge_cross_timeframe;
    use crate::sector::analyze_sectors;
    use core_types::ReturnRecord;
    use rust_decimal_macros::dec;

    fn rec(period: &str, stock: &str, sector: &str, value: Decimal) -> ReturnRecord {
        ReturnRecord::new(period, stock, sector, "NIFTY", Some(value))
    }

    fn monthly() -> Vec<ReturnRecord> {
        vec![
            rec("Jan-24", "Alpha", "Tech", dec!(10)),
            rec("Feb-24", "Alpha", "Tech", dec!(12)),
            rec("Jan-24", "Beta", "Tech", dec!(80)),
            rec("Jan-24", "Gamma", "Energy", dec!(-5)),
        ]
    }

    fn names<T>(rows: &[T], name: impl Fn(&T) -> &str) -> Vec<&str> {
        rows.iter().map(name).collect()
    }

    #[test]
    fn default_filter_drops_negative_averages() {
        let agg = aggregate(&monthly());
        let rows = filter_stock_stats(&agg.stock_stats, &StockFilter::default(), SortKey::AvgReturn);
        assert_eq!(names(&rows, |s| &s.stock), vec!["Beta", "Alpha"]);
    }

    #[test]
    fn sort_keys_and_thresholds() {
        let agg = aggregate(&monthly());
        let filter = StockFilter {
            min_return: dec!(-100),
            ..StockFilter::default()
        };
        let by_count = filter_stock_stats(&agg.stock_stats, &filter, SortKey::Consistency);
        assert_eq!(by_count[0].stock, "Alpha");

        let at_least_two = StockFilter {
            min_appearances: 2,
            ..filter.clone()
        };
        let rows = filter_stock_stats(&agg.stock_stats, &at_least_two, SortKey::MaxReturn);
        assert_eq!(names(&rows, |s| &s.stock), vec!["Alpha"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let agg = aggregate(&monthly());
        let filter = StockFilter {
            search: "ALP".to_string(),
            ..StockFilter::default()
        };
        let rows = filter_stock_stats(&agg.stock_stats, &filter, SortKey::AvgReturn);
        assert_eq!(names(&rows, |s| &s.stock), vec!["Alpha"]);
    }

    #[test]
    fn cross_timeframe_filter_uses_timeframe_count() {
        let m = aggregate(&monthly());
        let q = aggregate(&[rec("Q1 2024", "Alpha", "Tech", dec!(20))]);
        let y = aggregate(&[]);
        let views = merge_cross_timeframe(&m, &q, &y);

        let filter = StockFilter {
            min_appearances: 2,
            ..StockFilter::default()
        };
        let rows = filter_cross_timeframe(&views, &filter);
        assert_eq!(names(&rows, |v| &v.stock), vec!["Alpha"]);
    }

    #[test]
    fn sector_filter_and_status_counts() {
        let m = aggregate(&monthly());
        let empty = aggregate(&[]);
        let analysis = analyze_sectors(&m, &empty, &empty);

        let rows = filter_sectors(&analysis.cross_timeframe, &StockFilter::default());
        assert_eq!(names(&rows, |s| &s.sector), vec!["Tech"]);

        let counts = status_counts(&analysis.cross_timeframe);
        assert_eq!(counts, StatusCounts { hot: 0, emerging: 0, cooling: 1, stable: 1 });
    }
}
