use crate::period::sort_periods;
use crate::report::{MatrixRow, PeriodReturn, StockStats, TimeframeAggregate};
use crate::util::{maximum, mean};
use core_types::{Dataset, ReturnRecord, Timeframe};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Aggregates one timeframe's records into a matrix, a period axis and per-stock statistics.
///
/// A later record for the same `(period, stock)` replaces an earlier one, and
/// the replaced value is not counted anywhere. Sector and index come from the
/// last record seen for each stock, regardless of its return. The `sectors`
/// and `indices` lists hold only values the records actually carry, so a
/// literal `Unknown` sector is listed but the placeholder is not.
pub fn aggregate(records: &[ReturnRecord]) -> TimeframeAggregate {
    let mut cells = PeriodCells::default();
    let mut stock_info: HashMap<&str, (&str, &str)> = HashMap::new();
    let mut stocks: BTreeSet<&str> = BTreeSet::new();
    let mut sectors = FirstSeen::default();
    let mut indices = FirstSeen::default();
    let mut overwritten = 0usize;

    for record in records {
        if cells.upsert(&record.period, &record.stock, record.returns) {
            overwritten += 1;
        }
        stocks.insert(record.stock.as_str());
        let (sector, index) = (record.sector_or_unknown(), record.index_or_unknown());
        stock_info.insert(record.stock.as_str(), (sector, index));
        if let Some(sector) = present(record.sector.as_deref()) {
            sectors.push(sector);
        }
        if let Some(index) = present(record.index.as_deref()) {
            indices.push(index);
        }
    }

    let periods = sort_periods(cells.periods.iter().map(|p| p.to_string()).collect());

    let mut matrix = Vec::with_capacity(stocks.len());
    let mut stock_stats = Vec::with_capacity(stocks.len());
    for stock in stocks {
        let row: Vec<Option<Decimal>> = periods.iter().map(|p| cells.get(p, stock)).collect();

        let returns: Vec<PeriodReturn> = periods
            .iter()
            .zip(&row)
            .filter_map(|(period, cell)| {
                cell.map(|value| PeriodReturn {
                    period: period.clone(),
                    value,
                })
            })
            .collect();
        let values: Vec<Decimal> = returns.iter().map(|r| r.value).collect();
        let (sector, index) = stock_info.get(stock).copied().unwrap_or_default();

        stock_stats.push(StockStats {
            stock: stock.to_string(),
            appearances: returns.len(),
            avg_return: mean(&values).unwrap_or(Decimal::ZERO),
            max_return: maximum(&values).unwrap_or(Decimal::ZERO),
            periods_appeared: returns.iter().map(|r| r.period.clone()).collect(),
            sector: sector.to_string(),
            index: index.to_string(),
            returns,
        });
        matrix.push(MatrixRow {
            stock: stock.to_string(),
            cells: row,
        });
    }

    tracing::debug!(
        records = records.len(),
        stocks = stock_stats.len(),
        periods = periods.len(),
        overwritten,
        "Aggregated timeframe records."
    );

    TimeframeAggregate {
        matrix,
        periods,
        stock_stats,
        sectors: sectors.into_vec(),
        indices: indices.into_vec(),
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// The `period -> (stock -> return)` mapping, with periods kept in first-seen order.
#[derive(Default)]
struct PeriodCells<'a> {
    periods: Vec<&'a str>,
    by_period: HashMap<&'a str, HashMap<&'a str, Option<Decimal>>>,
}

impl<'a> PeriodCells<'a> {
    /// Inserts or replaces a cell. Returns true when a value was replaced.
    fn upsert(&mut self, period: &'a str, stock: &'a str, value: Option<Decimal>) -> bool {
        let row = match self.by_period.entry(period) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.periods.push(period);
                entry.insert(HashMap::new())
            }
        };
        row.insert(stock, value).is_some()
    }

    fn get(&self, period: &str, stock: &str) -> Option<Decimal> {
        self.by_period.get(period)?.get(stock).copied().flatten()
    }
}

#[derive(Default)]
struct FirstSeen<'a> {
    seen: HashSet<&'a str>,
    order: Vec<&'a str>,
}

impl<'a> FirstSeen<'a> {
    fn push(&mut self, value: &'a str) {
        if self.seen.insert(value) {
            self.order.push(value);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.order.into_iter().map(str::to_string).collect()
    }
}

/// The three timeframe aggregates of one dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetAggregates {
    pub monthly: TimeframeAggregate,
    pub quarterly: TimeframeAggregate,
    pub yearly: TimeframeAggregate,
}

impl DatasetAggregates {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            monthly: aggregate(&dataset.monthly),
            quarterly: aggregate(&dataset.quarterly),
            yearly: aggregate(&dataset.yearly),
        }
    }

    pub fn get(&self, timeframe: Timeframe) -> &TimeframeAggregate {
        match timeframe {
            Timeframe::Monthly => &self.monthly,
            Timeframe::Quarterly => &self.quarterly,
            Timeframe::Yearly => &self.yearly,
        }
    }

    /// The aggregates paired with their timeframe, Monthly first.
    pub fn iter(&self) -> impl Iterator<Item = (Timeframe, &TimeframeAggregate)> {
        Timeframe::ALL.into_iter().map(move |tf| (tf, self.get(tf)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::UNKNOWN;
    use rust_decimal_macros::dec;

    fn record(period: &str, stock: &str, returns: Option<Decimal>) -> ReturnRecord {
        ReturnRecord::new(period, stock, "Tech", "NIFTY", returns)
    }

    #[test]
    fn empty_input_yields_empty_aggregate() {
        let agg = aggregate(&[]);
        assert!(agg.periods.is_empty());
        assert!(agg.stock_stats.is_empty());
        assert!(agg.sectors.is_empty());
        assert!(agg.matrix.is_empty());
    }

    #[test]
    fn averages_and_maxima() {
        let agg = aggregate(&[
            record("Jan-24", "ACME", Some(dec!(10))),
            record("Feb-24", "ACME", Some(dec!(20))),
            record("Mar-24", "ACME", Some(dec!(30))),
        ]);
        let stats = agg.stock("ACME").unwrap();
        assert_eq!(stats.appearances, 3);
        assert_eq!(stats.avg_return, dec!(20));
        assert_eq!(stats.max_return, dec!(30));
        assert_eq!(stats.periods_appeared, vec!["Jan-24", "Feb-24", "Mar-24"]);
    }

    #[test]
    fn null_returns_are_excluded_but_keep_the_stock() {
        let agg = aggregate(&[
            record("Jan-24", "ACME", Some(dec!(10))),
            record("Feb-24", "ACME", None),
            record("Jan-24", "GHOST", None),
        ]);

        let acme = agg.stock("ACME").unwrap();
        assert_eq!(acme.appearances, 1);
        assert_eq!(acme.avg_return, dec!(10));
        assert_eq!(agg.row("ACME").unwrap().cells, vec![Some(dec!(10)), None]);

        let ghost = agg.stock("GHOST").unwrap();
        assert_eq!(ghost.appearances, 0);
        assert_eq!(ghost.avg_return, Decimal::ZERO);
        assert!(ghost.returns.is_empty());
    }

    #[test]
    fn zero_return_is_data_not_absence() {
        let agg = aggregate(&[record("Jan-24", "ACME", Some(Decimal::ZERO))]);
        assert_eq!(agg.row("ACME").unwrap().cells, vec![Some(Decimal::ZERO)]);
        assert_eq!(agg.stock("ACME").unwrap().appearances, 1);
    }

    #[test]
    fn returns_near_the_decimal_limit_aggregate() {
        let huge = Decimal::from_i128_with_scale(50_000_000_000_000_000_000_000_000_000, 0);
        let agg = aggregate(&[
            record("Jan-24", "ACME", Some(huge)),
            record("Feb-24", "ACME", Some(huge)),
        ]);
        let stats = agg.stock("ACME").unwrap();
        assert_eq!(stats.appearances, 2);
        assert_eq!(stats.avg_return, huge);
        assert_eq!(stats.max_return, huge);
    }

    #[test]
    fn last_write_wins_for_duplicate_cells() {
        let agg = aggregate(&[
            record("Jan-24", "X", Some(dec!(10))),
            record("Jan-24", "X", Some(dec!(20))),
        ]);
        assert_eq!(agg.row("X").unwrap().cells, vec![Some(dec!(20))]);
        let stats = agg.stock("X").unwrap();
        assert_eq!(stats.appearances, 1);
        assert_eq!(stats.avg_return, dec!(20));
    }

    #[test]
    fn stocks_sorted_case_sensitively_and_periods_chronologically() {
        let agg = aggregate(&[
            record("Aug-24", "beta", Some(dec!(1))),
            record("Jul-24", "Alpha", Some(dec!(2))),
            record("Q1 2025", "Zeta", Some(dec!(3))),
        ]);
        let names: Vec<&str> = agg.stock_stats.iter().map(|s| s.stock.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zeta", "beta"]);
        assert_eq!(agg.periods, vec!["Jul-24", "Aug-24", "Q1 2025"]);
    }

    #[test]
    fn last_seen_sector_wins_and_missing_sector_is_unknown() {
        let mut first = ReturnRecord::new("Jan-24", "ACME", "Tech", "NIFTY", Some(dec!(1)));
        let mut second = first.clone();
        second.period = "Feb-24".to_string();
        second.sector = Some("Energy".to_string());
        second.returns = None;
        first.index = None;

        let agg = aggregate(&[first, second]);
        let stats = agg.stock("ACME").unwrap();
        assert_eq!(stats.sector, "Energy");
        assert_eq!(stats.index, "NIFTY");
        assert_eq!(agg.sectors, vec!["Tech", "Energy"]);
        assert_eq!(agg.indices, vec!["NIFTY"]);
        assert_eq!(stats.index, "NIFTY");
    }

    #[test]
    fn missing_sector_is_unknown_in_stats_but_not_listed() {
        let mut record = record("Jan-24", "ACME", Some(dec!(1)));
        record.sector = None;
        let agg = aggregate(&[record]);
        assert_eq!(agg.stock("ACME").unwrap().sector, UNKNOWN);
        assert!(agg.sectors.is_empty());
        assert!(!agg.has_sector(UNKNOWN));
    }

    #[test]
    fn dataset_aggregates_by_timeframe() {
        let dataset = Dataset {
            monthly: vec![record("Jan-24", "ACME", Some(dec!(5)))],
            quarterly: vec![],
            yearly: vec![record("2024", "BOLT", Some(dec!(50)))],
        };
        let aggs = DatasetAggregates::from_dataset(&dataset);
        assert!(aggs.get(Timeframe::Monthly).has_stock("ACME"));
        assert!(aggs.get(Timeframe::Quarterly).is_empty());
        let order: Vec<Timeframe> = aggs.iter().map(|(tf, _)| tf).collect();
        assert_eq!(order, Timeframe::ALL.to_vec());
    }
}
