//! CSV rendering of raw records and derived structures.
//!
//! Every function produces one header row followed by one row per item.
//! Sequence fields are joined with `;` so that each item stays on one row.

use crate::error::ExportError;
use analytics::{
    CrossTimeframeStockView, SectorStats, StockStats, TimeframeAggregate, sanitize_identifier,
};
use core_types::{Dataset, ReturnRecord, Timeframe};
use rust_decimal::Decimal;

/// Decimal places kept for derived averages.
const DERIVED_DP: u32 = 4;

const RECORD_COLUMNS: [&str; 5] = ["period", "stock", "sector", "index", "returns"];

/// Raw records with sanitized stock identifiers; missing values are empty cells.
pub fn records_csv(records: &[ReturnRecord]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(RECORD_COLUMNS)?;
    for record in records {
        wtr.write_record(record_cells(record))?;
    }
    finish(wtr)
}

/// Every record of the dataset, Monthly then Quarterly then Yearly, with a leading `timeframe` column.
pub fn dataset_csv(dataset: &Dataset) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let mut header = vec!["timeframe"];
    header.extend(RECORD_COLUMNS);
    wtr.write_record(&header)?;

    for timeframe in Timeframe::ALL {
        let label = timeframe.to_string();
        for record in dataset.records(timeframe) {
            let mut row = vec![label.clone()];
            row.extend(record_cells(record));
            wtr.write_record(&row)?;
        }
    }
    finish(wtr)
}

pub fn identifiers_csv(ids: &[String]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["stock"])?;
    for id in ids {
        wtr.write_record([id])?;
    }
    finish(wtr)
}

pub fn stock_stats_csv(stats: &[StockStats]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "stock",
        "sector",
        "index",
        "appearances",
        "avg_return",
        "max_return",
        "periods_appeared",
    ])?;
    for s in stats {
        wtr.write_record([
            &s.stock,
            &s.sector,
            &s.index,
            &s.appearances.to_string(),
            &derived(s.avg_return),
            &derived(s.max_return),
            &s.periods_appeared.join(";"),
        ])?;
    }
    finish(wtr)
}

pub fn cross_timeframe_csv(views: &[CrossTimeframeStockView]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "stock",
        "sector",
        "total_timeframes",
        "timeframes",
        "avg_return",
        "max_return",
    ])?;
    for v in views {
        wtr.write_record([
            &v.stock,
            &v.sector,
            &v.total_timeframes.to_string(),
            &join_timeframes(&v.timeframes),
            &derived(v.avg_return),
            &derived(v.max_return),
        ])?;
    }
    finish(wtr)
}

pub fn sector_stats_csv(stats: &[SectorStats]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "sector",
        "status",
        "overall_avg_return",
        "max_return",
        "monthly_avg",
        "quarterly_avg",
        "yearly_avg",
        "total_timeframes",
        "timeframes",
        "return_count",
        "stock_count",
    ])?;
    for s in stats {
        wtr.write_record([
            &s.sector,
            &s.status.to_string(),
            &derived(s.overall_avg_return),
            &derived(s.max_return),
            &optional(s.monthly_avg),
            &optional(s.quarterly_avg),
            &optional(s.yearly_avg),
            &s.total_timeframes.to_string(),
            &join_timeframes(&s.timeframes),
            &s.return_count.to_string(),
            &s.stock_count.to_string(),
        ])?;
    }
    finish(wtr)
}

/// The stock×period matrix: a `stock` column followed by one column per period.
pub fn matrix_csv(aggregate: &TimeframeAggregate) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let mut header = vec!["stock".to_string()];
    header.extend(aggregate.periods.iter().cloned());
    wtr.write_record(&header)?;

    for row in &aggregate.matrix {
        let mut cells = vec![row.stock.clone()];
        cells.extend(row.cells.iter().map(|cell| cell.map(|v| v.to_string()).unwrap_or_default()));
        wtr.write_record(&cells)?;
    }
    finish(wtr)
}

fn record_cells(record: &ReturnRecord) -> [String; 5] {
    [
        record.period.clone(),
        sanitize_identifier(&record.stock),
        record.sector.clone().unwrap_or_default(),
        record.index.clone().unwrap_or_default(),
        record.returns.map(|r| r.to_string()).unwrap_or_default(),
    ]
}

fn derived(value: Decimal) -> String {
    value.round_dp(DERIVED_DP).normalize().to_string()
}

fn optional(value: Option<Decimal>) -> String {
    value.map(derived).unwrap_or_default()
}

fn join_timeframes(timeframes: &[Timeframe]) -> String {
    timeframes
        .iter()
        .map(Timeframe::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let data = wtr
        .into_inner()
        .map_err(|e| ExportError::Flush(e.into_error()))?;
    Ok(String::from_utf8(data)?)
}
