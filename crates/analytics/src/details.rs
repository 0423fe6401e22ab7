use crate::entity::resolve_entity_kind;
use crate::report::{Appearance, EntityDetails, SectorDetails, StockDetails, TimeframeAggregate};
use crate::util::{maximum, mean};
use core_types::{EntityKind, Timeframe, UNKNOWN};
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Drill-down for one stock across every timeframe.
///
/// Overall figures pool every valid return; a timeframe's average is `None`
/// when the stock has no valid return there.
pub fn stock_details(
    stock: &str,
    monthly: &TimeframeAggregate,
    quarterly: &TimeframeAggregate,
    yearly: &TimeframeAggregate,
) -> StockDetails {
    let aggregates = [
        (Timeframe::Monthly, monthly),
        (Timeframe::Quarterly, quarterly),
        (Timeframe::Yearly, yearly),
    ];

    let mut all_appearances = Vec::new();
    let mut per_timeframe: [(Option<Decimal>, usize); 3] = [(None, 0); 3];
    let mut sector = None;

    for (slot, (timeframe, aggregate)) in aggregates.iter().enumerate() {
        let Some(stats) = aggregate.stock(stock) else {
            continue;
        };
        if sector.is_none() || sector == Some(UNKNOWN) {
            sector = Some(stats.sector.as_str());
        }
        let values: Vec<Decimal> = stats.returns.iter().map(|r| r.value).collect();
        per_timeframe[slot] = (mean(&values), values.len());
        // `returns` already follows the chronological period axis.
        all_appearances.extend(stats.returns.iter().map(|r| Appearance {
            timeframe: *timeframe,
            period: r.period.clone(),
            stock: stock.to_string(),
            value: r.value,
        }));
    }

    let values: Vec<Decimal> = all_appearances.iter().map(|a| a.value).collect();
    let [(monthly_avg, monthly_n), (quarterly_avg, quarterly_n), (yearly_avg, yearly_n)] =
        per_timeframe;

    StockDetails {
        stock: stock.to_string(),
        sector: sector.unwrap_or(UNKNOWN).to_string(),
        total_appearances: values.len(),
        overall_avg_return: mean(&values).unwrap_or(Decimal::ZERO),
        overall_max_return: maximum(&values).unwrap_or(Decimal::ZERO),
        monthly_avg_return: monthly_avg,
        quarterly_avg_return: quarterly_avg,
        yearly_avg_return: yearly_avg,
        monthly_appearances: monthly_n,
        quarterly_appearances: quarterly_n,
        yearly_appearances: yearly_n,
        all_appearances,
    }
}

/// Drill-down for one sector: every valid return of every stock in it.
pub fn sector_details(
    sector: &str,
    monthly: &TimeframeAggregate,
    quarterly: &TimeframeAggregate,
    yearly: &TimeframeAggregate,
) -> SectorDetails {
    let aggregates = [
        (Timeframe::Monthly, monthly),
        (Timeframe::Quarterly, quarterly),
        (Timeframe::Yearly, yearly),
    ];

    let mut all_appearances = Vec::new();
    let mut per_timeframe: [(Option<Decimal>, usize); 3] = [(None, 0); 3];
    let mut stocks = BTreeSet::new();

    for (slot, (timeframe, aggregate)) in aggregates.iter().enumerate() {
        let mut appearances: Vec<(usize, Appearance)> = Vec::new();
        for stats in aggregate.stock_stats.iter().filter(|s| s.sector == sector) {
            stocks.insert(stats.stock.clone());
            for r in &stats.returns {
                let position = aggregate.period_position(&r.period).unwrap_or(usize::MAX);
                appearances.push((
                    position,
                    Appearance {
                        timeframe: *timeframe,
                        period: r.period.clone(),
                        stock: stats.stock.clone(),
                        value: r.value,
                    },
                ));
            }
        }
        // Chronological within the timeframe; stock order breaks ties.
        appearances.sort_by_key(|(position, _)| *position);

        let values: Vec<Decimal> = appearances.iter().map(|(_, a)| a.value).collect();
        per_timeframe[slot] = (mean(&values), values.len());
        all_appearances.extend(appearances.into_iter().map(|(_, a)| a));
    }

    let values: Vec<Decimal> = all_appearances.iter().map(|a| a.value).collect();
    let [(monthly_avg, monthly_n), (quarterly_avg, quarterly_n), (yearly_avg, yearly_n)] =
        per_timeframe;

    SectorDetails {
        sector: sector.to_string(),
        total_appearances: values.len(),
        overall_avg_return: mean(&values).unwrap_or(Decimal::ZERO),
        overall_max_return: maximum(&values).unwrap_or(Decimal::ZERO),
        monthly_avg_return: monthly_avg,
        quarterly_avg_return: quarterly_avg,
        yearly_avg_return: yearly_avg,
        monthly_appearances: monthly_n,
        quarterly_appearances: quarterly_n,
        yearly_appearances: yearly_n,
        stock_count: stocks.len(),
        stocks: stocks.into_iter().collect(),
        all_appearances,
    }
}

/// Resolves `label` and builds the matching drill-down.
pub fn entity_details(
    label: &str,
    monthly: &TimeframeAggregate,
    quarterly: &TimeframeAggregate,
    yearly: &TimeframeAggregate,
) -> EntityDetails {
    match resolve_entity_kind(label, monthly, quarterly, yearly) {
        EntityKind::Stock => EntityDetails::Stock(stock_details(label, monthly, quarterly, yearly)),
        EntityKind::Sector => {
            EntityDetails::Sector(sector_details(label, monthly, quarterly, yearly))
        }
    }
}
