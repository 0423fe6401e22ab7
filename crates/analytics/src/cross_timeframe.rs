use crate::report::{CrossTimeframeStockView, StockStats, TimeframeAggregate};
use crate::util::{maximum, mean};
use core_types::{MergePolicy, Timeframe, UNKNOWN};
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Merges the three timeframe aggregates into one view per stock, using [`MergePolicy::Strict`].
pub fn merge_cross_timeframe(
    monthly: &TimeframeAggregate,
    quarterly: &TimeframeAggregate,
    yearly: &TimeframeAggregate,
) -> Vec<CrossTimeframeStockView> {
    merge_cross_timeframe_with(monthly, quarterly, yearly, MergePolicy::Strict)
}

/// Merges the three timeframe aggregates into one view per stock.
///
/// Every stock found in at least one timeframe gets exactly one view. The
/// result is sorted by number of timeframes, then average return, both
/// descending, then by stock name.
pub fn merge_cross_timeframe_with(
    monthly: &TimeframeAggregate,
    quarterly: &TimeframeAggregate,
    yearly: &TimeframeAggregate,
    policy: MergePolicy,
) -> Vec<CrossTimeframeStockView> {
    let aggregates = [
        (Timeframe::Monthly, monthly),
        (Timeframe::Quarterly, quarterly),
        (Timeframe::Yearly, yearly),
    ];

    let stocks: BTreeSet<&str> = aggregates
        .iter()
        .flat_map(|(_, agg)| agg.stock_stats.iter().map(|s| s.stock.as_str()))
        .collect();

    let mut views: Vec<CrossTimeframeStockView> = stocks
        .into_iter()
        .map(|stock| {
            let present: Vec<(Timeframe, &StockStats)> = aggregates
                .iter()
                .filter_map(|(tf, agg)| agg.stock(stock).map(|stats| (*tf, stats)))
                .collect();
            merge_stock(stock, &present, policy)
        })
        .collect();

    views.sort_by(|a, b| {
        b.total_timeframes
            .cmp(&a.total_timeframes)
            .then_with(|| b.avg_return.cmp(&a.avg_return))
            .then_with(|| a.stock.cmp(&b.stock))
    });

    tracing::debug!(stocks = views.len(), ?policy, "Merged cross-timeframe view.");
    views
}

fn merge_stock(
    stock: &str,
    present: &[(Timeframe, &StockStats)],
    policy: MergePolicy,
) -> CrossTimeframeStockView {
    let (avg_return, max_return) = match policy {
        MergePolicy::Strict => {
            let contributing: Vec<&StockStats> = present
                .iter()
                .map(|(_, stats)| *stats)
                .filter(|stats| stats.appearances > 0)
                .collect();
            let avgs: Vec<Decimal> = contributing.iter().map(|s| s.avg_return).collect();
            let maxes: Vec<Decimal> = contributing.iter().map(|s| s.max_return).collect();
            (
                mean(&avgs).unwrap_or(Decimal::ZERO),
                maximum(&maxes).unwrap_or(Decimal::ZERO),
            )
        }
        MergePolicy::Legacy => {
            let avgs: Vec<Decimal> = present
                .iter()
                .map(|(_, stats)| stats.avg_return)
                .filter(|avg| !avg.is_zero())
                .collect();
            // An absent timeframe counts as a maximum of 0.
            let max = Timeframe::ALL
                .iter()
                .map(|tf| {
                    present
                        .iter()
                        .find(|(p, _)| p == tf)
                        .map_or(Decimal::ZERO, |(_, stats)| stats.max_return)
                })
                .max()
                .unwrap_or(Decimal::ZERO);
            (mean(&avgs).unwrap_or(Decimal::ZERO), max)
        }
    };

    let sector = present
        .iter()
        .map(|(_, stats)| stats.sector.as_str())
        .find(|sector| *sector != UNKNOWN)
        .unwrap_or(UNKNOWN);

    CrossTimeframeStockView {
        stock: stock.to_string(),
        timeframes: present.iter().map(|(tf, _)| *tf).collect(),
        total_timeframes: present.len(),
        sector: sector.to_string(),
        avg_return,
        max_return,
    }
}
