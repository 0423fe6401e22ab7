//! Property tests for aggregation invariants.
//!
//! Uses proptest to verify:
//! 1. Idempotence: aggregating the same records twice gives the same result
//! 2. Appearance accounting: appearances equal the valid cells of a stock's row
//! 3. Union coverage: every stock gets exactly one cross-timeframe view
//! 4. Classification: a sector's status always matches its pooled average

use analytics::{SectorAnalyzer, aggregate, analyze_sectors, merge_cross_timeframe};
use core_types::{ReturnRecord, SectorStatus};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

// ── Strategies (proptest) ────────────────────────────────────────────

const PERIODS: &[&str] = &["Jan-24", "Feb-24", "24-Mar", "Q2 2024", "2024-07-01", "Bogus"];
const STOCKS: &[&str] = &["ACME", "BOLT", "COAL", "DYNAMO", "ELM"];
const SECTORS: &[&str] = &["Tech", "Energy", "Pharma", ""];

fn arb_return() -> impl Strategy<Value = Option<Decimal>> {
    prop::option::weighted(0.8, (-2000i64..2000).prop_map(|v| Decimal::new(v, 1)))
}

fn arb_record() -> impl Strategy<Value = ReturnRecord> {
    (
        prop::sample::select(PERIODS),
        prop::sample::select(STOCKS),
        prop::sample::select(SECTORS),
        arb_return(),
    )
        .prop_map(|(period, stock, sector, returns)| {
            ReturnRecord::new(period, stock, sector, "NIFTY", returns)
        })
}

fn arb_records() -> impl Strategy<Value = Vec<ReturnRecord>> {
    prop::collection::vec(arb_record(), 0..40)
}

// ── 1. Idempotence ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn aggregation_is_idempotent(records in arb_records()) {
        prop_assert_eq!(aggregate(&records), aggregate(&records));
    }
}

// ── 2. Appearance Accounting ─────────────────────────────────────────

proptest! {
    #[test]
    fn appearances_match_valid_cells(records in arb_records()) {
        let agg = aggregate(&records);
        prop_assert_eq!(agg.matrix.len(), agg.stock_stats.len());

        for (row, stats) in agg.matrix.iter().zip(&agg.stock_stats) {
            prop_assert_eq!(&row.stock, &stats.stock);
            prop_assert_eq!(row.cells.len(), agg.periods.len());

            let valid = row.cells.iter().filter(|c| c.is_some()).count();
            prop_assert_eq!(stats.appearances, valid);
            prop_assert_eq!(stats.returns.len(), valid);
            prop_assert_eq!(stats.periods_appeared.len(), valid);

            if let Some(max) = stats.returns.iter().map(|r| r.value).max() {
                prop_assert_eq!(stats.max_return, max);
                prop_assert!(stats.avg_return <= max);
            } else {
                prop_assert_eq!(stats.avg_return, Decimal::ZERO);
            }
        }

        let distinct: BTreeSet<&str> = records.iter().map(|r| r.period.as_str()).collect();
        prop_assert_eq!(agg.periods.len(), distinct.len());
    }
}

// ── 3. Union Coverage ────────────────────────────────────────────────

proptest! {
    #[test]
    fn every_stock_gets_one_merged_view(
        monthly in arb_records(),
        quarterly in arb_records(),
        yearly in arb_records(),
    ) {
        let (m, q, y) = (aggregate(&monthly), aggregate(&quarterly), aggregate(&yearly));
        let views = merge_cross_timeframe(&m, &q, &y);

        let expected: BTreeSet<&str> = monthly
            .iter()
            .chain(&quarterly)
            .chain(&yearly)
            .map(|r| r.stock.as_str())
            .collect();
        let merged: BTreeSet<&str> = views.iter().map(|v| v.stock.as_str()).collect();
        prop_assert_eq!(views.len(), expected.len());
        prop_assert_eq!(merged, expected);

        for view in &views {
            prop_assert!((1..=3).contains(&view.total_timeframes));
            prop_assert_eq!(view.timeframes.len(), view.total_timeframes);
        }
        for pair in views.windows(2) {
            prop_assert!(pair[0].total_timeframes >= pair[1].total_timeframes);
        }
    }
}

// ── 4. Classification ────────────────────────────────────────────────

proptest! {
    #[test]
    fn status_matches_pooled_average(
        monthly in arb_records(),
        quarterly in arb_records(),
    ) {
        let (m, q, y) = (aggregate(&monthly), aggregate(&quarterly), aggregate(&[]));
        let analysis = analyze_sectors(&m, &q, &y);
        let analyzer = SectorAnalyzer::default();

        for stats in &analysis.cross_timeframe {
            prop_assert_eq!(stats.status, analyzer.classify(stats.overall_avg_return));
            prop_assert!(stats.return_count > 0);
        }
        for pair in analysis.cross_timeframe.windows(2) {
            prop_assert!(pair[0].overall_avg_return >= pair[1].overall_avg_return);
        }

        let hot = analysis.cross_timeframe.iter().filter(|s| s.status == SectorStatus::Hot).count();
        prop_assert_eq!(analysis.hot_sectors.len(), hot);
    }
}
