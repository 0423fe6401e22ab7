use crate::report::{SectorAnalysis, SectorStats, TimeframeAggregate};
use crate::util::{maximum, mean};
use configuration::StatusThresholds;
use core_types::{SectorStatus, Timeframe};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

/// Pools individual returns by sector and classifies each sector.
///
/// Averages are taken over every valid return of every stock in the sector,
/// so a stock with many periods weighs more than a stock with few. A sector
/// with no valid return in a scope is left out of that scope.
#[derive(Debug, Clone, Default)]
pub struct SectorAnalyzer {
    thresholds: StatusThresholds,
}

impl SectorAnalyzer {
    pub fn new(thresholds: StatusThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &StatusThresholds {
        &self.thresholds
    }

    /// Maps a pooled average to its status. Lower bounds are inclusive.
    pub fn classify(&self, avg_return: Decimal) -> SectorStatus {
        if avg_return >= self.thresholds.hot {
            SectorStatus::Hot
        } else if avg_return >= self.thresholds.emerging {
            SectorStatus::Emerging
        } else if avg_return >= self.thresholds.cooling {
            SectorStatus::Cooling
        } else {
            SectorStatus::Stable
        }
    }

    pub fn analyze(
        &self,
        monthly: &TimeframeAggregate,
        quarterly: &TimeframeAggregate,
        yearly: &TimeframeAggregate,
    ) -> SectorAnalysis {
        let aggregates = [
            (Timeframe::Monthly, monthly),
            (Timeframe::Quarterly, quarterly),
            (Timeframe::Yearly, yearly),
        ];

        let cross_timeframe = self.analyze_combined(&aggregates);
        let by_status = |status: SectorStatus| -> Vec<SectorStats> {
            cross_timeframe
                .iter()
                .filter(|s| s.status == status)
                .cloned()
                .collect()
        };

        let analysis = SectorAnalysis {
            monthly: self.analyze_timeframe(Timeframe::Monthly, monthly),
            quarterly: self.analyze_timeframe(Timeframe::Quarterly, quarterly),
            yearly: self.analyze_timeframe(Timeframe::Yearly, yearly),
            hot_sectors: by_status(SectorStatus::Hot),
            emerging_sectors: by_status(SectorStatus::Emerging),
            cooling_sectors: by_status(SectorStatus::Cooling),
            cross_timeframe,
        };

        tracing::debug!(
            sectors = analysis.cross_timeframe.len(),
            hot = analysis.hot_sectors.len(),
            emerging = analysis.emerging_sectors.len(),
            cooling = analysis.cooling_sectors.len(),
            "Analyzed sectors."
        );
        analysis
    }

    /// Sector statistics for a single timeframe.
    pub fn analyze_timeframe(
        &self,
        timeframe: Timeframe,
        aggregate: &TimeframeAggregate,
    ) -> Vec<SectorStats> {
        let mut pools: BTreeMap<&str, SectorPool> = BTreeMap::new();
        collect(timeframe, aggregate, &mut pools);
        self.finish(pools)
    }

    /// Sector statistics pooled across the given timeframes.
    pub fn analyze_combined(
        &self,
        aggregates: &[(Timeframe, &TimeframeAggregate)],
    ) -> Vec<SectorStats> {
        let mut pools: BTreeMap<&str, SectorPool> = BTreeMap::new();
        for (timeframe, aggregate) in aggregates {
            collect(*timeframe, aggregate, &mut pools);
        }
        self.finish(pools)
    }

    fn finish(&self, pools: BTreeMap<&str, SectorPool>) -> Vec<SectorStats> {
        let mut stats: Vec<SectorStats> = pools
            .into_iter()
            .filter_map(|(sector, pool)| self.sector_stats(sector, pool))
            .collect();
        // Stable, so equal averages keep sector-name order.
        stats.sort_by(|a, b| b.overall_avg_return.cmp(&a.overall_avg_return));
        stats
    }

    fn sector_stats(&self, sector: &str, pool: SectorPool) -> Option<SectorStats> {
        let all: Vec<Decimal> = pool.returns.values().flatten().copied().collect();
        let overall_avg_return = mean(&all)?;
        let max_return = maximum(&all)?;
        let avg_for = |tf: Timeframe| pool.returns.get(&tf).and_then(|r| mean(r));

        Some(SectorStats {
            sector: sector.to_string(),
            overall_avg_return,
            max_return,
            status: self.classify(overall_avg_return),
            monthly_avg: avg_for(Timeframe::Monthly),
            quarterly_avg: avg_for(Timeframe::Quarterly),
            yearly_avg: avg_for(Timeframe::Yearly),
            total_timeframes: pool.timeframes.len(),
            timeframes: pool.timeframes.into_iter().collect(),
            return_count: all.len(),
            stock_count: pool.stocks.len(),
        })
    }
}

/// Every valid return of one sector, split by timeframe.
#[derive(Default)]
struct SectorPool<'a> {
    returns: BTreeMap<Timeframe, Vec<Decimal>>,
    /// Timeframes in which any stock of the sector appears, with or without returns.
    timeframes: BTreeSet<Timeframe>,
    stocks: BTreeSet<&'a str>,
}

fn collect<'a>(
    timeframe: Timeframe,
    aggregate: &'a TimeframeAggregate,
    pools: &mut BTreeMap<&'a str, SectorPool<'a>>,
) {
    for stats in &aggregate.stock_stats {
        let pool = pools.entry(stats.sector.as_str()).or_default();
        pool.timeframes.insert(timeframe);
        pool.stocks.insert(stats.stock.as_str());
        pool.returns
            .entry(timeframe)
            .or_default()
            .extend(stats.returns.iter().map(|r| r.value));
    }
}

/// Sector analysis with the default thresholds.
pub fn analyze_sectors(
    monthly: &TimeframeAggregate,
    quarterly: &TimeframeAggregate,
    yearly: &TimeframeAggregate,
) -> SectorAnalysis {
    SectorAnalyzer::default().analyze(monthly, quarterly, yearly)
}
