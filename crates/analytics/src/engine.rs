use crate::aggregator::{DatasetAggregates, aggregate};
use crate::cross_timeframe::merge_cross_timeframe_with;
use crate::details::{sector_details, stock_details};
use crate::entity::resolve_entity_kind;
use crate::error::AnalyticsError;
use crate::report::{
    CrossTimeframeStockView, EntityDetails, SectorAnalysis, SectorDetails, StockDetails,
    TimeframeAggregate,
};
use crate::sector::SectorAnalyzer;
use configuration::AnalysisSettings;
use core_types::{Dataset, EntityKind, MergePolicy, ReturnRecord};

/// A stateless calculator for the stock, cross-timeframe and sector views.
///
/// The engine only carries settings. Every call recomputes its result from
/// the inputs it is given; callers that want caching keep the
/// [`DatasetAggregates`] around themselves.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    analyzer: SectorAnalyzer,
    merge_policy: MergePolicy,
}

impl AnalyticsEngine {
    /// Builds an engine from the `[analysis]` settings.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidSettings` if the status thresholds are
    /// not strictly descending.
    pub fn new(settings: &AnalysisSettings) -> Result<Self, AnalyticsError> {
        settings.thresholds.validate()?;
        Ok(Self {
            analyzer: SectorAnalyzer::new(settings.thresholds),
            merge_policy: settings.merge_policy,
        })
    }

    pub fn merge_policy(&self) -> MergePolicy {
        self.merge_policy
    }

    pub fn analyzer(&self) -> &SectorAnalyzer {
        &self.analyzer
    }

    pub fn aggregate(&self, records: &[ReturnRecord]) -> TimeframeAggregate {
        aggregate(records)
    }

    pub fn aggregate_dataset(&self, dataset: &Dataset) -> DatasetAggregates {
        let aggregates = DatasetAggregates::from_dataset(dataset);
        tracing::info!(
            records = dataset.total_records(),
            monthly_stocks = aggregates.monthly.stock_stats.len(),
            quarterly_stocks = aggregates.quarterly.stock_stats.len(),
            yearly_stocks = aggregates.yearly.stock_stats.len(),
            "Aggregated dataset."
        );
        aggregates
    }

    pub fn merge_cross_timeframe(&self, aggregates: &DatasetAggregates) -> Vec<CrossTimeframeStockView> {
        merge_cross_timeframe_with(
            &aggregates.monthly,
            &aggregates.quarterly,
            &aggregates.yearly,
            self.merge_policy,
        )
    }

    pub fn analyze_sectors(&self, aggregates: &DatasetAggregates) -> SectorAnalysis {
        self.analyzer
            .analyze(&aggregates.monthly, &aggregates.quarterly, &aggregates.yearly)
    }

    pub fn resolve_entity_kind(&self, aggregates: &DatasetAggregates, label: &str) -> EntityKind {
        resolve_entity_kind(label, &aggregates.monthly, &aggregates.quarterly, &aggregates.yearly)
    }

    pub fn stock_details(&self, aggregates: &DatasetAggregates, stock: &str) -> StockDetails {
        stock_details(stock, &aggregates.monthly, &aggregates.quarterly, &aggregates.yearly)
    }

    pub fn sector_details(&self, aggregates: &DatasetAggregates, sector: &str) -> SectorDetails {
        sector_details(sector, &aggregates.monthly, &aggregates.quarterly, &aggregates.yearly)
    }

    pub fn entity_details(&self, aggregates: &DatasetAggregates, label: &str) -> EntityDetails {
        let details = match self.resolve_entity_kind(aggregates, label) {
            EntityKind::Stock => EntityDetails::Stock(self.stock_details(aggregates, label)),
            EntityKind::Sector => EntityDetails::Sector(self.sector_details(aggregates, label)),
        };
        tracing::debug!(label, kind = ?details.kind(), "Resolved entity details.");
        details
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::StatusThresholds;
    use core_types::SectorStatus;
    use rust_decimal_macros::dec;

    fn dataset() -> Dataset {
        Dataset {
            monthly: vec![
                ReturnRecord::new("Jan-24", "ACME", "Tech", "NIFTY", Some(dec!(0))),
                ReturnRecord::new("Jan-24", "BOLT", "Energy", "NIFTY", Some(dec!(45))),
            ],
            quarterly: vec![ReturnRecord::new("Q1 2024", "ACME", "Tech", "NIFTY", Some(dec!(40)))],
            yearly: vec![],
        }
    }

    #[test]
    fn rejects_unordered_thresholds() {
        let settings = AnalysisSettings {
            thresholds: StatusThresholds {
                hot: dec!(10),
                emerging: dec!(40),
                cooling: dec!(5),
            },
            merge_policy: MergePolicy::Strict,
        };
        assert!(matches!(
            AnalyticsEngine::new(&settings),
            Err(AnalyticsError::InvalidSettings(_))
        ));
    }

    #[test]
    fn merge_policy_flows_from_settings() {
        let legacy = AnalyticsEngine::new(&AnalysisSettings {
            merge_policy: MergePolicy::Legacy,
            ..AnalysisSettings::default()
        })
        .unwrap();
        let strict = AnalyticsEngine::default();

        let aggregates = strict.aggregate_dataset(&dataset());
        assert_eq!(strict.merge_cross_timeframe(&aggregates)[0].avg_return, dec!(20));
        assert_eq!(legacy.merge_cross_timeframe(&aggregates)[0].avg_return, dec!(40));
    }

    #[test]
    fn sectors_and_details_through_the_facade() {
        let engine = AnalyticsEngine::default();
        let aggregates = engine.aggregate_dataset(&dataset());

        let analysis = engine.analyze_sectors(&aggregates);
        assert_eq!(analysis.cross_timeframe[0].sector, "Energy");
        assert_eq!(analysis.cross_timeframe[0].status, SectorStatus::Emerging);

        match engine.entity_details(&aggregates, "Tech") {
            EntityDetails::Sector(details) => assert_eq!(details.total_appearances, 2),
            other => panic!("expected sector details, got {other:?}"),
        }
    }
}
