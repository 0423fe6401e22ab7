//! # SectorScope Analytics
//!
//! This crate turns raw return records into the views the rest of the system
//! reads: the per-timeframe stock×period matrix and stock statistics, the
//! merged cross-timeframe stock view, and pooled sector statistics with their
//! Hot / Emerging / Cooling / Stable classification.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It performs no I/O and
//!   depends only on `core-types` and `configuration`.
//! - **Stateless Calculation:** Every operation recomputes its result from the
//!   records it is handed. The same input always produces the same output.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: settings-aware facade over every calculation.
//! - `aggregate`, `merge_cross_timeframe`, `analyze_sectors`: the free-function core.
//! - `period`: chronological ordering of heterogeneous period labels.
//! - `view` and `identity`: filtering, sorting and export identifiers.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod aggregator;
pub mod cross_timeframe;
pub mod details;
pub mod engine;
pub mod entity;
pub mod error;
pub mod identity;
pub mod period;
pub mod report;
pub mod sector;
pub mod view;
mod util;

// Re-export the key components to create a clean, public-facing API.
pub use aggregator::{DatasetAggregates, aggregate};
pub use cross_timeframe::{merge_cross_timeframe, merge_cross_timeframe_with};
pub use details::{entity_details, sector_details, stock_details};
pub use engine::AnalyticsEngine;
pub use entity::resolve_entity_kind;
pub use error::AnalyticsError;
pub use identity::{exclude_members, members_excluding, sanitize_identifier, unique_identifiers};
pub use report::{
    Appearance, CrossTimeframeStockView, EntityDetails, MatrixRow, PeriodReturn, SectorAnalysis,
    SectorDetails, SectorStats, StockDetails, StockStats, TimeframeAggregate,
};
pub use sector::{SectorAnalyzer, analyze_sectors};
pub use view::{
    StatusCounts, StockFilter, filter_cross_timeframe, filter_sectors, filter_stock_stats,
    status_counts,
};
