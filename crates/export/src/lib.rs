//! # SectorScope Export
//!
//! Renders raw records and derived views to CSV and JSON, and writes them to
//! dated export files.
//!
//! ## Public API
//!
//! - `records_csv`, `dataset_csv`, `identifiers_csv`: raw data and stock universes.
//! - `stock_stats_csv`, `cross_timeframe_csv`, `sector_stats_csv`, `matrix_csv`: derived views.
//! - `to_json`, `export_file_name`, `write_export`: JSON rendering and file output.
//! - `ExportError`: the specific error types that can be returned from this crate.

pub mod error;
pub mod files;
pub mod rows;

pub use error::ExportError;
pub use files::{export_file_name, to_json, write_export};
pub use rows::{
    cross_timeframe_csv, dataset_csv, identifiers_csv, matrix_csv, records_csv, sector_stats_csv,
    stock_stats_csv,
};
