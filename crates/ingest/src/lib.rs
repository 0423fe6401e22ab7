//! # SectorScope Ingest
//!
//! This crate turns raw inputs into `ReturnRecord`s: the three timeframe JSON
//! files, the F&O and IPO membership lists, and tab-separated pasted rows.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** All file access lives here. The analytics crate
//!   never touches the filesystem.
//! - **Tolerant Decoding:** A malformed field degrades to a missing value
//!   with a warning. Only structural problems (unreadable files, invalid
//!   JSON, unexpected document shapes) are errors.
//!
//! ## Public API
//!
//! - `load_timeframe`, `load_dataset`, `load_members`: async JSON loaders.
//! - `parse_paste`: tab-separated paste parsing.
//! - `IngestError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod decode;
pub mod error;
pub mod loader;
pub mod paste;

// Re-export the key components to create a clean, public-facing API.
pub use decode::{decode_record, decode_records, parse_return_text};
pub use error::IngestError;
pub use loader::{load_dataset, load_members, load_timeframe};
pub use paste::parse_paste;
