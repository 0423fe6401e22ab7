use crate::error::ConfigError;
use core_types::{MergePolicy, SortKey, Timeframe};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty or missing config file is valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataSources,
    pub analysis: AnalysisSettings,
    pub view: ViewDefaults,
    pub export: ExportSettings,
    pub logging: LoggingSettings,
}

impl Config {
    /// Checks invariants that the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.thresholds.validate()
    }
}

/// Where the raw record files and membership lists live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSources {
    /// Base directory; the file names below are resolved against it.
    pub dir: PathBuf,
    pub monthly: PathBuf,
    pub quarterly: PathBuf,
    pub yearly: PathBuf,
    /// JSON array of F&O (futures & options) stock names.
    pub fno: PathBuf,
    /// JSON array of recently listed (IPO) stock names.
    pub ipo: PathBuf,
}

impl DataSources {
    /// The resolved path of the record file for one timeframe.
    pub fn timeframe_path(&self, timeframe: Timeframe) -> PathBuf {
        let file = match timeframe {
            Timeframe::Monthly => &self.monthly,
            Timeframe::Quarterly => &self.quarterly,
            Timeframe::Yearly => &self.yearly,
        };
        self.dir.join(file)
    }

    pub fn fno_path(&self) -> PathBuf {
        self.dir.join(&self.fno)
    }

    pub fn ipo_path(&self) -> PathBuf {
        self.dir.join(&self.ipo)
    }
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            monthly: PathBuf::from("monthly.json"),
            quarterly: PathBuf::from("quarterly.json"),
            yearly: PathBuf::from("yearly.json"),
            fno: PathBuf::from("fno.json"),
            ipo: PathBuf::from("ipo.json"),
        }
    }
}

/// Settings for sector classification and cross-timeframe merging.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub thresholds: StatusThresholds,
    pub merge_policy: MergePolicy,
}

/// Lower bounds (inclusive) of each sector status, in percent.
/// Anything below `cooling` is Stable.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatusThresholds {
    pub hot: Decimal,
    pub emerging: Decimal,
    pub cooling: Decimal,
}

impl StatusThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hot <= self.emerging || self.emerging <= self.cooling {
            return Err(ConfigError::ValidationError(format!(
                "status thresholds must be strictly descending (hot {} > emerging {} > cooling {})",
                self.hot, self.emerging, self.cooling
            )));
        }
        Ok(())
    }
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            hot: dec!(60),
            emerging: dec!(40),
            cooling: dec!(20),
        }
    }
}

/// Default filter values for the listing views.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewDefaults {
    pub min_return: Decimal,
    pub min_appearances: usize,
    pub sort_by: SortKey,
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            min_return: Decimal::ZERO,
            min_appearances: 1,
            sort_by: SortKey::AvgReturn,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub output_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("exports"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Fallback filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
