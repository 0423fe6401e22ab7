use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    AnalysisSettings, Config, DataSources, ExportSettings, LoggingSettings, StatusThresholds,
    ViewDefaults,
};

/// The config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "sectorscope.toml";

/// Prefix for environment overrides, e.g. `SECTORSCOPE_ANALYSIS__MERGE_POLICY=legacy`.
pub const ENV_PREFIX: &str = "SECTORSCOPE";

/// Loads the application configuration.
///
/// Sources are layered: built-in defaults, then the TOML file, then environment
/// variables. An explicitly given file must exist; the default file is optional.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;
    tracing::debug!(?config, "Configuration loaded.");

    Ok(config)
}

/// Parses configuration from an in-memory TOML document, without environment overrides.
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}
