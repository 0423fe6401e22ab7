use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid analysis settings: {0}")]
    InvalidSettings(#[from] configuration::error::ConfigError),
}
