use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected document shape in {}: expected {expected}", path.display())]
    UnexpectedShape { path: PathBuf, expected: String },

    #[error("Invalid pasted row on line {line}: {reason}")]
    Paste { line: usize, reason: String },
}
