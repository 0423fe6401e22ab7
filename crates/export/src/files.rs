use crate::error::ExportError;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Pretty JSON for any serializable derived structure.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// `"{prefix}-{YYYY-MM-DD}.csv"`, e.g. `monthly-data-2024-07-31.csv`.
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-{}.csv", date.format("%Y-%m-%d"))
}

/// Writes `contents` to `dir/file_name`, creating `dir` if needed.
pub fn write_export(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(file_name);
    std::fs::write(&path, contents).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "Wrote export.");
    Ok(path)
}
