use crate::decode::decode_records;
use crate::error::IngestError;
use configuration::DataSources;
use core_types::{Dataset, ReturnRecord, Timeframe};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;

/// Loads one timeframe's record file.
///
/// The document is either an array of records or an object whose
/// `"monthly"` / `"quarterly"` / `"yearly"` key holds that array. A missing
/// file yields an empty list.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or has
/// any other shape.
pub async fn load_timeframe(path: &Path, timeframe: Timeframe) -> Result<Vec<ReturnRecord>, IngestError> {
    let Some(document) = read_json(path).await? else {
        tracing::warn!(path = %path.display(), %timeframe, "Record file not found, using no records.");
        return Ok(Vec::new());
    };

    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(mut fields) => match fields.remove(timeframe.key()) {
            Some(Value::Array(entries)) => entries,
            _ => return Err(unexpected_shape(path, timeframe)),
        },
        _ => return Err(unexpected_shape(path, timeframe)),
    };

    let records = decode_records(&entries);
    tracing::info!(path = %path.display(), %timeframe, records = records.len(), "Loaded records.");
    Ok(records)
}

/// Loads the three timeframe files concurrently.
pub async fn load_dataset(sources: &DataSources) -> Result<Dataset, IngestError> {
    let monthly_path = sources.timeframe_path(Timeframe::Monthly);
    let quarterly_path = sources.timeframe_path(Timeframe::Quarterly);
    let yearly_path = sources.timeframe_path(Timeframe::Yearly);

    let (monthly, quarterly, yearly) = tokio::try_join!(
        load_timeframe(&monthly_path, Timeframe::Monthly),
        load_timeframe(&quarterly_path, Timeframe::Quarterly),
        load_timeframe(&yearly_path, Timeframe::Yearly),
    )?;

    Ok(Dataset {
        monthly,
        quarterly,
        yearly,
    })
}

/// Loads a membership list (a JSON array of stock names). A missing file is an empty list.
pub async fn load_members(path: &Path) -> Result<Vec<String>, IngestError> {
    let Some(document) = read_json(path).await? else {
        tracing::warn!(path = %path.display(), "Membership list not found, using an empty list.");
        return Ok(Vec::new());
    };

    let Value::Array(entries) = document else {
        return Err(IngestError::UnexpectedShape {
            path: path.to_path_buf(),
            expected: "an array of stock names".to_string(),
        });
    };

    let members: Vec<String> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(name) => Some(name),
            other => {
                tracing::warn!(path = %path.display(), entry = %other, "Skipping non-text member.");
                None
            }
        })
        .collect();
    tracing::debug!(path = %path.display(), members = members.len(), "Loaded membership list.");
    Ok(members)
}

async fn read_json(path: &Path) -> Result<Option<Value>, IngestError> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(IngestError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| IngestError::Json {
            path: path.to_path_buf(),
            source,
        })
}

fn unexpected_shape(path: &Path, timeframe: Timeframe) -> IngestError {
    IngestError::UnexpectedShape {
        path: path.to_path_buf(),
        expected: format!("an array of records or an object with a \"{}\" array", timeframe.key()),
    }
}
