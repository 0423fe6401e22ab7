use crate::decode::parse_return_text;
use crate::error::IngestError;
use core_types::ReturnRecord;

const COLUMNS: usize = 5;

/// Parses tab-separated rows of `period, stock, sector, index, returns`.
///
/// A first row whose first cell is `period` (any case) is a header and is
/// skipped. Blank lines are ignored. Extra cells are ignored. Empty sector or
/// index cells become `None`, and an unparseable return becomes `None` with
/// a warning.
///
/// # Errors
///
/// Returns `IngestError::Paste` for a row with fewer than five cells. Line
/// numbers are 1-based.
pub fn parse_paste(text: &str) -> Result<Vec<ReturnRecord>, IngestError> {
    let mut records = Vec::new();
    let mut seen_row = false;

    for (offset, line) in text.lines().enumerate() {
        let line_number = offset + 1;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let cells: Vec<&str> = line.split('\t').map(str::trim).collect();
        if !seen_row {
            seen_row = true;
            if cells[0].eq_ignore_ascii_case("period") {
                continue;
            }
        }
        if cells.len() < COLUMNS {
            return Err(IngestError::Paste {
                line: line_number,
                reason: format!("expected {COLUMNS} tab-separated cells, found {}", cells.len()),
            });
        }

        let returns = parse_return_text(cells[4]).unwrap_or_else(|e| {
            tracing::warn!(line = line_number, value = cells[4], error = %e, "Ignoring unparseable return.");
            None
        });
        records.push(ReturnRecord {
            period: cells[0].to_string(),
            stock: cells[1].to_string(),
            sector: non_empty(cells[2]),
            index: non_empty(cells[3]),
            returns,
        });
    }

    tracing::debug!(records = records.len(), "Parsed pasted rows.");
    Ok(records)
}

fn non_empty(cell: &str) -> Option<String> {
    (!cell.is_empty()).then(|| cell.to_string())
}
