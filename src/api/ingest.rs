use serde::Deserialize;

use crate::core::{Bar, ChartDate};
use crate::error::{ChartError, ChartResult};

/// One wire record: `[date, open, high, low, close, volume]`.
#[derive(Debug, Clone, Deserialize)]
struct RawRecord(String, f64, f64, f64, f64, f64);

/// Parses a JSON array of `[date, open, high, low, close, volume]` records
/// into a validated series.
///
/// Records must be ordered newest first with strictly decreasing dates; this
/// ordering is load-bearing for every window scan and indicator traversal, so
/// it is checked here rather than trusted.
pub fn series_from_json(json: &str) -> ChartResult<Vec<Bar>> {
    let records: Vec<RawRecord> = serde_json::from_str(json)
        .map_err(|err| ChartError::InvalidData(format!("malformed series payload: {err}")))?;

    let mut series = Vec::with_capacity(records.len());
    let mut prev_date: Option<ChartDate> = None;

    for record in records {
        let date = ChartDate::parse(&record.0)?;
        if let Some(prev) = prev_date {
            if date >= prev {
                return Err(ChartError::InvalidData(format!(
                    "series must be ordered newest first: {:?} follows {prev:?}",
                    date
                )));
            }
        }
        prev_date = Some(date);

        series.push(Bar::new(
            date, record.1, record.2, record.3, record.4, record.5,
        )?);
    }

    Ok(series)
}
