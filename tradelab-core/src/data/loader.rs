//! CSV trade-log loader.
//!
//! Reads a headered CSV with the five source columns, derives the
//! per-trade fields, and drops rows whose timestamps (or profit) do not
//! parse. Dropped rows are counted, not reported individually: a broker
//! export with a stray footer line should load, not fail.

use std::fs::File;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::domain::{Dataset, Trade};

/// Header columns the input file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = ["Open time", "Close time", "Symbol", "Side", "Profit"];

/// Timestamp layouts accepted for the two time columns. Broker exports
/// disagree on separators; this list covers the common ones.
const TIME_FORMATS: [&str; 7] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Errors that abort a load. Individual bad rows never surface here —
/// they are skipped and counted in [`LoadReport::skipped_rows`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// A loaded dataset plus how many rows were dropped on the way in.
#[derive(Debug)]
pub struct LoadReport {
    pub dataset: Dataset,
    /// Rows discarded because a timestamp or the profit field failed to
    /// parse. Informational only; callers may surface it as a warning.
    pub skipped_rows: usize,
}

/// Load a trade log from `path`.
///
/// Fails if the file cannot be read, the CSV structure is broken, or a
/// required column is absent from the header. Retained rows appear in the
/// dataset in file order with all derived fields populated.
pub fn load_trades(path: impl AsRef<Path>) -> Result<LoadReport, LoadError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Csv {
            path: display.clone(),
            source,
        })?
        .clone();

    let mut columns = [0usize; 5];
    for (slot, name) in columns.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(LoadError::MissingColumn(name))?;
    }
    let [open_col, close_col, symbol_col, side_col, profit_col] = columns;

    let mut trades = Vec::new();
    let mut skipped_rows = 0usize;

    for record in reader.records() {
        let record = record.map_err(|source| LoadError::Csv {
            path: display.clone(),
            source,
        })?;

        let open_time = record.get(open_col).and_then(parse_timestamp);
        let close_time = record.get(close_col).and_then(parse_timestamp);
        let profit = record
            .get(profit_col)
            .and_then(|s| s.trim().parse::<f64>().ok());

        match (open_time, close_time, profit) {
            (Some(open_time), Some(close_time), Some(profit)) => {
                let symbol = record.get(symbol_col).unwrap_or_default().trim();
                let side = record.get(side_col).unwrap_or_default().trim();
                trades.push(Trade::new(open_time, close_time, symbol, side, profit));
            }
            _ => skipped_rows += 1,
        }
    }

    Ok(LoadReport {
        dataset: Dataset::new(trades),
        skipped_rows,
    })
}

/// Parse a timestamp in any of the accepted layouts. A bare date parses
/// to midnight. Returns `None` rather than an error: the caller's policy
/// for a bad timestamp is to drop the row.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for format in TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    for format in ["%Y-%m-%d", "%Y.%m.%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_rows_and_derives_fields() {
        let file = write_csv(
            "Open time,Close time,Symbol,Side,Profit\n\
             2024-01-02 09:30:00,2024-01-02 09:31:00,EURUSD,Buy,10.5\n\
             2024-01-02 14:00:00,2024-01-02 14:05:00,GBPUSD,Sell,-4\n",
        );
        let report = load_trades(file.path()).unwrap();
        assert_eq!(report.dataset.len(), 2);
        assert_eq!(report.skipped_rows, 0);

        let first = &report.dataset.trades[0];
        assert_eq!(first.duration_seconds, 60);
        assert_eq!(first.hour_of_day, 9);
        assert!(first.is_quick());

        let second = &report.dataset.trades[1];
        assert_eq!(second.duration_seconds, 300);
        assert!(!second.is_quick());
    }

    #[test]
    fn unparseable_timestamps_drop_the_row_silently() {
        let file = write_csv(
            "Open time,Close time,Symbol,Side,Profit\n\
             not-a-date,2024-01-02 09:31:00,EURUSD,Buy,10\n\
             2024-01-02 09:30:00,also bad,EURUSD,Buy,10\n\
             2024-01-02 09:30:00,2024-01-02 09:31:00,EURUSD,Buy,10\n",
        );
        let report = load_trades(file.path()).unwrap();
        assert_eq!(report.dataset.len(), 1);
        assert_eq!(report.skipped_rows, 2);
    }

    #[test]
    fn missing_column_is_a_load_error() {
        let file = write_csv("Open time,Close time,Symbol,Profit\n");
        let err = load_trades(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("Side")));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_trades("/nonexistent/trades.csv").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn all_rows_bad_yields_empty_dataset_not_error() {
        let file = write_csv(
            "Open time,Close time,Symbol,Side,Profit\n\
             x,y,EURUSD,Buy,1\n",
        );
        let report = load_trades(file.path()).unwrap();
        assert!(report.dataset.is_empty());
        assert_eq!(report.skipped_rows, 1);
    }

    #[test]
    fn accepts_broker_dot_dates_and_bare_dates() {
        let file = write_csv(
            "Open time,Close time,Symbol,Side,Profit\n\
             2024.01.02 09:30,2024.01.02 09:35,XAUUSD,Buy,7\n\
             2024-01-03,2024-01-04,XAUUSD,Sell,1\n",
        );
        let report = load_trades(file.path()).unwrap();
        assert_eq!(report.dataset.len(), 2);
        assert_eq!(report.dataset.trades[0].duration_seconds, 300);
        assert_eq!(report.dataset.trades[1].hour_of_day, 0);
    }

    #[test]
    fn non_numeric_profit_drops_the_row() {
        let file = write_csv(
            "Open time,Close time,Symbol,Side,Profit\n\
             2024-01-02 09:30:00,2024-01-02 09:31:00,EURUSD,Buy,oops\n",
        );
        let report = load_trades(file.path()).unwrap();
        assert!(report.dataset.is_empty());
        assert_eq!(report.skipped_rows, 1);
    }
}
