//! Tabular export — all source and derived columns, original row order.

use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::domain::{Dataset, Trade};
use crate::export::ExportError;

/// Column order written by both backends. Matches the loaded frame:
/// the five source columns followed by the three derived ones.
pub const EXPORT_COLUMNS: [&str; 8] = [
    "Open time",
    "Close time",
    "Symbol",
    "Side",
    "Profit",
    "Duration",
    "Hour",
    "Category",
];

/// Canonical timestamp layout for exports. The loader accepts it back,
/// so exporting and reloading reproduces the same source rows.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Write the dataset to `path`. `.xlsx` selects spreadsheet output,
/// anything else gets CSV.
pub fn export_data(path: impl AsRef<Path>, dataset: &Dataset) -> Result<(), ExportError> {
    let path = path.as_ref();
    let is_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));

    if is_xlsx {
        write_xlsx(path, dataset)
    } else {
        write_csv(path, dataset)
    }
}

fn write_csv(path: &Path, dataset: &Dataset) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(EXPORT_COLUMNS)?;
    for trade in &dataset.trades {
        writer.write_record(row_fields(trade))?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}

fn write_xlsx(path: &Path, dataset: &Dataset) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in EXPORT_COLUMNS.iter().enumerate() {
        worksheet.write(0, col as u16, *name)?;
    }
    for (i, trade) in dataset.trades.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.write(row, 0, trade.open_time.format(TIME_FORMAT).to_string())?;
        worksheet.write(row, 1, trade.close_time.format(TIME_FORMAT).to_string())?;
        worksheet.write(row, 2, trade.symbol.as_str())?;
        worksheet.write(row, 3, trade.side.as_str())?;
        worksheet.write(row, 4, trade.profit)?;
        worksheet.write(row, 5, trade.duration_seconds as f64)?;
        worksheet.write(row, 6, trade.hour_of_day as f64)?;
        worksheet.write(row, 7, trade.category.label())?;
    }

    workbook.save(path)?;
    Ok(())
}

fn row_fields(trade: &Trade) -> [String; 8] {
    [
        trade.open_time.format(TIME_FORMAT).to_string(),
        trade.close_time.format(TIME_FORMAT).to_string(),
        trade.symbol.clone(),
        trade.side.clone(),
        trade.profit.to_string(),
        trade.duration_seconds.to_string(),
        trade.hour_of_day.to_string(),
        trade.category.label().to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_dataset() -> Dataset {
        let open = NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        Dataset::new(vec![
            Trade::new(open, open + chrono::Duration::seconds(90), "EURUSD", "Buy", 10.5),
            Trade::new(open, open + chrono::Duration::seconds(600), "GBPUSD", "Sell", -4.0),
        ])
    }

    #[test]
    fn csv_export_writes_all_columns_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        export_data(&path, &sample_dataset()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Open time,Close time,Symbol,Side,Profit,Duration,Hour,Category"
        );
        let first = lines.next().unwrap();
        assert!(first.starts_with("2024-02-01 09:30:00,2024-02-01 09:31:30,EURUSD,Buy,10.5"));
        assert!(first.contains("Quick"));
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn unknown_extension_falls_back_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.dat");
        export_data(&path, &sample_dataset()).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Open time,"));
    }

    #[test]
    fn xlsx_export_produces_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.xlsx");
        export_data(&path, &sample_dataset()).unwrap();
        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn empty_dataset_exports_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        export_data(&path, &Dataset::default()).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }
}
