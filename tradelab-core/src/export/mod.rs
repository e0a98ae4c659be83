//! Export: the current dataset to CSV/XLSX, the current figure to PNG/PDF.
//!
//! Format selection is by file extension in both cases; unrecognized
//! extensions fall back to CSV and PNG respectively.

mod chart;
mod data;

use thiserror::Error;

pub use chart::{export_chart, ChartPalette};
pub use data::{export_data, EXPORT_COLUMNS};

/// Errors from either export path. No partial file is ever left behind by
/// the chart exporters; the tabular writers truncate on create, so a
/// failed write can at worst leave a truncated file the caller reported.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet write failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("chart render failed: {0}")]
    Render(String),

    #[error("PDF write failed: {0}")]
    Pdf(String),
}
