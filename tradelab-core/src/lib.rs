//! TradeLab Core — trade data model, loading, aggregation, export.
//!
//! This crate is the whole computation side of the analyzer:
//! - Domain types (trades with derived duration/hour/category, datasets,
//!   symbol filters)
//! - CSV trade-log loader with silent-skip row policy
//! - The [`analysis::Summary`] aggregator the presentation layer consumes
//! - Chart (PNG/PDF) and data (CSV/XLSX) export
//!
//! Everything here is synchronous and pure apart from file I/O at the
//! edges: the UI owns no business logic, it calls in and renders what
//! comes back.

pub mod analysis;
pub mod data;
pub mod domain;
pub mod export;

pub use analysis::{AnalysisConfig, Summary};
pub use data::{load_trades, LoadError, LoadReport};
pub use domain::{Dataset, SymbolFilter, Trade, TradeCategory};
pub use export::{export_chart, export_data, ChartPalette, ExportError};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the types handed across the core/TUI seam are
    /// Send + Sync, so a caller is free to move datasets between threads
    /// even though this crate never does.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Trade>();
        require_sync::<Trade>();
        require_send::<Dataset>();
        require_sync::<Dataset>();
        require_send::<SymbolFilter>();
        require_sync::<SymbolFilter>();
        require_send::<AnalysisConfig>();
        require_sync::<AnalysisConfig>();
        require_send::<Summary>();
        require_sync::<Summary>();
        require_send::<LoadError>();
        require_sync::<LoadError>();
        require_send::<ExportError>();
        require_sync::<ExportError>();
    }
}
