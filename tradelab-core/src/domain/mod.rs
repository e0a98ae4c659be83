//! Domain types: trades, datasets, symbol filtering.

mod dataset;
mod trade;

pub use dataset::{Dataset, SymbolFilter};
pub use trade::{Trade, TradeCategory, QUICK_CUTOFF_SECONDS};
