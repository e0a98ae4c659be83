//! Profit aggregation: dataset + config → summary statistics.

mod config;
mod summary;

pub use config::AnalysisConfig;
pub use summary::Summary;
