//! User-adjustable analysis parameters.

use serde::{Deserialize, Serialize};

/// Knobs the UI exposes. Neither value is validated as a business
/// quantity; the target only feeds a relative percentage and the
/// threshold only flags the quick-profit share.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Reference profit, adjustable 0..=1000 in the UI.
    pub profit_target: f64,
    /// Fraction of total profit above which the quick share is flagged.
    pub threshold: f64,
}

impl AnalysisConfig {
    pub const DEFAULT_PROFIT_TARGET: f64 = 400.0;
    pub const DEFAULT_THRESHOLD: f64 = 0.25;
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            profit_target: Self::DEFAULT_PROFIT_TARGET,
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}
