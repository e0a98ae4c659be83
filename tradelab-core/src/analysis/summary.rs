//! Summary — the statistics bundle the presentation layer consumes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisConfig;
use crate::domain::{Dataset, TradeCategory};

/// Aggregates over one (possibly filtered) dataset.
///
/// Computed fresh on every load, filter change, or target change — never
/// stored, never incrementally updated. All fields are deterministic pure
/// functions of `(Dataset, AnalysisConfig)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_profit: f64,
    /// Profit summed over `Quick` trades only.
    pub quick_profit: f64,
    /// Quick profit as a percentage of total profit; 0 when the total is 0.
    pub pct_quick_of_current: f64,
    /// Quick profit as a percentage of the profit target; 0 when the
    /// target is 0.
    pub pct_quick_of_target: f64,
    /// Mean trade duration in minutes; `None` for an empty dataset.
    pub avg_duration_minutes: Option<f64>,
    /// True when the quick share of current profit exceeds the threshold.
    pub threshold_exceeded: bool,
    /// Summed profit per category, over the categories present. The
    /// values partition `total_profit`.
    pub profit_by_category: BTreeMap<TradeCategory, f64>,
    /// Summed profit per hour of day, zero-filled for empty hours.
    pub profit_by_hour: [f64; 24],
}

impl Summary {
    pub fn compute(dataset: &Dataset, config: &AnalysisConfig) -> Summary {
        let mut total_profit = 0.0;
        let mut quick_profit = 0.0;
        let mut duration_sum = 0.0;
        let mut profit_by_category: BTreeMap<TradeCategory, f64> = BTreeMap::new();
        let mut profit_by_hour = [0.0f64; 24];

        for trade in &dataset.trades {
            total_profit += trade.profit;
            if trade.category == TradeCategory::Quick {
                quick_profit += trade.profit;
            }
            duration_sum += trade.duration_seconds as f64;
            *profit_by_category.entry(trade.category).or_insert(0.0) += trade.profit;
            profit_by_hour[trade.hour_of_day as usize] += trade.profit;
        }

        // Zero totals and targets degrade to 0% rather than dividing.
        let pct_quick_of_current = if total_profit != 0.0 {
            quick_profit / total_profit * 100.0
        } else {
            0.0
        };
        let pct_quick_of_target = if config.profit_target != 0.0 {
            quick_profit / config.profit_target * 100.0
        } else {
            0.0
        };

        let avg_duration_minutes = if dataset.is_empty() {
            None
        } else {
            Some(duration_sum / dataset.len() as f64 / 60.0)
        };

        Summary {
            total_profit,
            quick_profit,
            pct_quick_of_current,
            pct_quick_of_target,
            avg_duration_minutes,
            threshold_exceeded: pct_quick_of_current > config.threshold * 100.0,
            profit_by_category,
            profit_by_hour,
        }
    }
}
