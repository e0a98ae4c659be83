//! Trade — one closed trade with derived duration/hour/category fields.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Trades held for at most this many seconds count as "quick".
pub const QUICK_CUTOFF_SECONDS: i64 = 120;

/// Duration bucket for a trade. The boundary is inclusive: a trade held
/// for exactly [`QUICK_CUTOFF_SECONDS`] is still `Quick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TradeCategory {
    Quick,
    Long,
}

impl TradeCategory {
    pub fn from_duration(duration_seconds: i64) -> Self {
        if duration_seconds <= QUICK_CUTOFF_SECONDS {
            TradeCategory::Quick
        } else {
            TradeCategory::Long
        }
    }

    /// Display label, matching the column value written on export.
    pub fn label(self) -> &'static str {
        match self {
            TradeCategory::Quick => "Quick (<= 2 min)",
            TradeCategory::Long => "Long (> 2 min)",
        }
    }
}

/// A single closed trade: source columns plus fields derived at load time.
///
/// The derived fields are pure functions of the row and are never
/// recomputed after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    // ── Source columns ──
    pub open_time: NaiveDateTime,
    pub close_time: NaiveDateTime,
    pub symbol: String,
    /// Direction label from the input file, passed through unmodified.
    pub side: String,
    pub profit: f64,

    // ── Derived ──
    /// Close minus open. Negative values are retained as-is; a close time
    /// before the open time is the dataset's problem, not ours.
    pub duration_seconds: i64,
    /// Hour of the open time, 0..=23.
    pub hour_of_day: u32,
    pub category: TradeCategory,
}

impl Trade {
    pub fn new(
        open_time: NaiveDateTime,
        close_time: NaiveDateTime,
        symbol: impl Into<String>,
        side: impl Into<String>,
        profit: f64,
    ) -> Self {
        let duration_seconds = (close_time - open_time).num_seconds();
        Self {
            open_time,
            close_time,
            symbol: symbol.into(),
            side: side.into(),
            profit,
            duration_seconds,
            hour_of_day: open_time.hour(),
            category: TradeCategory::from_duration(duration_seconds),
        }
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds as f64 / 60.0
    }

    pub fn is_quick(&self) -> bool {
        self.category == TradeCategory::Quick
    }
}
