//! Dataset — the ordered collection of loaded trades, plus symbol filtering.

use serde::{Deserialize, Serialize};

use super::trade::Trade;

/// Symbol filter selection. `All` is the sentinel the UI shows alongside
/// the distinct symbols of the loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolFilter {
    All,
    Symbol(String),
}

impl SymbolFilter {
    pub fn label(&self) -> &str {
        match self {
            SymbolFilter::All => "All",
            SymbolFilter::Symbol(s) => s,
        }
    }

    pub fn matches(&self, symbol: &str) -> bool {
        match self {
            SymbolFilter::All => true,
            SymbolFilter::Symbol(s) => s == symbol,
        }
    }
}

impl Default for SymbolFilter {
    fn default() -> Self {
        SymbolFilter::All
    }
}

/// An ordered collection of trades sharing one schema.
///
/// Replaced wholesale on each load; narrowed (not mutated) by
/// [`Dataset::filtered`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub trades: Vec<Trade>,
}

impl Dataset {
    pub fn new(trades: Vec<Trade>) -> Self {
        Self { trades }
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Distinct symbols, sorted — the choices offered next to "All".
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.trades.iter().map(|t| t.symbol.clone()).collect();
        symbols.sort();
        symbols.dedup();
        symbols
    }

    /// Rows matching the filter, in their original order. Filtering by
    /// `All` yields a dataset equal to this one; the base is untouched
    /// either way, so re-filtering from the same base is idempotent.
    pub fn filtered(&self, filter: &SymbolFilter) -> Dataset {
        Dataset {
            trades: self
                .trades
                .iter()
                .filter(|t| filter.matches(&t.symbol))
                .cloned()
                .collect(),
        }
    }
}
