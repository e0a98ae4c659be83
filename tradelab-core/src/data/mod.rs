//! Input parsing: CSV trade logs → [`crate::domain::Dataset`].

mod loader;

pub use loader::{load_trades, LoadError, LoadReport, REQUIRED_COLUMNS};
