//! Application state — single-owner, main-thread only.
//!
//! Holds the loaded dataset, the active filter and config, and the
//! derived view the panels render. Every mutating action runs one
//! synchronous recompute; rendering is a pure function of this state.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use tradelab_core::{
    export_chart, export_data, load_trades, AnalysisConfig, Dataset, Summary, SymbolFilter, Trade,
};

use crate::theme::Theme;

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Chart,
    Table,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Chart => 0,
            Panel::Table => 1,
            Panel::Help => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Chart),
            1 => Some(Panel::Table),
            2 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Chart => "Charts",
            Panel::Table => "Trades",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % 3).unwrap_or(Panel::Chart)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + 2) % 3).unwrap_or(Panel::Chart)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub message: String,
    pub context: String,
}

/// What a path prompt is collecting a path for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    LoadCsv,
    ExportChart,
    ExportData,
}

impl PromptKind {
    pub fn title(self) -> &'static str {
        match self {
            PromptKind::LoadCsv => "Load CSV",
            PromptKind::ExportChart => "Export chart (.png / .pdf)",
            PromptKind::ExportData => "Export data (.csv / .xlsx)",
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    Prompt(PromptKind),
    ErrorHistory,
}

/// The derived view every panel renders: the filtered rows and their
/// summary, recomputed together on each change.
#[derive(Debug, Clone)]
pub struct AnalysisView {
    pub rows: Dataset,
    pub summary: Summary,
}

const ERROR_HISTORY_CAP: usize = 50;
const TARGET_MAX: f64 = 1000.0;

/// Top-level application state.
pub struct AppState {
    pub active_panel: Panel,
    pub running: bool,
    pub theme: Theme,

    // Data
    pub base: Option<Dataset>,
    pub source_path: Option<PathBuf>,
    pub filter: SymbolFilter,
    pub config: AnalysisConfig,
    pub view: Option<AnalysisView>,

    // Selection
    pub table_cursor: usize,

    // Overlays and prompts
    pub overlay: Overlay,
    pub prompt_input: String,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            active_panel: Panel::Chart,
            running: true,
            theme: Theme::default(),
            base: None,
            source_path: None,
            filter: SymbolFilter::All,
            config: AnalysisConfig::default(),
            view: None,
            table_cursor: 0,
            overlay: Overlay::Welcome,
            prompt_input: String::new(),
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
        }
    }

    pub fn has_data(&self) -> bool {
        self.base.is_some()
    }

    /// Load a trade log, replacing the dataset wholesale. On failure the
    /// prior dataset (if any) is kept untouched.
    pub fn load_csv(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match load_trades(path) {
            Ok(report) => {
                let loaded = report.dataset.len();
                self.base = Some(report.dataset);
                self.source_path = Some(path.to_path_buf());
                self.filter = SymbolFilter::All;
                self.table_cursor = 0;
                self.recompute();
                if report.skipped_rows > 0 {
                    self.set_warning(format!(
                        "Loaded {loaded} trades ({} rows skipped: bad timestamps or profit)",
                        report.skipped_rows
                    ));
                } else {
                    self.set_status(format!("Loaded {loaded} trades"));
                }
            }
            Err(err) => {
                self.push_error(err.to_string(), path.display().to_string());
            }
        }
    }

    /// Recompute the derived view from (base, filter, config).
    pub fn recompute(&mut self) {
        self.view = self.base.as_ref().map(|base| {
            let rows = base.filtered(&self.filter);
            let summary = Summary::compute(&rows, &self.config);
            AnalysisView { rows, summary }
        });
        let row_count = self.view.as_ref().map_or(0, |v| v.rows.len());
        if self.table_cursor >= row_count {
            self.table_cursor = row_count.saturating_sub(1);
        }
    }

    /// The filter choices: "All" plus the dataset's distinct symbols.
    pub fn filter_choices(&self) -> Vec<SymbolFilter> {
        let mut choices = vec![SymbolFilter::All];
        if let Some(base) = &self.base {
            choices.extend(base.symbols().into_iter().map(SymbolFilter::Symbol));
        }
        choices
    }

    /// Advance to the next symbol filter (wrapping) and recompute.
    pub fn cycle_filter(&mut self) {
        if self.base.is_none() {
            self.set_warning("No data loaded — nothing to filter");
            return;
        }
        let choices = self.filter_choices();
        let current = choices.iter().position(|c| *c == self.filter).unwrap_or(0);
        self.filter = choices[(current + 1) % choices.len()].clone();
        self.table_cursor = 0;
        self.recompute();
        self.set_status(format!("Filter: {}", self.filter.label()));
    }

    /// Adjust the profit target, clamped to 0..=1000, and recompute.
    pub fn adjust_target(&mut self, delta: f64) {
        self.config.profit_target = (self.config.profit_target + delta).clamp(0.0, TARGET_MAX);
        self.recompute();
    }

    /// Swap themes. Rendering-only: the view is deliberately left as-is.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.set_status(format!("Theme: {}", self.theme.name()));
    }

    /// The trade under the table cursor, if any — drives the chart tooltip.
    pub fn selected_trade(&self) -> Option<&Trade> {
        self.view.as_ref()?.rows.trades.get(self.table_cursor)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let row_count = self.view.as_ref().map_or(0, |v| v.rows.len());
        if row_count == 0 {
            return;
        }
        let max = row_count - 1;
        self.table_cursor = self
            .table_cursor
            .saturating_add_signed(delta)
            .min(max);
    }

    /// Export the current figure. Refuses before any load; no file is
    /// written in that case.
    pub fn export_chart_to(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let Some(view) = &self.view else {
            self.push_error("No chart to export — load data first".into(), String::new());
            return;
        };
        let palette = self.theme.chart_palette();
        match export_chart(path, &view.rows, &view.summary, &self.config, &palette) {
            Ok(()) => self.set_status(format!("Chart saved to {}", path.display())),
            Err(err) => self.push_error(err.to_string(), path.display().to_string()),
        }
    }

    /// Export the current (possibly filtered) rows. Refuses before any load.
    pub fn export_data_to(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let Some(view) = &self.view else {
            self.push_error("No data to export — load data first".into(), String::new());
            return;
        };
        match export_data(path, &view.rows) {
            Ok(()) => self.set_status(format!("Data exported to {}", path.display())),
            Err(err) => self.push_error(err.to_string(), path.display().to_string()),
        }
    }

    /// Push an error to the history, capping it, and show it in the bar.
    pub fn push_error(&mut self, message: String, context: String) {
        self.error_history.push_front(ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            message: message.clone(),
            context,
        });
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn app_with_data() -> AppState {
        let day = NaiveDate::from_ymd_opt(2024, 4, 8).unwrap();
        let t = |h: u32, dur: i64, sym: &str, profit: f64| {
            let open = day.and_hms_opt(h, 0, 0).unwrap();
            Trade::new(open, open + chrono::Duration::seconds(dur), sym, "Buy", profit)
        };
        let mut app = AppState::new();
        app.base = Some(Dataset::new(vec![
            t(9, 60, "EURUSD", 10.0),
            t(13, 180, "GBPUSD", -4.0),
        ]));
        app.recompute();
        app
    }

    #[test]
    fn panel_cycle() {
        assert_eq!(Panel::Chart.next(), Panel::Table);
        assert_eq!(Panel::Help.next(), Panel::Chart);
        assert_eq!(Panel::Chart.prev(), Panel::Help);
    }

    #[test]
    fn recompute_builds_view_from_filter_and_config() {
        let mut app = app_with_data();
        assert_eq!(app.view.as_ref().unwrap().rows.len(), 2);
        assert!((app.view.as_ref().unwrap().summary.total_profit - 6.0).abs() < 1e-12);

        app.filter = SymbolFilter::Symbol("EURUSD".into());
        app.recompute();
        let view = app.view.as_ref().unwrap();
        assert_eq!(view.rows.len(), 1);
        assert!((view.summary.total_profit - 10.0).abs() < 1e-12);
        // Base is untouched.
        assert_eq!(app.base.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn cycle_filter_wraps_through_all_and_symbols() {
        let mut app = app_with_data();
        assert_eq!(app.filter, SymbolFilter::All);
        app.cycle_filter();
        assert_eq!(app.filter, SymbolFilter::Symbol("EURUSD".into()));
        app.cycle_filter();
        assert_eq!(app.filter, SymbolFilter::Symbol("GBPUSD".into()));
        app.cycle_filter();
        assert_eq!(app.filter, SymbolFilter::All);
    }

    #[test]
    fn target_adjustment_clamps_and_recomputes() {
        let mut app = app_with_data();
        app.adjust_target(1e9);
        assert_eq!(app.config.profit_target, 1000.0);
        app.adjust_target(-1e9);
        assert_eq!(app.config.profit_target, 0.0);
        // Zero target degrades to 0% rather than dividing.
        assert_eq!(app.view.as_ref().unwrap().summary.pct_quick_of_target, 0.0);
    }

    #[test]
    fn theme_toggle_does_not_touch_the_view() {
        let mut app = app_with_data();
        let before = app.view.as_ref().unwrap().summary.clone();
        app.toggle_theme();
        assert_eq!(app.view.as_ref().unwrap().summary, before);
    }

    #[test]
    fn export_before_load_is_rejected_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let mut app = AppState::new();
        app.export_chart_to(&path);
        assert!(!path.exists());
        assert!(matches!(app.status_message, Some((_, StatusLevel::Error))));

        let data_path = dir.path().join("data.csv");
        app.export_data_to(&data_path);
        assert!(!data_path.exists());
    }

    #[test]
    fn failed_load_keeps_prior_dataset() {
        let mut app = app_with_data();
        app.load_csv("/nonexistent/trades.csv");
        assert!(app.has_data());
        assert_eq!(app.base.as_ref().unwrap().len(), 2);
        assert_eq!(app.error_history.len(), 1);
    }

    #[test]
    fn load_surfaces_skipped_row_warning() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "Open time,Close time,Symbol,Side,Profit\n\
             2024-01-02 09:30:00,2024-01-02 09:31:00,EURUSD,Buy,10\n\
             garbage,2024-01-02 09:31:00,EURUSD,Buy,10\n"
        )
        .unwrap();
        let mut app = AppState::new();
        app.load_csv(file.path());
        assert_eq!(app.base.as_ref().unwrap().len(), 1);
        let (msg, level) = app.status_message.clone().unwrap();
        assert_eq!(level, StatusLevel::Warning);
        assert!(msg.contains("1 rows skipped"));
    }

    #[test]
    fn error_history_caps_at_50() {
        let mut app = AppState::new();
        for i in 0..60 {
            app.push_error(format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn cursor_moves_within_bounds_and_selects_trades() {
        let mut app = app_with_data();
        assert_eq!(app.selected_trade().unwrap().symbol, "EURUSD");
        app.move_cursor(1);
        assert_eq!(app.selected_trade().unwrap().symbol, "GBPUSD");
        app.move_cursor(5);
        assert_eq!(app.table_cursor, 1);
        app.move_cursor(-10);
        assert_eq!(app.table_cursor, 0);
    }
}
