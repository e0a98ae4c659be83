//! Help panel — keyboard reference.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {k:<12}"), theme.accent_style()),
            Span::styled(desc, theme.muted_style()),
        ])
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Navigation", theme.title_style())),
        key("1 / 2 / 3", "Charts, Trades, Help panels"),
        key("Tab", "next panel (Shift-Tab previous)"),
        key("j / k", "select trade (drives the scatter tooltip)"),
        key("g / G", "first / last trade"),
        Line::from(""),
        Line::from(Span::styled("  Data", theme.title_style())),
        key("o", "load CSV trade log"),
        key("f", "cycle symbol filter (All + loaded symbols)"),
        key("<- / ->", "profit target -/+10 (Shift: -/+1), 0-1000"),
        Line::from(""),
        Line::from(Span::styled("  Output", theme.title_style())),
        key("e", "export chart (.png raster, .pdf document)"),
        key("x", "export data (.xlsx spreadsheet, otherwise CSV)"),
        Line::from(""),
        Line::from(Span::styled("  Misc", theme.title_style())),
        key("t", "toggle Nordic / Light theme"),
        key("E", "error history"),
        key("q", "quit"),
    ];

    f.render_widget(Paragraph::new(lines), area);
}
