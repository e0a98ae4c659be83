//! Trades panel — the full row set with source and derived columns.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::app::AppState;

const HEADERS: [&str; 8] = [
    "Open time", "Close time", "Symbol", "Side", "Profit", "Dur (s)", "Hour", "Category",
];

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let Some(view) = &app.view else {
        f.render_widget(
            Paragraph::new(Span::styled(
                "Load a CSV (press o) to see the trade table.",
                theme.muted_style(),
            )),
            area,
        );
        return;
    };

    let header = Row::new(HEADERS.iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(theme.accent)
                .bg(theme.surface)
                .add_modifier(Modifier::BOLD),
        )
    }))
    .height(1);

    let rows = view.rows.trades.iter().map(|trade| {
        Row::new([
            Cell::from(trade.open_time.format("%Y-%m-%d %H:%M:%S").to_string()),
            Cell::from(trade.close_time.format("%Y-%m-%d %H:%M:%S").to_string()),
            Cell::from(trade.symbol.clone()),
            Cell::from(trade.side.clone()),
            Cell::from(format!("{:+.2}", trade.profit))
                .style(Style::default().fg(theme.pnl_color(trade.profit))),
            Cell::from(trade.duration_seconds.to_string()),
            Cell::from(trade.hour_of_day.to_string()),
            Cell::from(trade.category.label()),
        ])
    });

    let widths = [
        Constraint::Length(19),
        Constraint::Length(19),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(5),
        Constraint::Min(16),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(
            Style::default()
                .bg(theme.surface)
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(if view.rows.is_empty() {
        None
    } else {
        Some(app.table_cursor)
    });
    f.render_stateful_widget(table, area, &mut state);
}
