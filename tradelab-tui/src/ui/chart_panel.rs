//! Charts panel — category bars, duration/profit scatter, hour strip.
//!
//! The scatter highlights the trade under the table cursor and a tooltip
//! strip below shows that trade's fields.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset as ChartDataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::app::{AnalysisView, AppState};
use crate::theme::Theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(view) = &app.view else {
        render_empty(f, area, app);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(4)])
        .split(area);
    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(rows[0]);

    render_category_bars(f, charts[0], app, view);
    render_scatter(f, charts[1], app, view);
    render_hour_strip(f, charts[2], app, view);
    render_tooltip(f, rows[1], app);
}

fn render_empty(f: &mut Frame, area: Rect, app: &AppState) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Load a CSV (press o) to see the charts.",
            app.theme.muted_style(),
        )),
    ];
    f.render_widget(Paragraph::new(lines).centered(), area);
}

/// Horizontal text bars, one per category, plus the two threshold marks.
fn render_category_bars(f: &mut Frame, area: Rect, app: &AppState, view: &AnalysisView) {
    let theme = &app.theme;
    let summary = &view.summary;
    let block = titled_block(theme, " Profit by Duration ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let scale = summary
        .profit_by_category
        .values()
        .map(|v| v.abs())
        .fold(0.0f64, f64::max)
        .max(1e-9);
    let bar_width = inner.width.saturating_sub(14).max(4) as f64;

    let mut lines = Vec::new();
    for (category, &profit) in &summary.profit_by_category {
        lines.push(Line::from(Span::styled(
            category.label().to_string(),
            Style::default().fg(theme.text),
        )));
        let cells = ((profit.abs() / scale) * bar_width).round() as usize;
        lines.push(Line::from(vec![
            Span::styled(
                "\u{2588}".repeat(cells.max(1)),
                Style::default().fg(theme.pnl_color(profit)),
            ),
            Span::styled(format!(" {profit:.2}"), theme.muted_style()),
        ]));
    }
    lines.push(Line::from(""));
    let pct = app.config.threshold * 100.0;
    lines.push(Line::from(Span::styled(
        format!(
            "{pct:.0}% of current: {:.2}",
            summary.total_profit * app.config.threshold
        ),
        theme.accent_style(),
    )));
    lines.push(Line::from(Span::styled(
        format!(
            "{pct:.0}% of target:  {:.2}",
            app.config.profit_target * app.config.threshold
        ),
        Style::default().fg(theme.warning),
    )));

    f.render_widget(Paragraph::new(lines), inner);
}

fn render_scatter(f: &mut Frame, area: Rect, app: &AppState, view: &AnalysisView) {
    let theme = &app.theme;
    let block = titled_block(theme, " Profit vs Duration ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if view.rows.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("no rows after filter", theme.muted_style())),
            inner,
        );
        return;
    }

    let points: Vec<(f64, f64)> = view
        .rows
        .trades
        .iter()
        .map(|t| (t.duration_minutes(), t.profit))
        .collect();
    let selected: Vec<(f64, f64)> = app
        .selected_trade()
        .map(|t| vec![(t.duration_minutes(), t.profit)])
        .unwrap_or_default();

    let (x_min, x_max) = bounds(points.iter().map(|p| p.0));
    let (y_min, y_max) = bounds(points.iter().map(|p| p.1).chain([0.0]));
    let zero_line = [(x_min, 0.0), (x_max, 0.0)];

    let datasets = vec![
        ChartDataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.muted_style())
            .data(&zero_line),
        ChartDataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(theme.positive))
            .data(&points),
        ChartDataset::default()
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
            .data(&selected),
    ];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled("min", theme.muted_style()))
                .style(theme.muted_style())
                .bounds([x_min, x_max])
                .labels(vec![
                    Span::styled(format!("{x_min:.1}"), theme.muted_style()),
                    Span::styled(format!("{x_max:.1}"), theme.muted_style()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("profit", theme.muted_style()))
                .style(theme.muted_style())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.0}"), theme.muted_style()),
                    Span::styled("0", theme.muted_style()),
                    Span::styled(format!("{y_max:.0}"), theme.muted_style()),
                ]),
        );

    f.render_widget(chart, inner);
}

/// 24-cell heat strip, one cell per hour, shaded by summed profit.
fn render_hour_strip(f: &mut Frame, area: Rect, app: &AppState, view: &AnalysisView) {
    let theme = &app.theme;
    let block = titled_block(theme, " Profit by Hour of Day ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let values = &view.summary.profit_by_hour;
    let low = values.iter().copied().fold(f64::INFINITY, f64::min);
    let high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut cells = Vec::with_capacity(24);
    for &v in values.iter() {
        let t = if high > low { (v - low) / (high - low) } else { 0.5 };
        cells.push(Span::styled(
            "\u{2588}\u{2588}",
            Style::default().fg(heat_color(t)),
        ));
    }

    let ruler = Line::from(Span::styled(
        "0     4     8     12    16    20    23",
        theme.muted_style(),
    ));
    let legend = Line::from(Span::styled(
        format!("min {low:.2}   max {high:.2}"),
        theme.muted_style(),
    ));

    let lines = vec![Line::from(""), Line::from(cells), ruler, Line::from(""), legend];
    f.render_widget(Paragraph::new(lines), inner);
}

/// Tooltip fields for the selected trade: profit, duration, symbol,
/// side, open time.
fn render_tooltip(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let block = titled_block(theme, " Selected trade (j/k) ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(trade) = app.selected_trade() else {
        f.render_widget(
            Paragraph::new(Span::styled("no selection", theme.muted_style())),
            inner,
        );
        return;
    };

    let line = Line::from(vec![
        Span::raw("Profit: "),
        Span::styled(
            format!("{:.2}", trade.profit),
            Style::default().fg(theme.pnl_color(trade.profit)),
        ),
        Span::raw(format!(
            "   Duration: {:.2} min   Symbol: {}   Side: {}   Time: {}",
            trade.duration_minutes(),
            trade.symbol,
            trade.side,
            trade.open_time.format("%Y-%m-%d %H:%M:%S")
        )),
    ]);
    f.render_widget(Paragraph::new(vec![Line::from(""), line]), inner);
}

fn titled_block<'a>(theme: &Theme, title: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.muted_style())
        .title(title)
        .title_style(theme.title_style())
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return (-1.0, 1.0);
    }
    let pad = ((max - min).abs() * 0.08).max(0.5);
    (min - pad, max + pad)
}

/// Yellow-green-blue ramp, same stops as the exported figure's strip.
fn heat_color(t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8, f: f64| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
    if t < 0.5 {
        let f = t * 2.0;
        Color::Rgb(
            lerp(0xFF, 0x41, f),
            lerp(0xFF, 0xB6, f),
            lerp(0xD9, 0xC4, f),
        )
    } else {
        let f = (t - 0.5) * 2.0;
        Color::Rgb(
            lerp(0x41, 0x22, f),
            lerp(0xB6, 0x5E, f),
            lerp(0xC4, 0xA8, f),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_pad_and_handle_empty() {
        let (lo, hi) = bounds([1.0, 3.0].into_iter());
        assert!(lo < 1.0 && hi > 3.0);
        let (lo, hi) = bounds(std::iter::empty());
        assert_eq!((lo, hi), (-1.0, 1.0));
    }

    #[test]
    fn heat_color_is_monotone_ramp_at_endpoints() {
        assert_eq!(heat_color(0.0), Color::Rgb(0xFF, 0xFF, 0xD9));
        assert_eq!(heat_color(1.0), Color::Rgb(0x22, 0x5E, 0xA8));
    }
}
