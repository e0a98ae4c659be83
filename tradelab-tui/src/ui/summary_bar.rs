//! Stats header — the analyzer's summary block plus the active controls.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::AppState;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.muted_style())
        .title(" Trade Duration Profit Analyzer ")
        .title_style(theme.title_style());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(view) = &app.view else {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No data loaded. Press o to load a CSV trade log.",
                theme.muted_style(),
            )),
        ];
        f.render_widget(Paragraph::new(lines), inner);
        return;
    };
    let summary = &view.summary;

    let avg = summary
        .avg_duration_minutes
        .map(|m| format!("{m:.2} min"))
        .unwrap_or_else(|| "n/a".into());

    let verdict = if summary.threshold_exceeded {
        Span::styled(
            format!(
                "! Quick profit exceeds the {:.0}% threshold",
                app.config.threshold * 100.0
            ),
            theme.base().fg(theme.warning).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            format!("Within the {:.0}% threshold", app.config.threshold * 100.0),
            theme.base().fg(theme.positive),
        )
    };

    let lines = vec![
        Line::from(vec![
            Span::raw("Total profit: "),
            Span::styled(
                format!("{:.2}", summary.total_profit),
                theme.base().fg(theme.pnl_color(summary.total_profit)),
            ),
            Span::raw("    Quick profit (<=2 min): "),
            Span::styled(
                format!("{:.2}", summary.quick_profit),
                theme.base().fg(theme.pnl_color(summary.quick_profit)),
            ),
            Span::styled(
                format!(
                    " ({:.1}% curr, {:.1}% targ)",
                    summary.pct_quick_of_current, summary.pct_quick_of_target
                ),
                theme.muted_style(),
            ),
        ]),
        Line::from(vec![
            Span::raw(format!("Avg trade duration: {avg}    ")),
            verdict,
        ]),
        Line::from(vec![
            Span::styled("Filter: ", theme.muted_style()),
            Span::styled(app.filter.label().to_string(), theme.accent_style()),
            Span::styled(
                format!("    Target: {:.0} (0-1000, <-/->)", app.config.profit_target),
                theme.muted_style(),
            ),
            Span::styled(
                format!("    Theme: {}    {} trades", theme.name(), view.rows.len()),
                theme.muted_style(),
            ),
        ]),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}
