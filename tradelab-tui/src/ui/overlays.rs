//! Overlays — welcome screen, path prompts, error history.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{AppState, PromptKind};
use crate::ui::centered_rect;

pub fn render_welcome(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let popup = centered_rect(60, 50, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.accent_style())
        .title(" Welcome ")
        .title_style(theme.title_style())
        .style(Style::default().bg(theme.surface).fg(theme.text));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let lines = vec![
        Line::from(""),
        Line::from("Trade Duration Profit Analyzer"),
        Line::from(""),
        Line::from(Span::styled(
            "Load a CSV trade log with columns Open time, Close time,",
            theme.muted_style(),
        )),
        Line::from(Span::styled(
            "Symbol, Side, Profit. Quick trades close within 2 minutes.",
            theme.muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled("Press o to load, ? for help.", theme.accent_style())),
        Line::from(""),
        Line::from(Span::styled("(any key to dismiss)", theme.muted_style())),
    ];
    f.render_widget(Paragraph::new(lines).centered().wrap(Wrap { trim: true }), inner);
}

pub fn render_prompt(f: &mut Frame, area: Rect, app: &AppState, kind: PromptKind) {
    let theme = &app.theme;
    let popup = centered_rect(60, 24, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.accent_style())
        .title(format!(" {} ", kind.title()))
        .title_style(theme.title_style())
        .style(Style::default().bg(theme.surface).fg(theme.text));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Path: ", theme.muted_style()),
            Span::raw(app.prompt_input.as_str()),
            Span::styled("_", theme.accent_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Enter to confirm, Esc to cancel", theme.muted_style())),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let popup = centered_rect(70, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.negative))
        .title(format!(" Errors ({}) ", app.error_history.len()))
        .title_style(theme.title_style())
        .style(Style::default().bg(theme.surface).fg(theme.text));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No errors recorded.", theme.muted_style())),
            inner,
        );
        return;
    }

    let lines: Vec<Line> = app
        .error_history
        .iter()
        .skip(app.error_scroll)
        .take(inner.height as usize)
        .map(|record| {
            let mut spans = vec![
                Span::styled(
                    record.timestamp.format("%H:%M:%S ").to_string(),
                    theme.muted_style(),
                ),
                Span::styled(record.message.clone(), Style::default().fg(theme.negative)),
            ];
            if !record.context.is_empty() {
                spans.push(Span::styled(
                    format!("  ({})", record.context),
                    theme.muted_style(),
                ));
            }
            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
