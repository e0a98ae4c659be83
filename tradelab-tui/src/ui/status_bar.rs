//! Bottom status bar — key hints and the last status/error message.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let mut spans: Vec<Span> = vec![Span::styled(
        " o:Load f:Filter e:Chart x:Data t:Theme E:Errors q:Quit",
        theme.muted_style(),
    )];

    if let Some((msg, level)) = &app.status_message {
        spans.push(Span::styled(" | ", theme.muted_style()));
        let style = match level {
            StatusLevel::Info => theme.accent_style(),
            StatusLevel::Warning => Style::default().fg(theme.warning),
            StatusLevel::Error => Style::default().fg(theme.negative),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
