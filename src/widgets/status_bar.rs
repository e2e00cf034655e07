use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::*;

use crate::ui::{AppState, ToastLevel};

fn toast_tag(level: ToastLevel) -> &'static str {
    match level {
        ToastLevel::Success => "[OK]",
        ToastLevel::Error => "[ERROR]",
        ToastLevel::Info => "[INFO]",
    }
}

/// Single footer line: pending request, toast, then key help.
pub fn draw_footer_combined(f: &mut Frame, area: Rect, state: &AppState, help_text: &str) {
    let theme = &state.theme;
    let mut spans: Vec<Span> = Vec::new();
    if let Some(msg) = &state.status_text {
        let spinner = crate::widgets::chrome::spinner(state.tick);
        spans.push(Span::styled(
            format!(" {spinner} {msg}  |  "),
            Style::default().fg(theme.accent),
        ));
    }
    if let Some(t) = &state.toast {
        let color = theme.toast_color(t.level);
        spans.push(Span::styled(
            format!("{} ", toast_tag(t.level)),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("{}  |  ", t.text),
            Style::default().fg(color),
        ));
    }
    spans.push(Span::styled(help_text.to_string(), theme.text_muted()));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
