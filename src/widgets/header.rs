use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ui::AppState;

const LOGO: &str = "=( BURGER BUILDER )=";

/// Top banner: centered logo, session state on the right.
pub fn draw_header(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let border = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(if state.status_text.is_some() {
            theme.accent
        } else {
            theme.muted
        }));
    let inner = border.inner(area);
    f.render_widget(border, area);
    if inner.height == 0 {
        return;
    }
    let row = Rect {
        y: inner.y + inner.height.saturating_sub(1) / 2,
        height: 1,
        ..inner
    };
    let logo = Paragraph::new(Line::from(Span::styled(
        LOGO,
        Style::default()
            .fg(theme.bun)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(logo, row);

    let session = match &state.auth.user_id {
        Some(_) if state.auth.is_authenticated() => {
            Span::styled("signed in ", theme.text_success())
        }
        _ => Span::styled("guest ", theme.text_muted()),
    };
    f.render_widget(
        Paragraph::new(Line::from(session)).alignment(Alignment::Right),
        row,
    );
}
