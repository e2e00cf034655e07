use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Tabs};

use crate::nav::items::{active_index, nav_items};
use crate::ui::AppState;

pub fn draw_nav_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let items = nav_items(state.auth.is_authenticated());
    let current_index = active_index(&items, state.route);

    let titles: Vec<Line> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let is_selected = i == current_index;
            let (key_style, text_style) = if is_selected {
                (theme.text_active_bold(), theme.text_editing_bold())
            } else {
                (theme.text_muted(), theme.text_muted())
            };
            // [F1] Title
            Line::from(vec![
                Span::styled("[", Style::default().fg(theme.frame)),
                Span::styled(format!("F{}", i + 1), key_style),
                Span::styled("]", Style::default().fg(theme.frame)),
                Span::raw(" "),
                Span::styled(item.title, text_style),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(current_index)
        .style(Style::default().fg(theme.fg))
        .highlight_style(theme.text_editing_bold())
        .divider(Span::styled(" │ ", Style::default().fg(theme.frame)));

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.frame));

    f.render_widget(tabs.block(block), area);
}
