use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use crate::forms::{ElementConfig, FormController, FormPhase, InputType, RenderedField};
use crate::theme::Theme;

/// Screen-specific framing around a form.
pub struct FormView<'a> {
    pub title: &'a str,
    pub submit_label: &'a str,
    /// Lines drawn above the fields, e.g. an auth error.
    pub header: Vec<Line<'a>>,
}

fn shown_value(fld: &RenderedField) -> String {
    match &fld.element {
        ElementConfig::Input {
            input_type: InputType::Password,
            ..
        } => "•".repeat(fld.value.chars().count()),
        ElementConfig::Input { .. } => fld.value.clone(),
        ElementConfig::Select { .. } => format!("‹ {} ›", fld.display_value()),
    }
}

/// One line per rendered field, in schema order.
pub fn field_lines(form: &FormController, theme: &Theme, cursor_on: bool) -> Vec<Line<'static>> {
    let editable = form.phase().accepts_input();
    form.fields()
        .iter()
        .enumerate()
        .map(|(i, fld)| {
            let is_sel = i == form.selected;
            let sel = if is_sel { '›' } else { ' ' };
            let req = if fld.should_validate { " *" } else { "" };
            let mut val = shown_value(fld);
            if is_sel && editable && cursor_on && matches!(fld.element, ElementConfig::Input { .. })
            {
                val.push('▏');
            }
            let value_style = if fld.show_invalid() {
                theme.text_error()
            } else if is_sel {
                theme.text_editing_bold()
            } else {
                Style::default().fg(theme.fg)
            };
            let label_style = if is_sel {
                theme.text_active_bold()
            } else {
                Style::default().fg(theme.fg)
            };
            let mut spans = vec![
                Span::styled(format!("{sel} {}{req}: ", fld.label()), label_style),
                Span::styled(val, value_style),
            ];
            if fld.show_invalid() {
                spans.push(Span::styled("  ✗", theme.text_error()));
            }
            Line::from(spans)
        })
        .collect()
}

pub fn draw_form(
    f: &mut Frame,
    area: Rect,
    form: &FormController,
    view: FormView,
    theme: &Theme,
    tick: u64,
) {
    let block = crate::widgets::chrome::panel_block(view.title, true, theme);
    if form.phase() == FormPhase::Submitting {
        let p = Paragraph::new(Span::styled(
            format!("{} Submitting...", crate::widgets::chrome::spinner(tick)),
            theme.text_active_bold(),
        ))
        .block(block);
        f.render_widget(p, area);
        return;
    }
    let mut lines: Vec<Line> = view.header;
    if !lines.is_empty() {
        lines.push(Line::raw(""));
    }
    lines.extend(field_lines(form, theme, tick % 4 < 2));
    lines.push(Line::raw(""));
    if let Some(msg) = &form.message {
        lines.push(Line::from(Span::styled(msg.clone(), theme.text_error())));
    }
    let button = if form.is_valid() {
        Span::styled(
            format!("[Enter] {}", view.submit_label),
            theme.text_success().add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!("[Enter] {}", view.submit_label), theme.text_muted())
    };
    lines.push(Line::from(button));
    let p = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}
