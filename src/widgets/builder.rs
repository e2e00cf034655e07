use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::model::{Ingredient, Ingredients};
use crate::theme::Theme;
use crate::ui::AppState;
use crate::widgets::chrome::{centered_rect, panel_block, spinner};

const BUN_TOP: [&str; 2] = ["  .-~~~~~~~~~~~~~-.  ", " /  .  .   .  .   \\ "];
const BUN_BOTTOM: &str = " \\_________________/ ";

fn layer(ingredient: Ingredient) -> &'static str {
    match ingredient {
        Ingredient::Salad => " ~~~~~~~~~~~~~~~~~~~ ",
        Ingredient::Bacon => " ≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈≈ ",
        Ingredient::Cheese => " ▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀▀ ",
        Ingredient::Meat => " ███████████████████ ",
    }
}

/// The stacked burger: bread, one row per ingredient unit, bread.
pub fn burger_lines(ingredients: &Ingredients, theme: &Theme) -> Vec<Line<'static>> {
    let bun = Style::default().fg(theme.bun);
    let mut lines: Vec<Line> = BUN_TOP
        .iter()
        .map(|s| Line::from(Span::styled(*s, bun)))
        .collect();
    let mut any = false;
    for i in Ingredient::ALL {
        let n = ingredients.get(&i).copied().unwrap_or(0);
        for _ in 0..n {
            any = true;
            lines.push(Line::from(Span::styled(
                layer(i),
                Style::default().fg(theme.ingredient_color(i)),
            )));
        }
    }
    if !any {
        lines.push(Line::from(Span::styled(
            "Please start adding ingredients!",
            theme.text_muted(),
        )));
    }
    lines.push(Line::from(Span::styled(BUN_BOTTOM, bun)));
    lines
}

fn control_lines(state: &AppState) -> Vec<Line<'static>> {
    let theme = &state.theme;
    let b = &state.builder;
    let mut lines = vec![
        Line::from(vec![
            Span::raw("Current Price: "),
            Span::styled(format!("{:.2}", b.total_price), theme.text_active_bold()),
        ]),
        Line::raw(""),
    ];
    for (idx, i) in Ingredient::ALL.iter().enumerate() {
        let n = b.count(*i);
        let less = if n == 0 { "   " } else { "[-]" };
        let text = format!("{less} {:<8} {n:>2} [+]", i.label());
        let style = if idx == b.selected {
            theme.list_cursor_style()
        } else {
            Style::default().fg(theme.ingredient_color(*i))
        };
        lines.push(Line::from(Span::styled(text, style)));
    }
    lines.push(Line::raw(""));
    let label = if state.auth.is_authenticated() {
        "ORDER NOW"
    } else {
        "SIGN UP TO ORDER"
    };
    let style = if b.purchasable() {
        theme.text_success().add_modifier(Modifier::BOLD)
    } else {
        theme.text_muted()
    };
    lines.push(Line::from(Span::styled(format!("[Enter] {label}"), style)));
    lines
}

/// Order summary shown before continuing to checkout.
pub fn summary_lines(ingredients: &Ingredients, price: f64) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "Your Order",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw("A delicious burger with the following ingredients:"),
    ];
    for i in Ingredient::ALL {
        let n = ingredients.get(&i).copied().unwrap_or(0);
        lines.push(Line::raw(format!("  • {}: {n}", i.label())));
    }
    lines.push(Line::from(Span::styled(
        format!("Total Price: {price:.2}"),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::raw(""));
    lines.push(Line::raw("Continue to Checkout? [y] continue  [n] cancel"));
    lines
}

pub fn draw_builder(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let Some(ingredients) = &state.builder.ingredients else {
        let block = panel_block("Burger Builder", true, theme);
        let p = if state.builder.error {
            Paragraph::new(vec![
                Line::from(Span::styled(
                    "Ingredients can't be loaded!",
                    theme.text_error(),
                )),
                Line::from(Span::styled("press r to retry", theme.text_muted())),
            ])
        } else {
            Paragraph::new(format!("{} Loading ingredients...", spinner(state.tick)))
        };
        f.render_widget(p.block(block).alignment(Alignment::Center), area);
        return;
    };

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let burger = Paragraph::new(burger_lines(ingredients, theme))
        .block(panel_block("Your Burger", false, theme))
        .alignment(Alignment::Center);
    f.render_widget(burger, cols[0]);
    let controls = Paragraph::new(control_lines(state))
        .block(panel_block("Build Controls", !state.builder.purchasing, theme));
    f.render_widget(controls, cols[1]);

    if state.builder.purchasing {
        let modal = centered_rect(70, 70, area);
        f.render_widget(Clear, modal);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_focused())
            .title("Order Summary");
        let p = Paragraph::new(summary_lines(ingredients, state.builder.total_price))
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(p, modal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn screen_text(state: &AppState, w: u16, h: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
        terminal
            .draw(|f| draw_builder(f, f.area(), state))
            .unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn empty_burger_asks_for_ingredients() {
        let lines = burger_lines(&Ingredients::new(), &Theme::default());
        assert_eq!(lines.len(), 4);
        let middle: String = lines[2].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(middle, "Please start adding ingredients!");
    }

    #[test]
    fn one_row_per_ingredient_unit() {
        let ings = Ingredients::from([(Ingredient::Meat, 2), (Ingredient::Salad, 1)]);
        let lines = burger_lines(&ings, &Theme::default());
        assert_eq!(lines.len(), BUN_TOP.len() + 3 + 1);
    }

    #[test]
    fn load_error_is_shown() {
        let mut state = AppState::default();
        state.builder.error = true;
        assert!(screen_text(&state, 60, 10).contains("Ingredients can't be loaded!"));
    }

    #[test]
    fn summary_modal_lists_price() {
        let mut state = AppState::default();
        state.builder.ingredients = Some(Ingredients::from([(Ingredient::Cheese, 1)]));
        state.builder.total_price = 4.4;
        state.builder.purchasing = true;
        let text = screen_text(&state, 100, 30);
        assert!(text.contains("Total Price: 4.40"));
        assert!(text.contains("Current Price: 4.40"));
    }
}
