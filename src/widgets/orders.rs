use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::model::{Ingredient, StoredOrder};
use crate::ui::AppState;
use crate::widgets::chrome::{panel_block, spinner};

fn order_text(order: &StoredOrder) -> String {
    let parts: Vec<String> = Ingredient::ALL
        .iter()
        .filter_map(|i| {
            let n = order.ingredients.get(i).copied()?;
            Some(format!("{} ({n})", i.label().to_lowercase()))
        })
        .collect();
    format!(
        "Ingredients: {}  Price: USD {:.2}",
        parts.join(" "),
        order.price
    )
}

pub fn draw_orders(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let orders = &state.orders;
    let block = panel_block("Your Orders", true, theme);
    if orders.loading {
        let p = Paragraph::new(format!("{} Loading orders...", spinner(state.tick))).block(block);
        f.render_widget(p, area);
        return;
    }
    if let Some(err) = &orders.error {
        let p = Paragraph::new(Line::from(Span::styled(err.clone(), theme.text_error())))
            .block(block);
        f.render_widget(p, area);
        return;
    }
    if orders.orders.is_empty() {
        let p = Paragraph::new(Span::styled("No orders yet.", theme.text_muted())).block(block);
        f.render_widget(p, area);
        return;
    }
    let items: Vec<ListItem> = orders
        .orders
        .iter()
        .map(|o| ListItem::new(order_text(o)))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(theme.list_cursor_style())
        .highlight_symbol("› ");
    let mut ls = ListState::default();
    ls.select(Some(orders.selected));
    f.render_stateful_widget(list, area, &mut ls);
}
