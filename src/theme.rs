use crate::model::Ingredient;
use crate::ui::ToastLevel;
use ratatui::style::{Color, Modifier, Style};

#[derive(Clone, Debug)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub frame: Color,
    pub selected: Color,
    pub success: Color,
    pub error: Color,
    pub muted: Color,
    pub bun: Color,
}

impl Theme {
    pub fn warm_dark() -> Self {
        Self {
            bg: Color::Rgb(28, 24, 22),
            fg: Color::Rgb(240, 232, 220),
            accent: Color::Rgb(255, 170, 60),
            frame: Color::Rgb(95, 85, 80),
            selected: Color::Rgb(255, 120, 0),
            success: Color::Rgb(90, 200, 90),
            error: Color::Rgb(230, 70, 60),
            muted: Color::DarkGray,
            bun: Color::Rgb(200, 130, 60),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::warm_dark()
    }
}

impl Theme {
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.selected)
    }

    pub fn border_unfocused(&self) -> Style {
        Style::default().fg(self.frame)
    }

    pub fn text_active_bold(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_editing_bold(&self) -> Style {
        Style::default()
            .fg(self.selected)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn text_error(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn text_success(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn list_cursor_style(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.selected)
            .add_modifier(Modifier::BOLD)
    }

    pub fn toast_color(&self, level: ToastLevel) -> Color {
        match level {
            ToastLevel::Success => self.success,
            ToastLevel::Error => self.error,
            ToastLevel::Info => self.accent,
        }
    }

    pub fn ingredient_color(&self, ingredient: Ingredient) -> Color {
        match ingredient {
            Ingredient::Salad => Color::Rgb(110, 190, 60),
            Ingredient::Bacon => Color::Rgb(190, 60, 50),
            Ingredient::Cheese => Color::Rgb(245, 200, 40),
            Ingredient::Meat => Color::Rgb(120, 70, 40),
        }
    }
}
