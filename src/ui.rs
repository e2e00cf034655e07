use crate::app::state::{AuthScreen, AuthState, BuilderState, OrdersState, Route};
use crate::app::{update, AppMsg, Effect};
use crate::forms::{FormController, FormInput};
use crate::model::{validate_app_config, AppConfig};
use crate::nav::items::route_for_function_key;
use crate::services::api::{Backend, HttpBackend};
use crate::services::loader;
use crate::widgets::builder::{burger_lines, draw_builder};
use crate::widgets::chrome::panel_block;
use crate::widgets::form::{draw_form, FormView};
use crate::widgets::header::draw_header;
use crate::widgets::nav_bar::draw_nav_bar;
use crate::widgets::orders::draw_orders;
use crate::widgets::status_bar::draw_footer_combined;
use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const TICK_RATE: Duration = Duration::from_millis(200);
const TICKS_PER_SECOND: u64 = 5;

#[derive(Default)]
pub(crate) struct AppState {
    pub(crate) config: AppConfig,
    pub(crate) route: Route,
    pub(crate) tick: u64,
    pub(crate) builder: BuilderState,
    pub(crate) auth: AuthState,
    pub(crate) orders: OrdersState,
    // Mounted screens; None while the screen is not shown
    pub(crate) auth_screen: Option<AuthScreen>,
    pub(crate) checkout: Option<FormController>,
    // Pending request shown with a spinner in the footer
    pub(crate) status_text: Option<String>,
    pub(crate) toast: Option<Toast>,
    pub(crate) theme: crate::theme::Theme,
    pub(crate) should_quit: bool,
    tx: Option<Sender<AppMsg>>,
    rx: Option<Receiver<AppMsg>>,
    backend: Option<Arc<dyn Backend>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

pub struct Toast {
    pub text: String,
    pub level: ToastLevel,
    pub expires_at_tick: u64,
}

impl AppState {
    fn new(config: AppConfig, backend: Arc<dyn Backend>) -> Self {
        let (tx, rx) = mpsc::channel::<AppMsg>();
        Self {
            config,
            tx: Some(tx),
            rx: Some(rx),
            backend: Some(backend),
            ..Default::default()
        }
    }

    fn worker(&self) -> Option<(Arc<dyn Backend>, Sender<AppMsg>)> {
        Some((self.backend.clone()?, self.tx.clone()?))
    }

    /// Feed a message through the reducer and execute what it asks for.
    fn dispatch(&mut self, msg: AppMsg) {
        let effects = update(self, msg);
        run_effects(self, effects);
    }

    /// Pump results posted by loader threads.
    fn drain(&mut self) {
        let mut drained: Vec<AppMsg> = Vec::new();
        if let Some(rx) = &self.rx {
            while let Ok(msg) = rx.try_recv() {
                drained.push(msg);
            }
        }
        for msg in drained {
            self.dispatch(msg);
        }
    }

    fn advance_tick(&mut self, now: Instant) {
        self.tick = self.tick.wrapping_add(1);
        self.dispatch(AppMsg::Tick(now));
    }
}

fn run_effects(state: &mut AppState, effects: Vec<Effect>) {
    for eff in effects {
        if let Effect::ShowToast {
            text,
            level,
            seconds,
        } = eff
        {
            state.toast = Some(Toast {
                text,
                level,
                expires_at_tick: state.tick + seconds * TICKS_PER_SECOND,
            });
            continue;
        }
        let Some((backend, tx)) = state.worker() else {
            warn!("no backend attached, dropping request");
            continue;
        };
        match eff {
            Effect::FetchIngredients => {
                debug!("fetch ingredients");
                loader::spawn_fetch_ingredients(backend, tx);
            }
            Effect::Authenticate {
                email,
                password,
                sign_up,
            } => {
                debug!(sign_up, "authenticate");
                loader::spawn_authenticate(backend, email, password, sign_up, tx);
            }
            Effect::PlaceOrder { order, token } => {
                debug!(price = order.price, "place order");
                loader::spawn_place_order(backend, order, token, tx);
            }
            Effect::FetchOrders { token, user_id } => {
                debug!(%user_id, "fetch orders");
                loader::spawn_fetch_orders(backend, token, user_id, tx);
            }
            Effect::ShowToast { .. } => {}
        }
    }
}

#[derive(Debug)]
pub(crate) enum KeyAction {
    Quit,
    Msg(AppMsg),
}

fn form_input(key: KeyEvent) -> Option<FormInput> {
    Some(match key.code {
        KeyCode::Char(c) => FormInput::Char(c),
        KeyCode::Backspace => FormInput::Backspace,
        KeyCode::Tab | KeyCode::Down => FormInput::Next,
        KeyCode::BackTab | KeyCode::Up => FormInput::Prev,
        KeyCode::Left => FormInput::Cycle(-1),
        KeyCode::Right => FormInput::Cycle(1),
        _ => return None,
    })
}

/// Translate a key press into a reducer message for the current screen.
pub(crate) fn map_key(state: &AppState, key: KeyEvent) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return Some(KeyAction::Quit),
        KeyCode::F(n) => {
            let route = route_for_function_key(state.auth.is_authenticated(), n)?;
            return Some(KeyAction::Msg(AppMsg::Navigate(route)));
        }
        _ => {}
    }
    let msg = match state.route {
        Route::Builder if state.builder.purchasing => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => AppMsg::PurchaseContinue,
            KeyCode::Char('n') | KeyCode::Esc => AppMsg::PurchaseCancel,
            _ => return None,
        },
        Route::Builder => {
            let selected = state.builder.selected_ingredient();
            match key.code {
                KeyCode::Char('q') => return Some(KeyAction::Quit),
                KeyCode::Up | KeyCode::Char('k') => AppMsg::MoveIngredientCursor(-1),
                KeyCode::Down | KeyCode::Char('j') => AppMsg::MoveIngredientCursor(1),
                KeyCode::Right | KeyCode::Char('+') => AppMsg::AddIngredient(selected),
                KeyCode::Left | KeyCode::Char('-') => AppMsg::RemoveIngredient(selected),
                KeyCode::Enter => AppMsg::OrderNow,
                KeyCode::Char('r') if state.builder.error => AppMsg::InitIngredients,
                _ => return None,
            }
        }
        Route::Auth => match key.code {
            KeyCode::Char('t') if ctrl => AppMsg::SwitchAuthMode,
            KeyCode::Enter => AppMsg::AuthSubmit,
            KeyCode::Esc => AppMsg::Navigate(Route::Builder),
            _ => AppMsg::AuthInput(form_input(key)?),
        },
        Route::Checkout => match key.code {
            KeyCode::Enter => AppMsg::ContactSubmit,
            KeyCode::Esc => AppMsg::CheckoutCancelled,
            _ => AppMsg::ContactInput(form_input(key)?),
        },
        Route::Orders => match key.code {
            KeyCode::Char('q') => return Some(KeyAction::Quit),
            KeyCode::Char('r') => AppMsg::FetchOrders,
            KeyCode::Up | KeyCode::Char('k') => AppMsg::MoveOrderCursor(-1),
            KeyCode::Down | KeyCode::Char('j') => AppMsg::MoveOrderCursor(1),
            KeyCode::Esc => AppMsg::Navigate(Route::Builder),
            _ => return None,
        },
        Route::Logout => return None,
    };
    Some(KeyAction::Msg(msg))
}

fn handle_key(state: &mut AppState, key: KeyEvent) {
    match map_key(state, key) {
        Some(KeyAction::Quit) => state.should_quit = true,
        Some(KeyAction::Msg(msg)) => state.dispatch(msg),
        None => {}
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes"))
        .unwrap_or(false)
}

pub fn run(config: AppConfig) -> Result<()> {
    let backend = HttpBackend::new(&config).context("building HTTP client")?;
    info!(api = %config.api_base_url, "starting burger-tui");
    let mut state = AppState::new(config, Arc::new(backend));
    state.dispatch(AppMsg::InitIngredients);

    // Headless smoke mode
    if env_flag("BURGER_TUI_HEADLESS") {
        let ticks: u64 = std::env::var("BURGER_TUI_TICKS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10);
        let summary = run_headless(&mut state, ticks)?;
        println!("{summary}");
        return Ok(());
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    let res = event_loop(&mut terminal, &mut state);
    // Restore
    disable_raw_mode()?;
    execute!(std::io::stdout(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("bye");
    res
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
) -> Result<()> {
    let mut last_tick = Instant::now();
    while !state.should_quit {
        terminal.draw(|f| ui(f, state))?;
        let timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(state, key);
                }
            }
        }
        state.drain();
        if last_tick.elapsed() >= TICK_RATE {
            state.advance_tick(Instant::now());
            last_tick = Instant::now();
        }
    }
    Ok(())
}

fn run_headless(state: &mut AppState, ticks: u64) -> Result<serde_json::Value> {
    let mut terminal = Terminal::new(ratatui::backend::TestBackend::new(80, 24))?;
    for _ in 0..ticks {
        terminal.draw(|f| ui(f, state))?;
        state.drain();
        state.advance_tick(Instant::now());
        std::thread::sleep(TICK_RATE);
    }
    Ok(smoke_summary(state))
}

fn smoke_summary(state: &AppState) -> serde_json::Value {
    serde_json::json!({
        "ok": !state.builder.error,
        "route": state.route.path(),
        "ingredients_loaded": state.builder.ingredients.is_some(),
        "total_price": state.builder.total_price,
        "authenticated": state.auth.is_authenticated(),
        "toast": state.toast.as_ref().map(|t| t.text.clone()),
    })
}

pub fn load_config() -> Result<AppConfig> {
    let mut cfg = match config_path() {
        Some(p) => {
            let s = fs::read_to_string(&p).with_context(|| format!("reading {p:?}"))?;
            serde_yaml::from_str::<AppConfig>(&s).with_context(|| format!("parsing {p:?}"))?
        }
        None => AppConfig::default(),
    };
    if let Ok(url) = std::env::var("BURGER_TUI_API_URL") {
        cfg.api_base_url = url;
    }
    if let Ok(key) = std::env::var("BURGER_TUI_API_KEY") {
        cfg.api_key = key;
    }
    validate_app_config(&cfg).map_err(|e| anyhow!("invalid config: {e}"))?;
    Ok(cfg)
}

/// `BURGER_TUI_CONFIG`, then `./burger.yaml`, `./.burger/burger.yaml` and
/// `~/.burger/burger.yaml`.
fn config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("BURGER_TUI_CONFIG") {
        return Some(PathBuf::from(p));
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut candidates = vec![
        cwd.join("burger.yaml"),
        cwd.join(".burger").join("burger.yaml"),
    ];
    if let Some(home) = std::env::var("HOME")
        .ok()
        .or_else(|| std::env::var("USERPROFILE").ok())
        .map(PathBuf::from)
    {
        candidates.push(home.join(".burger").join("burger.yaml"));
    }
    candidates.into_iter().find(|p| p.exists())
}

fn help_text(state: &AppState) -> &'static str {
    match state.route {
        Route::Builder if state.builder.purchasing => "y continue  n cancel",
        Route::Builder => "↑/↓ select  ←/→ less/more  Enter order  F1-F3 nav  q quit",
        Route::Auth => "Tab next field  Enter submit  Ctrl+T switch mode  Esc back",
        Route::Checkout => "Tab next field  ←/→ delivery  Enter order  Esc cancel",
        Route::Orders => "↑/↓ select  r refresh  Esc back  q quit",
        Route::Logout => "",
    }
}

fn ui(f: &mut Frame, state: &mut AppState) {
    // Clear expired toast
    if let Some(t) = &state.toast {
        if state.tick >= t.expires_at_tick {
            state.toast = None;
        }
    }

    let screen = f.area();
    let bg = Block::default().style(Style::default().bg(state.theme.bg));
    f.render_widget(bg, screen);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(screen);

    draw_header(f, chunks[0], state);
    draw_nav_bar(f, chunks[1], state);
    match state.route {
        Route::Builder | Route::Logout => draw_builder(f, chunks[2], state),
        Route::Auth => draw_auth(f, chunks[2], state),
        Route::Checkout => draw_checkout(f, chunks[2], state),
        Route::Orders => draw_orders(f, chunks[2], state),
    }
    draw_footer_combined(f, chunks[3], state, help_text(state));
}

fn draw_auth(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(screen) = &state.auth_screen else {
        return;
    };
    let theme = &state.theme;
    let mut header = Vec::new();
    if let Some(err) = &state.auth.error {
        header.push(Line::from(Span::styled(err.clone(), theme.text_error())));
    }
    let switch = if screen.is_sign_up {
        "Ctrl+T: switch to SIGNIN"
    } else {
        "Ctrl+T: switch to SIGNUP"
    };
    header.push(Line::from(Span::styled(switch, theme.text_muted())));
    let view = FormView {
        title: if screen.is_sign_up { "Sign up" } else { "Sign in" },
        submit_label: "SUBMIT",
        header,
    };
    let area = crate::widgets::chrome::centered_rect(70, 100, area);
    draw_form(f, area, &screen.form, view, theme, state.tick);
}

fn draw_checkout(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(form) = &state.checkout else {
        return;
    };
    let theme = &state.theme;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);
    let mut lines = vec![
        Line::from(Span::styled(
            "We hope it tastes well!",
            theme.text_active_bold(),
        )),
        Line::raw(""),
    ];
    if let Some(ings) = &state.builder.ingredients {
        lines.extend(burger_lines(ings, theme));
    }
    let summary = Paragraph::new(lines)
        .block(panel_block("Checkout", false, theme))
        .alignment(Alignment::Center);
    f.render_widget(summary, cols[0]);
    let view = FormView {
        title: "Enter your Contact Data",
        submit_label: "ORDER",
        header: Vec::new(),
    };
    draw_form(f, cols[1], form, view, theme, state.tick);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Ingredient, Ingredients};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn msg(action: Option<KeyAction>) -> AppMsg {
        match action {
            Some(KeyAction::Msg(m)) => m,
            other => panic!("expected message, got {other:?}"),
        }
    }

    fn loaded() -> AppState {
        let mut st = AppState::default();
        st.dispatch(AppMsg::SetIngredients(Ingredients::new()));
        st
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let mut st = loaded();
        st.route = Route::Checkout;
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(map_key(&st, key), Some(KeyAction::Quit)));
    }

    #[test]
    fn builder_keys_target_selected_ingredient() {
        let mut st = loaded();
        handle_key(&mut st, press(KeyCode::Down));
        handle_key(&mut st, press(KeyCode::Right));
        handle_key(&mut st, press(KeyCode::Right));
        assert_eq!(st.builder.count(Ingredient::Bacon), 2);
        handle_key(&mut st, press(KeyCode::Left));
        assert_eq!(st.builder.count(Ingredient::Bacon), 1);
        assert!(st.builder.building);
    }

    #[test]
    fn function_keys_follow_nav_items() {
        let st = loaded();
        assert!(matches!(
            msg(map_key(&st, press(KeyCode::F(2)))),
            AppMsg::Navigate(Route::Auth)
        ));
        assert!(map_key(&st, press(KeyCode::F(3))).is_none());
    }

    #[test]
    fn typing_on_auth_screen_edits_form() {
        let mut st = loaded();
        st.dispatch(AppMsg::Navigate(Route::Auth));
        for c in "ada@example.com".chars() {
            handle_key(&mut st, press(KeyCode::Char(c)));
        }
        let screen = st.auth_screen.as_ref().unwrap();
        assert_eq!(screen.form.value("email"), Some("ada@example.com"));
        let ctrl_t = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL);
        handle_key(&mut st, ctrl_t);
        assert!(!st.auth_screen.as_ref().unwrap().is_sign_up);
    }

    #[test]
    fn screen_keys_are_held_while_sign_in_pending() {
        let mut st = loaded();
        st.dispatch(AppMsg::Navigate(Route::Auth));
        for code in "ada@example.com\tsecret1".chars().map(|c| match c {
            '\t' => KeyCode::Tab,
            c => KeyCode::Char(c),
        }) {
            handle_key(&mut st, press(code));
        }
        handle_key(&mut st, press(KeyCode::Enter));
        assert!(st.auth.loading);
        handle_key(&mut st, press(KeyCode::F(1)));
        handle_key(&mut st, press(KeyCode::Esc));
        assert_eq!(st.route, Route::Auth);
        let screen = st.auth_screen.as_ref().unwrap();
        assert_eq!(screen.form.value("email"), Some("ada@example.com"));
    }

    #[test]
    fn toast_effect_expires_after_its_ticks() {
        let mut st = AppState::default();
        run_effects(
            &mut st,
            vec![Effect::ShowToast {
                text: "hi".into(),
                level: ToastLevel::Info,
                seconds: 1,
            }],
        );
        assert_eq!(st.toast.as_ref().unwrap().expires_at_tick, TICKS_PER_SECOND);
        st.tick = TICKS_PER_SECOND;
        let mut terminal = Terminal::new(ratatui::backend::TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| ui(f, &mut st)).unwrap();
        assert!(st.toast.is_none());
    }

    #[test]
    fn requests_without_backend_are_dropped() {
        let mut st = AppState::default();
        st.dispatch(AppMsg::InitIngredients);
        assert!(st.builder.ingredients.is_none());
    }

    #[test]
    fn every_screen_draws() {
        let mut st = loaded();
        let mut terminal = Terminal::new(ratatui::backend::TestBackend::new(80, 24)).unwrap();
        for route in [Route::Builder, Route::Auth, Route::Orders] {
            st.dispatch(AppMsg::Navigate(route));
            terminal.draw(|f| ui(f, &mut st)).unwrap();
        }
        let summary = smoke_summary(&st);
        assert_eq!(summary["route"], "/auth");
        assert_eq!(summary["ingredients_loaded"], true);
    }
}
