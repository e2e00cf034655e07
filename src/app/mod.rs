pub mod screens;
pub mod state;

use crate::forms::{FormError, FormInput};
use crate::model::{Ingredient, Ingredients, Order, StoredOrder};
use crate::services::api::AuthGrant;
use crate::ui::{AppState, ToastLevel};
use screens::{AuthContext, CheckoutContext};
use state::{AuthScreen, Route};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone)]
pub enum AppMsg {
    Navigate(Route),
    Tick(Instant),
    // Burger builder
    InitIngredients,
    SetIngredients(Ingredients),
    FetchIngredientsFailed(String),
    AddIngredient(Ingredient),
    RemoveIngredient(Ingredient),
    MoveIngredientCursor(i32),
    OrderNow,
    PurchaseCancel,
    PurchaseContinue,
    // Auth
    AuthInput(FormInput),
    AuthSubmit,
    SwitchAuthMode,
    AuthSuccess(AuthGrant),
    AuthFail(String),
    Logout,
    SetAuthRedirectPath(Route),
    // Checkout
    ContactInput(FormInput),
    ContactSubmit,
    CheckoutCancelled,
    PurchaseBurgerSuccess { id: String },
    PurchaseBurgerFail(String),
    // Orders
    FetchOrders,
    FetchOrdersSuccess(Vec<StoredOrder>),
    FetchOrdersFail(String),
    MoveOrderCursor(i32),
}

#[derive(Debug, Clone)]
pub enum Effect {
    FetchIngredients,
    Authenticate {
        email: String,
        password: String,
        sign_up: bool,
    },
    PlaceOrder {
        order: Order,
        token: Option<String>,
    },
    FetchOrders {
        token: String,
        user_id: String,
    },
    ShowToast {
        text: String,
        level: ToastLevel,
        seconds: u64,
    },
}

pub fn update(state: &mut AppState, msg: AppMsg) -> Vec<Effect> {
    use AppMsg::*;
    let mut effects: Vec<Effect> = Vec::new();
    match msg {
        Navigate(route) => navigate(state, route, &mut effects),
        Tick(now) => {
            if state.auth.expires_at.is_some_and(|at| now >= at) {
                info!("session expired");
                effects.extend(update(state, Logout));
                effects.push(Effect::ShowToast {
                    text: "Session expired, please sign in again".into(),
                    level: ToastLevel::Info,
                    seconds: 4,
                });
            }
        }
        InitIngredients => {
            state.builder.error = false;
            effects.push(Effect::FetchIngredients);
        }
        SetIngredients(mut ings) => {
            for i in Ingredient::ALL {
                ings.entry(i).or_insert(0);
            }
            state.builder.ingredients = Some(ings);
            state.builder.error = false;
            state.builder.building = false;
            recompute_price(state);
        }
        FetchIngredientsFailed(err) => {
            error!(%err, "fetching ingredients failed");
            state.builder.error = true;
        }
        AddIngredient(i) => {
            if let Some(ings) = &mut state.builder.ingredients {
                *ings.entry(i).or_insert(0) += 1;
                state.builder.building = true;
                recompute_price(state);
            }
        }
        RemoveIngredient(i) => {
            if let Some(ings) = &mut state.builder.ingredients {
                if let Some(n) = ings.get_mut(&i) {
                    if *n > 0 {
                        *n -= 1;
                        state.builder.building = true;
                        recompute_price(state);
                    }
                }
            }
        }
        MoveIngredientCursor(dir) => {
            let n = Ingredient::ALL.len() as i32;
            state.builder.selected = (state.builder.selected as i32 + dir).rem_euclid(n) as usize;
        }
        OrderNow => {
            if !state.builder.purchasable() {
                return effects;
            }
            if state.auth.is_authenticated() {
                state.builder.purchasing = true;
            } else {
                state.auth.redirect_path = Route::Checkout;
                navigate(state, Route::Auth, &mut effects);
            }
        }
        PurchaseCancel => state.builder.purchasing = false,
        PurchaseContinue => {
            state.builder.purchasing = false;
            navigate(state, Route::Checkout, &mut effects);
        }
        AuthInput(input) => {
            if let Some(screen) = &mut state.auth_screen {
                log_form_error(screen.form.input(input));
            }
        }
        SwitchAuthMode => {
            if let Some(screen) = &mut state.auth_screen {
                screen.is_sign_up = !screen.is_sign_up;
            }
        }
        AuthSubmit => {
            let ctx = AuthContext::from_state(state);
            if let Some(screen) = &mut state.auth_screen {
                match screens::submit_auth(screen, &ctx) {
                    Ok(eff) => {
                        state.auth.loading = true;
                        state.auth.error = None;
                        effects.push(eff);
                    }
                    Err(e) => debug!(%e, "auth submit refused"),
                }
            }
        }
        AuthSuccess(grant) => {
            info!(user_id = %grant.user_id, "authenticated");
            state.auth.token = Some(grant.token);
            state.auth.user_id = Some(grant.user_id);
            state.auth.expires_at =
                Some(Instant::now() + Duration::from_secs(grant.expires_in_secs));
            state.auth.loading = false;
            state.auth.error = None;
            if let Some(screen) = &mut state.auth_screen {
                screen.form.finish(true);
            }
            state.auth_screen = None;
            let target = state.auth.redirect_path;
            navigate(state, target, &mut effects);
        }
        AuthFail(message) => {
            warn!(%message, "authentication failed");
            state.auth.loading = false;
            state.auth.error = Some(message);
            if let Some(screen) = &mut state.auth_screen {
                screen.form.finish(false);
            }
        }
        Logout => {
            if state.auth.is_authenticated() {
                info!("logged out");
            }
            state.auth.token = None;
            state.auth.user_id = None;
            state.auth.expires_at = None;
            state.orders.orders.clear();
            state.checkout = None;
            state.route = Route::Builder;
        }
        SetAuthRedirectPath(route) => state.auth.redirect_path = route,
        ContactInput(input) => {
            if let Some(form) = &mut state.checkout {
                log_form_error(form.input(input));
            }
        }
        ContactSubmit => {
            let ctx = CheckoutContext::from_state(state);
            if let Some(form) = &mut state.checkout {
                match screens::submit_order(form, &ctx) {
                    Ok(eff) => {
                        state.orders.loading = true;
                        state.status_text = Some("Placing order...".into());
                        effects.push(eff);
                    }
                    Err(e) => debug!(%e, "order submit refused"),
                }
            }
        }
        CheckoutCancelled => {
            if !checkout_in_flight(state) {
                state.checkout = None;
                state.route = Route::Builder;
            }
        }
        PurchaseBurgerSuccess { id } => {
            info!(%id, "order placed");
            state.orders.loading = false;
            state.orders.purchased = true;
            state.status_text = None;
            if let Some(form) = &mut state.checkout {
                form.finish(true);
            }
            state.checkout = None;
            state.route = Route::Builder;
            state.builder.ingredients = None;
            effects.push(Effect::FetchIngredients);
            effects.push(Effect::ShowToast {
                text: "Order placed, enjoy your burger!".into(),
                level: ToastLevel::Success,
                seconds: 4,
            });
        }
        PurchaseBurgerFail(err) => {
            error!(%err, "placing order failed");
            state.orders.loading = false;
            state.status_text = None;
            if let Some(form) = &mut state.checkout {
                form.finish(false);
            }
            effects.push(Effect::ShowToast {
                text: format!("Order failed: {err}"),
                level: ToastLevel::Error,
                seconds: 5,
            });
        }
        FetchOrders => {
            if let (Some(token), Some(user_id)) = (&state.auth.token, &state.auth.user_id) {
                state.orders.loading = true;
                state.orders.error = None;
                effects.push(Effect::FetchOrders {
                    token: token.clone(),
                    user_id: user_id.clone(),
                });
            }
        }
        FetchOrdersSuccess(orders) => {
            debug!(count = orders.len(), "orders loaded");
            state.orders.orders = orders;
            state.orders.loading = false;
            state.orders.selected = 0;
        }
        FetchOrdersFail(err) => {
            warn!(%err, "fetching orders failed");
            state.orders.loading = false;
            state.orders.error = Some(err);
        }
        MoveOrderCursor(dir) => {
            let n = state.orders.orders.len() as i32;
            if n > 0 {
                state.orders.selected = (state.orders.selected as i32 + dir).clamp(0, n - 1) as usize;
            }
        }
    }
    effects
}

fn recompute_price(state: &mut AppState) {
    let base = state.config.base_price;
    let prices = state.config.prices;
    state.builder.recompute_price(base, &prices);
}

fn log_form_error(res: Result<(), FormError>) {
    if let Err(e) = res {
        warn!(%e, "form edit rejected");
    }
}

fn checkout_in_flight(state: &AppState) -> bool {
    state
        .checkout
        .as_ref()
        .is_some_and(|f| !f.phase().accepts_input())
}

/// True while an order or a sign-in is awaiting the backend.
fn submission_in_flight(state: &AppState) -> bool {
    checkout_in_flight(state)
        || state.auth.loading
        || state
            .auth_screen
            .as_ref()
            .is_some_and(|s| !s.form.phase().accepts_input())
}

fn navigate(state: &mut AppState, route: Route, effects: &mut Vec<Effect>) {
    if submission_in_flight(state) {
        debug!(path = route.path(), "navigation held while submitting");
        return;
    }
    debug!(path = route.path(), "navigate");
    match route {
        Route::Builder => {
            state.builder.purchasing = false;
            state.route = Route::Builder;
        }
        Route::Auth => {
            if state.auth.is_authenticated() {
                return;
            }
            if let Some(reset) = AuthContext::from_state(state).redirect_reset() {
                state.auth.redirect_path = reset;
            }
            state.auth.error = None;
            state.auth_screen = Some(AuthScreen::new());
            state.route = Route::Auth;
        }
        Route::Checkout => {
            if !state.auth.is_authenticated() {
                state.auth.redirect_path = Route::Checkout;
                navigate(state, Route::Auth, effects);
                return;
            }
            if !state.builder.purchasable() {
                state.route = Route::Builder;
                return;
            }
            state.orders.purchased = false;
            state.checkout = Some(crate::forms::FormController::new(
                screens::contact_schema(),
            ));
            state.route = Route::Checkout;
        }
        Route::Orders => {
            if !state.auth.is_authenticated() {
                navigate(state, Route::Auth, effects);
                return;
            }
            state.route = Route::Orders;
            effects.extend(update(state, AppMsg::FetchOrders));
        }
        Route::Logout => effects.extend(update(state, AppMsg::Logout)),
    }
}
