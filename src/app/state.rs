use crate::forms::FormController;
use crate::model::{Ingredient, Ingredients, Prices, StoredOrder};
use std::time::Instant;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Builder,
    Auth,
    Checkout,
    Orders,
    Logout,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Builder => "/",
            Route::Auth => "/auth",
            Route::Checkout => "/checkout",
            Route::Orders => "/orders",
            Route::Logout => "/logout",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuilderState {
    // None until the backend answered
    pub ingredients: Option<Ingredients>,
    pub total_price: f64,
    pub error: bool,
    pub building: bool,
    pub selected: usize,
    // Order summary modal open
    pub purchasing: bool,
}

impl BuilderState {
    pub fn count(&self, ingredient: Ingredient) -> u32 {
        self.ingredients
            .as_ref()
            .and_then(|m| m.get(&ingredient).copied())
            .unwrap_or(0)
    }

    pub fn purchasable(&self) -> bool {
        Ingredient::ALL.iter().any(|i| self.count(*i) > 0)
    }

    pub fn selected_ingredient(&self) -> Ingredient {
        Ingredient::ALL[self.selected % Ingredient::ALL.len()]
    }

    pub fn recompute_price(&mut self, base: f64, prices: &Prices) {
        self.total_price = base
            + Ingredient::ALL
                .iter()
                .map(|i| prices.of(*i) * self.count(*i) as f64)
                .sum::<f64>();
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub expires_at: Option<Instant>,
    pub error: Option<String>,
    pub loading: bool,
    pub redirect_path: Route,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrdersState {
    pub orders: Vec<StoredOrder>,
    pub loading: bool,
    pub purchased: bool,
    pub error: Option<String>,
    pub selected: usize,
}

/// The mounted auth form plus its sign-up/sign-in toggle.
#[derive(Debug, Clone)]
pub struct AuthScreen {
    pub form: FormController,
    pub is_sign_up: bool,
}

impl AuthScreen {
    pub fn new() -> Self {
        Self {
            form: FormController::new(super::screens::auth_schema()),
            is_sign_up: true,
        }
    }
}
