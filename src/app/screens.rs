use super::state::{AuthScreen, Route};
use super::Effect;
use crate::forms::{FieldDescriptor, FormController, FormError, FormSchema, InputType, RuleSet};
use crate::model::{Ingredients, Order};
use crate::ui::AppState;

pub fn auth_schema() -> FormSchema {
    FormSchema::new()
        .field(
            "email",
            FieldDescriptor::input(InputType::Email, "Mail Address")
                .rules(RuleSet::new().required().email()),
        )
        .field(
            "password",
            FieldDescriptor::input(InputType::Password, "Password")
                .rules(RuleSet::new().required().min_length(6)),
        )
}

pub fn contact_schema() -> FormSchema {
    let text = |placeholder: &str| FieldDescriptor::input(InputType::Text, placeholder);
    FormSchema::new()
        .field("name", text("Your Name").rules(RuleSet::new().required()))
        .field("street", text("Street").rules(RuleSet::new().required()))
        .field(
            "zipCode",
            text("ZIP Code").rules(RuleSet::new().required().min_length(5).max_length(5)),
        )
        .field("country", text("Country").rules(RuleSet::new().required()))
        .field(
            "email",
            FieldDescriptor::input(InputType::Email, "Your E-Mail").rules(RuleSet::new().required()),
        )
        .field(
            "deliveryMethod",
            FieldDescriptor::select(&[("fastest", "Fastest"), ("cheapest", "Cheapest")]),
        )
}

/// Store values the auth screen reads.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    pub loading: bool,
    pub error: Option<String>,
    pub is_authenticated: bool,
    pub building_burger: bool,
    pub auth_redirect_path: Route,
}

impl AuthContext {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            loading: state.auth.loading,
            error: state.auth.error.clone(),
            is_authenticated: state.auth.is_authenticated(),
            building_burger: state.builder.building,
            auth_redirect_path: state.auth.redirect_path,
        }
    }

    /// Redirect to fall back to when the sign-in screen mounts.
    ///
    /// A redirect left over from an abandoned order is dropped once the burger
    /// is empty; while a burger is in progress the checkout redirect is kept so
    /// signing in resumes the order.
    pub fn redirect_reset(&self) -> Option<Route> {
        (!self.building_burger && self.auth_redirect_path != Route::Builder)
            .then_some(Route::Builder)
    }
}

/// Store values the contact-data screen combines with its form payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutContext {
    pub ingredients: Ingredients,
    pub total_price: f64,
    pub token: Option<String>,
    pub user_id: Option<String>,
}

impl CheckoutContext {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            ingredients: state.builder.ingredients.clone().unwrap_or_default(),
            total_price: state.builder.total_price,
            token: state.auth.token.clone(),
            user_id: state.auth.user_id.clone(),
        }
    }
}

pub fn submit_auth(screen: &mut AuthScreen, ctx: &AuthContext) -> Result<Effect, FormError> {
    if ctx.loading {
        return Err(FormError::NotSubmittable(screen.form.phase()));
    }
    let mut payload = screen.form.try_submit()?;
    Ok(Effect::Authenticate {
        email: payload.remove("email").unwrap_or_default(),
        password: payload.remove("password").unwrap_or_default(),
        sign_up: screen.is_sign_up,
    })
}

pub fn submit_order(form: &mut FormController, ctx: &CheckoutContext) -> Result<Effect, FormError> {
    let order_data = form.try_submit()?;
    let order = Order {
        ingredients: ctx.ingredients.clone(),
        price: (ctx.total_price * 100.0).round() / 100.0,
        order_data,
        user_id: ctx.user_id.clone(),
    };
    Ok(Effect::PlaceOrder {
        order,
        token: ctx.token.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{FormInput, FormPhase};
    use crate::model::Ingredient;

    fn type_into(form: &mut FormController, id: &str, text: &str) {
        let idx = form.schema().iter().position(|(k, _)| k == id).unwrap();
        form.selected = idx;
        for c in text.chars() {
            form.input(FormInput::Char(c)).unwrap();
        }
    }

    fn ctx() -> AuthContext {
        AuthContext {
            loading: false,
            error: None,
            is_authenticated: false,
            building_burger: false,
            auth_redirect_path: Route::Builder,
        }
    }

    #[test]
    fn auth_schema_validates_email_and_password() {
        let mut screen = AuthScreen::new();
        type_into(&mut screen.form, "email", "ada@example.com");
        type_into(&mut screen.form, "password", "12345");
        assert!(!screen.form.is_valid());
        type_into(&mut screen.form, "password", "6");
        assert!(screen.form.is_valid());
        match submit_auth(&mut screen, &ctx()).unwrap() {
            Effect::Authenticate {
                email,
                password,
                sign_up,
            } => {
                assert_eq!(email, "ada@example.com");
                assert_eq!(password, "123456");
                assert!(sign_up);
            }
            _ => panic!("expected Authenticate"),
        }
        assert_eq!(screen.form.phase(), FormPhase::Submitting);
    }

    #[test]
    fn auth_submit_refused_while_loading() {
        let mut screen = AuthScreen::new();
        type_into(&mut screen.form, "email", "ada@example.com");
        type_into(&mut screen.form, "password", "123456");
        let busy = AuthContext {
            loading: true,
            ..ctx()
        };
        assert!(submit_auth(&mut screen, &busy).is_err());
        assert_eq!(screen.form.phase(), FormPhase::Editing);
    }

    #[test]
    fn stale_redirect_dropped_unless_burger_in_progress() {
        // empty burger: back to the builder after signing in
        let stale = AuthContext {
            auth_redirect_path: Route::Checkout,
            ..ctx()
        };
        assert_eq!(stale.redirect_reset(), Some(Route::Builder));
        let building = AuthContext {
            building_burger: true,
            ..stale.clone()
        };
        // burger in progress: keep heading to checkout
        assert_eq!(building.redirect_reset(), None);
        assert_eq!(ctx().redirect_reset(), None);
    }

    #[test]
    fn contact_form_builds_order_with_context() {
        let mut form = FormController::new(contact_schema());
        assert!(!form.is_valid());
        type_into(&mut form, "name", "Ada");
        type_into(&mut form, "street", "Main St 1");
        type_into(&mut form, "zipCode", "12345");
        type_into(&mut form, "country", "UK");
        type_into(&mut form, "email", "ada@example.com");
        assert!(form.is_valid());
        let checkout = CheckoutContext {
            ingredients: Ingredients::from([(Ingredient::Meat, 1)]),
            total_price: 5.300000000000001,
            token: Some("tok".into()),
            user_id: Some("u1".into()),
        };
        match submit_order(&mut form, &checkout).unwrap() {
            Effect::PlaceOrder { order, token } => {
                assert_eq!(token.as_deref(), Some("tok"));
                assert_eq!(order.price, 5.3);
                assert_eq!(order.user_id.as_deref(), Some("u1"));
                assert_eq!(order.order_data["zipCode"], "12345");
                assert_eq!(order.order_data["deliveryMethod"], "fastest");
                assert_eq!(order.order_data.len(), 6);
            }
            _ => panic!("expected PlaceOrder"),
        }
    }

    #[test]
    fn contact_form_zip_length_is_enforced() {
        let mut form = FormController::new(contact_schema());
        type_into(&mut form, "zipCode", "123456");
        assert!(!form.schema().get("zipCode").unwrap().valid);
    }
}
