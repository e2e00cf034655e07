use crate::forms::Payload;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ingredient {
    Salad,
    Bacon,
    Cheese,
    Meat,
}

impl Ingredient {
    /// Display order in the builder, top to bottom.
    pub const ALL: [Ingredient; 4] = [
        Ingredient::Salad,
        Ingredient::Bacon,
        Ingredient::Cheese,
        Ingredient::Meat,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Ingredient::Salad => "Salad",
            Ingredient::Bacon => "Bacon",
            Ingredient::Cheese => "Cheese",
            Ingredient::Meat => "Meat",
        }
    }
}

pub type Ingredients = BTreeMap<Ingredient, u32>;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct Prices {
    #[serde(default = "default_salad")]
    pub salad: f64,
    #[serde(default = "default_bacon")]
    pub bacon: f64,
    #[serde(default = "default_cheese")]
    pub cheese: f64,
    #[serde(default = "default_meat")]
    pub meat: f64,
}

impl Prices {
    pub fn of(&self, ingredient: Ingredient) -> f64 {
        match ingredient {
            Ingredient::Salad => self.salad,
            Ingredient::Bacon => self.bacon,
            Ingredient::Cheese => self.cheese,
            Ingredient::Meat => self.meat,
        }
    }
}

impl Default for Prices {
    fn default() -> Self {
        Self {
            salad: default_salad(),
            bacon: default_bacon(),
            cheese: default_cheese(),
            meat: default_meat(),
        }
    }
}

fn default_salad() -> f64 {
    0.5
}
fn default_bacon() -> f64 {
    0.7
}
fn default_cheese() -> f64 {
    0.4
}
fn default_meat() -> f64 {
    1.3
}

/// Outgoing order body for `POST /orders.json`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub ingredients: Ingredients,
    pub price: f64,
    pub order_data: Payload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// An order as listed back from the backend.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StoredOrder {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub ingredients: Ingredients,
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_auth_base_url")]
    pub auth_base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_base_price")]
    pub base_price: f64,
    #[serde(default)]
    pub prices: Prices,
    // Relative paths resolve against the working directory
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            auth_base_url: default_auth_base_url(),
            api_key: String::new(),
            request_timeout_secs: default_timeout(),
            base_price: default_base_price(),
            prices: Prices::default(),
            log_file: None,
        }
    }
}

impl AppConfig {
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("burger-tui.log"))
    }
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:9000".to_string()
}

fn default_auth_base_url() -> String {
    "https://identitytoolkit.googleapis.com/v1".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_base_price() -> f64 {
    4.0
}

pub(crate) fn validate_app_config(cfg: &AppConfig) -> Result<(), String> {
    for (name, url) in [
        ("api_base_url", &cfg.api_base_url),
        ("auth_base_url", &cfg.auth_base_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(format!("{name} must be an http(s) URL, got '{url}'"));
        }
    }
    if cfg.request_timeout_secs == 0 {
        return Err("request_timeout_secs must be greater than zero".into());
    }
    if cfg.base_price < 0.0 {
        return Err("base_price must not be negative".into());
    }
    for i in Ingredient::ALL {
        if cfg.prices.of(i) < 0.0 {
            return Err(format!("price for {} must not be negative", i.label()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn yaml_fills_missing_keys_with_defaults() {
        let cfg: AppConfig = serde_yaml::from_str("api_key: abc\nprices:\n  meat: 2.0\n").unwrap();
        assert_eq!(cfg.api_key, "abc");
        assert_eq!(cfg.base_price, 4.0);
        assert_eq!(cfg.prices.meat, 2.0);
        assert_eq!(cfg.prices.salad, 0.5);
        assert_eq!(cfg.request_timeout_secs, 10);
        assert!(validate_app_config(&cfg).is_ok());
    }

    #[test]
    fn validate_rejects_bad_urls_and_prices() {
        let cfg = AppConfig {
            api_base_url: "ftp://x".into(),
            ..Default::default()
        };
        assert!(validate_app_config(&cfg).unwrap_err().contains("api_base_url"));
        let mut cfg = AppConfig::default();
        cfg.prices.bacon = -1.0;
        assert!(validate_app_config(&cfg).unwrap_err().contains("Bacon"));
    }

    #[test]
    fn order_serializes_camel_case_without_missing_user() {
        let mut ingredients = Ingredients::new();
        ingredients.insert(Ingredient::Meat, 2);
        let order = Order {
            ingredients,
            price: 6.6,
            order_data: Payload::from([("name".to_string(), "Ada".to_string())]),
            user_id: None,
        };
        let v = serde_json::to_value(&order).unwrap();
        assert_eq!(
            v,
            json!({"ingredients": {"meat": 2}, "price": 6.6, "orderData": {"name": "Ada"}})
        );
    }

    #[test]
    fn order_data_serializes_in_insertion_order() {
        let order = Order {
            ingredients: Ingredients::new(),
            price: 4.0,
            order_data: Payload::from([
                ("zipCode".to_string(), "12345".to_string()),
                ("country".to_string(), "DE".to_string()),
                ("email".to_string(), "a@b.co".to_string()),
            ]),
            user_id: None,
        };
        let text = serde_json::to_string(&order).unwrap();
        let zip = text.find("zipCode").unwrap();
        let country = text.find("country").unwrap();
        let email = text.find("email").unwrap();
        assert!(zip < country && country < email, "{text}");
    }

    #[test]
    fn ingredients_deserialize_from_backend_shape() {
        let v = json!({"bacon": 0, "cheese": 1, "meat": 2, "salad": 0});
        let ings: Ingredients = serde_json::from_value(v).unwrap();
        assert_eq!(ings[&Ingredient::Meat], 2);
        assert_eq!(ings.len(), 4);
    }
}
