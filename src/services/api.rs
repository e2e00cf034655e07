use crate::model::{AppConfig, Ingredients, Order, StoredOrder};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned {code}: {message}")]
    Status { code: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Short text for the UI; backend errors carry their own message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Credentials handed out by the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub token: String,
    pub user_id: String,
    pub expires_in_secs: u64,
}

/// Everything the client asks of the backend. Implemented over HTTP for the
/// real app and by in-memory fakes in tests.
pub trait Backend: Send + Sync {
    fn fetch_ingredients(&self) -> Result<Ingredients, ApiError>;
    fn authenticate(&self, email: &str, password: &str, sign_up: bool)
        -> Result<AuthGrant, ApiError>;
    /// Returns the id the backend assigned to the order.
    fn place_order(&self, order: &Order, token: Option<&str>) -> Result<String, ApiError>;
    fn fetch_orders(&self, token: &str, user_id: &str) -> Result<Vec<StoredOrder>, ApiError>;
}

pub struct HttpBackend {
    client: Client,
    api_base_url: String,
    auth_base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
    local_id: String,
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Deserialize)]
struct CreatedResponse {
    name: String,
}

const DEFAULT_EXPIRY_SECS: u64 = 3600;

impl HttpBackend {
    pub fn new(cfg: &AppConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_base_url: cfg.api_base_url.trim_end_matches('/').to_string(),
            auth_base_url: cfg.auth_base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path)
    }
}

impl Backend for HttpBackend {
    fn fetch_ingredients(&self) -> Result<Ingredients, ApiError> {
        let resp = self.client.get(self.url("ingredients.json")).send()?;
        let v: JsonValue = check(resp)?.json()?;
        serde_json::from_value(v).map_err(|e| ApiError::Decode(format!("ingredients: {e}")))
    }

    fn authenticate(
        &self,
        email: &str,
        password: &str,
        sign_up: bool,
    ) -> Result<AuthGrant, ApiError> {
        let action = if sign_up {
            "accounts:signUp"
        } else {
            "accounts:signInWithPassword"
        };
        let url = format!("{}/{action}", self.auth_base_url);
        debug!(%url, sign_up, "authenticating");
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        let resp = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()?;
        let parsed: SignInResponse = check(resp)?.json()?;
        Ok(AuthGrant {
            token: parsed.id_token,
            user_id: parsed.local_id,
            expires_in_secs: parse_expiry(parsed.expires_in.as_deref()),
        })
    }

    fn place_order(&self, order: &Order, token: Option<&str>) -> Result<String, ApiError> {
        let mut req = self.client.post(self.url("orders.json")).json(order);
        if let Some(t) = token {
            req = req.query(&[("auth", t)]);
        }
        let created: CreatedResponse = check(req.send()?)?.json()?;
        Ok(created.name)
    }

    fn fetch_orders(&self, token: &str, user_id: &str) -> Result<Vec<StoredOrder>, ApiError> {
        let equal_to = format!("\"{user_id}\"");
        let resp = self
            .client
            .get(self.url("orders.json"))
            .query(&[
                ("auth", token),
                ("orderBy", "\"userId\""),
                ("equalTo", equal_to.as_str()),
            ])
            .send()?;
        let v: JsonValue = check(resp)?.json()?;
        orders_from_json(&v)
    }
}

fn check(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().unwrap_or_default();
    let message = error_message_from_body(&text)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
    warn!(code = status.as_u16(), %message, "backend error");
    Err(ApiError::Status {
        code: status.as_u16(),
        message,
    })
}

/// Pull `error.message` (or a plain string `error`) out of an error body.
pub(crate) fn error_message_from_body(body: &str) -> Option<String> {
    let v: JsonValue = serde_json::from_str(body).ok()?;
    let err = v.get("error")?;
    err.get("message")
        .and_then(|m| m.as_str())
        .or_else(|| err.as_str())
        .map(|s| s.to_string())
}

pub(crate) fn parse_expiry(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_EXPIRY_SECS)
}

/// The orders endpoint answers with an object keyed by order id, or `null`.
pub(crate) fn orders_from_json(v: &JsonValue) -> Result<Vec<StoredOrder>, ApiError> {
    let Some(map) = v.as_object() else {
        if v.is_null() {
            return Ok(Vec::new());
        }
        return Err(ApiError::Decode("orders: expected an object".into()));
    };
    let mut out = Vec::with_capacity(map.len());
    for (id, raw) in map {
        let mut order: StoredOrder = serde_json::from_value(raw.clone())
            .map_err(|e| ApiError::Decode(format!("order {id}: {e}")))?;
        order.id = id.clone();
        out.push(order);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ingredient;
    use serde_json::json;

    #[test]
    fn orders_are_flattened_with_ids() {
        let v = json!({
            "-a1": {"ingredients": {"meat": 1, "salad": 0}, "price": 5.3, "userId": "u1"},
            "-b2": {"ingredients": {"cheese": 2}, "price": 4.8, "orderData": {"name": "Ada"}}
        });
        let orders = orders_from_json(&v).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, "-a1");
        assert_eq!(orders[0].ingredients[&Ingredient::Meat], 1);
        assert_eq!(orders[1].price, 4.8);
    }

    #[test]
    fn null_orders_mean_empty_list() {
        assert!(orders_from_json(&JsonValue::Null).unwrap().is_empty());
        assert!(matches!(
            orders_from_json(&json!([1, 2])),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn error_message_prefers_nested_message() {
        let body = r#"{"error": {"code": 400, "message": "EMAIL_EXISTS"}}"#;
        assert_eq!(error_message_from_body(body).as_deref(), Some("EMAIL_EXISTS"));
        assert_eq!(
            error_message_from_body(r#"{"error": "Permission denied"}"#).as_deref(),
            Some("Permission denied")
        );
        assert!(error_message_from_body("<html>").is_none());
    }

    #[test]
    fn expiry_falls_back_to_one_hour() {
        assert_eq!(parse_expiry(Some("120")), 120);
        assert_eq!(parse_expiry(Some("soon")), 3600);
        assert_eq!(parse_expiry(None), 3600);
    }

    #[test]
    fn status_errors_show_backend_message() {
        let e = ApiError::Status {
            code: 400,
            message: "INVALID_PASSWORD".into(),
        };
        assert_eq!(e.user_message(), "INVALID_PASSWORD");
        let e = ApiError::Decode("bad".into());
        assert_eq!(e.user_message(), "unexpected response: bad");
    }
}
