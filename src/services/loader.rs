use crate::app::AppMsg;
use crate::model::Order;
use crate::services::api::Backend;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use tracing::{debug, error};

// Each request runs on its own thread and reports back as a store message.

pub fn spawn_fetch_ingredients(backend: Arc<dyn Backend>, tx: Sender<AppMsg>) {
    thread::spawn(move || {
        let msg = match backend.fetch_ingredients() {
            Ok(ings) => AppMsg::SetIngredients(ings),
            Err(e) => AppMsg::FetchIngredientsFailed(e.to_string()),
        };
        send(&tx, msg);
    });
}

pub fn spawn_authenticate(
    backend: Arc<dyn Backend>,
    email: String,
    password: String,
    sign_up: bool,
    tx: Sender<AppMsg>,
) {
    thread::spawn(move || {
        let msg = match backend.authenticate(&email, &password, sign_up) {
            Ok(grant) => AppMsg::AuthSuccess(grant),
            Err(e) => AppMsg::AuthFail(e.user_message()),
        };
        send(&tx, msg);
    });
}

pub fn spawn_place_order(
    backend: Arc<dyn Backend>,
    order: Order,
    token: Option<String>,
    tx: Sender<AppMsg>,
) {
    thread::spawn(move || {
        let msg = match backend.place_order(&order, token.as_deref()) {
            Ok(id) => AppMsg::PurchaseBurgerSuccess { id },
            Err(e) => AppMsg::PurchaseBurgerFail(e.to_string()),
        };
        send(&tx, msg);
    });
}

pub fn spawn_fetch_orders(
    backend: Arc<dyn Backend>,
    token: String,
    user_id: String,
    tx: Sender<AppMsg>,
) {
    thread::spawn(move || {
        let msg = match backend.fetch_orders(&token, &user_id) {
            Ok(orders) => AppMsg::FetchOrdersSuccess(orders),
            Err(e) => AppMsg::FetchOrdersFail(e.user_message()),
        };
        send(&tx, msg);
    });
}

fn send(tx: &Sender<AppMsg>, msg: AppMsg) {
    debug!("request finished");
    if tx.send(msg).is_err() {
        error!("ui loop gone, dropping response");
    }
}
