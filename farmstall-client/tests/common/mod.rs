#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

pub const GOOD_TOKEN: &str = "tok-123";
pub const EXPIRED_TOKEN: &str = "expired";
pub const FLAKY_TOKEN: &str = "flaky";
pub const PASSWORD: &str = "secret";

/// A request as the stub saw it.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: &'static str,
    pub path: String,
    pub bearer: Option<String>,
    pub form: BTreeMap<String, String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct StubState {
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl StubState {
    fn record(&self, method: &'static str, path: &str, headers: &HeaderMap) -> Option<String> {
        let bearer = bearer(headers);
        self.seen.lock().unwrap().push(Seen {
            method,
            path: path.to_string(),
            bearer: bearer.clone(),
            form: BTreeMap::new(),
            body: None,
        });
        bearer
    }

    fn annotate(&self, f: impl FnOnce(&mut Seen)) {
        if let Some(last) = self.seen.lock().unwrap().last_mut() {
            f(last);
        }
    }
}

/// In-process stand-in for the shop backend.
pub struct StubServer {
    pub base_url: String,
    state: StubState,
}

impl StubServer {
    pub async fn start() -> Self {
        let state = StubState::default();
        let api = Router::new()
            .route("/shop/auth/login", post(login))
            .route("/shops/profile", get(profile))
            .route("/shops/orders", get(shop_orders))
            .route("/categories", get(list_categories).post(add_category))
            .route("/products/{id}", delete(delete_product))
            .route("/orders/{id}", put(update_order))
            .with_state(state.clone());
        let app = Router::new().nest("/api/v1", api);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api/v1/"),
            state,
        }
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.state.seen.lock().unwrap().clone()
    }

    pub fn last(&self) -> Seen {
        self.seen().last().cloned().expect("no request recorded")
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": message }))).into_response()
}

fn shop_json() -> Value {
    json!({
        "id": "1",
        "name": "X",
        "ownerName": "Ada",
        "email": "ada@farm.test",
        "role": "shop",
        "location": "Valley",
        "phoneNumber": "555",
        "description": null,
        "isVerified": true,
        "isBanned": false,
        "isApproved": true,
        "type": "farm"
    })
}

/// Checks the bearer the way the real backend's auth middleware would.
fn authorize(token: Option<&str>) -> Result<(), Response> {
    match token {
        Some(GOOD_TOKEN) => Ok(()),
        Some(FLAKY_TOKEN) => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "Service unavailable" })),
        )
            .into_response()),
        Some(EXPIRED_TOKEN) => Err(unauthorized("Token expired")),
        _ => Err(unauthorized("Authentication required")),
    }
}

async fn login(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("POST", "/shop/auth/login", &headers);
    state.annotate(|s| s.body = Some(body.clone()));
    match body["password"].as_str() {
        Some(PASSWORD) => Json(json!({ "data": GOOD_TOKEN })).into_response(),
        Some("no-token") => Json(json!({ "message": "ok" })).into_response(),
        _ => unauthorized("Invalid credentials"),
    }
}

async fn profile(State(state): State<StubState>, headers: HeaderMap) -> Response {
    let token = state.record("GET", "/shops/profile", &headers);
    if let Err(rejection) = authorize(token.as_deref()) {
        return rejection;
    }
    Json(json!({ "data": shop_json() })).into_response()
}

async fn shop_orders(State(state): State<StubState>, headers: HeaderMap) -> Response {
    state.record("GET", "/shops/orders", &headers);
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "errors": ["from is required", { "message": "to is required" }] })),
    )
        .into_response()
}

async fn list_categories(State(state): State<StubState>, headers: HeaderMap) -> Response {
    let token = state.record("GET", "/categories", &headers);
    if let Err(rejection) = authorize(token.as_deref()) {
        return rejection;
    }
    Json(json!({
        "data": [
            { "id": "c1", "name": "Dairy", "description": "Milk and cheese", "products": [] },
            { "id": "c2", "name": "Eggs", "products": [] }
        ]
    }))
    .into_response()
}

async fn add_category(
    State(state): State<StubState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let token = state.record("POST", "/categories", &headers);
    if let Err(rejection) = authorize(token.as_deref()) {
        return rejection;
    }
    let mut form = BTreeMap::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let value = match field.file_name() {
            Some(file_name) => {
                let file_name = file_name.to_string();
                let len = field.bytes().await.unwrap().len();
                format!("file:{file_name}:{len}")
            }
            None => field.text().await.unwrap(),
        };
        form.insert(name, value);
    }
    let name = form.get("name").cloned().unwrap_or_default();
    state.annotate(|s| s.form = form);
    (
        StatusCode::CREATED,
        Json(json!({ "data": { "id": "c3", "name": name, "products": [] } })),
    )
        .into_response()
}

async fn delete_product(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let token = state.record("DELETE", &format!("/products/{id}"), &headers);
    if let Err(rejection) = authorize(token.as_deref()) {
        return rejection;
    }
    Json(json!({ "data": null, "message": "Product deleted" })).into_response()
}

async fn update_order(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let token = state.record("PUT", &format!("/orders/{id}"), &headers);
    state.annotate(|s| s.body = Some(body.clone()));
    if let Err(rejection) = authorize(token.as_deref()) {
        return rejection;
    }
    Json(json!({
        "data": { "id": id, "orderStatus": body["status"], "totalAmount": 12.5 }
    }))
    .into_response()
}
