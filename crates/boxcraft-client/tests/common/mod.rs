#![allow(non_snake_case)]
#![allow(dead_code)]

use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use boxcraft_client::navigate::RecordingNavigator;
use boxcraft_client::storage::MemoryStore;
use boxcraft_client::{ApiClient, ClientConfig, KeyValueStore, SessionContext, SessionStore};
use serde_json::{json, Value};

pub const PASSWORD: &str = "secret";

#[derive(Default)]
pub struct BackendState {
    pub products: Vec<Value>,
    pub users: Vec<Value>,
    pub bulletins: Vec<Value>,
    pub next_id: u64,
    pub authorization: Vec<Option<String>>,
    pub content_types: Vec<String>,
    pub registered: Vec<String>,
    pub logout_calls: usize,
    pub fail_logout: bool,
    pub bulletins_down: bool,
    /// JSON bodies received by `PUT /admin/users/:id`.
    pub user_updates: Vec<Value>,
    pub product_lists: usize,
    pub user_lists: usize,
    pub bulletin_lists: usize,
}

/// In-process stand-in for the REST backend.
#[derive(Clone, Default)]
pub struct Backend {
    state: Arc<Mutex<BackendState>>,
}

impl Backend {
    pub fn with<T>(&self, f: impl FnOnce(&mut BackendState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    pub fn seed_products(&self, count: u64) {
        self.with(|s| {
            for id in 1..=count {
                s.products.push(json!({
                    "id": id,
                    "name": format!("Box {id}"),
                    "price": format!("{}.50", id),
                    "category": if id % 2 == 0 { "Corrugated" } else { "Rigid" },
                }));
            }
            s.next_id = count + 1;
        });
    }

    pub fn seed_users(&self) {
        self.with(|s| {
            s.users = vec![
                json!({"id": 1, "name": "Ana", "email": "ana@example.com", "role": "admin", "status": "active"}),
                json!({"id": 2, "name": "Budi", "email": "budi@example.com", "role": "sales_user", "status": "active"}),
                json!({"id": 3, "name": "Citra", "email": "citra@example.com", "role": "customer_user", "status": "inactive"}),
                json!({"id": 4, "name": "Dian", "email": "dian@example.com", "role": "sales_user", "status": "suspended"}),
            ];
        });
    }
}

fn role_for(email: &str) -> &'static str {
    match email.split('@').next().unwrap_or_default() {
        "admin" => "admin",
        "hr" => "hr_user",
        "sales" => "sales_user",
        "customer" => "customer_user",
        _ => "user",
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn expired(headers: &HeaderMap) -> bool {
    bearer(headers).as_deref() == Some("Bearer expired")
}

async fn login(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if body["password"] != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        )
            .into_response();
    }
    Json(json!({
        "user": {"id": 10, "name": "Signed In", "email": email, "role": role_for(&email), "status": "active"},
        "access_token": format!("token-{email}"),
        "refresh_token": "refresh-1",
    }))
    .into_response()
}

async fn register(State(backend): State<Backend>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if email == "taken@example.com" {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"message": "The email has already been taken."})),
        )
            .into_response();
    }
    backend.with(|s| s.registered.push(email));
    (StatusCode::CREATED, Json(json!({"message": "registered"}))).into_response()
}

async fn logout(State(backend): State<Backend>) -> Response {
    let fail = backend.with(|s| {
        s.logout_calls += 1;
        s.fail_logout
    });
    if fail {
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    } else {
        Json(json!({"message": "logged out"})).into_response()
    }
}

async fn list_products(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    backend.with(|s| {
        s.authorization.push(bearer(&headers));
        s.product_lists += 1;
    });
    if expired(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Token expired"})),
        )
            .into_response();
    }
    let products = backend.with(|s| s.products.clone());
    Json(json!({ "data": products })).into_response()
}

fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn multipart_field(text: &str, field: &str) -> Option<String> {
    let marker = format!("name=\"{field}\"\r\n\r\n");
    let start = text.find(&marker)? + marker.len();
    let rest = &text[start..];
    Some(rest[..rest.find("\r\n")?].to_string())
}

/// Product fields from a JSON or multipart body, plus whether a file was attached.
fn product_fields(contentType: &str, body: &[u8]) -> (serde_json::Map<String, Value>, bool) {
    if contentType.starts_with("application/json") {
        let value: Value = serde_json::from_slice(body).unwrap_or_default();
        return (value.as_object().cloned().unwrap_or_default(), false);
    }

    let text = String::from_utf8_lossy(body);
    let mut fields = serde_json::Map::new();
    for name in ["name", "description", "price", "stock", "category"] {
        let Some(value) = multipart_field(&text, name) else {
            continue;
        };
        let value = match name {
            "stock" => value.parse::<i64>().map(Value::from).unwrap_or(Value::Null),
            _ => Value::String(value),
        };
        fields.insert(name.to_string(), value);
    }
    let hasImage = text.contains("name=\"image\"; filename=");
    (fields, hasImage)
}

async fn create_product(
    State(backend): State<Backend>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Response {
    let contentType = content_type(&headers);
    let (mut fields, hasImage) = product_fields(&contentType, &body);

    backend.with(|s| {
        s.content_types.push(contentType);
        let id = s.next_id;
        s.next_id += 1;
        fields.insert("id".into(), json!(id));
        if hasImage {
            fields.insert("image_url".into(), json!(format!("/uploads/products/{id}.png")));
        }
        s.products.push(Value::Object(fields));
    });
    (StatusCode::CREATED, Json(json!({"message": "created"}))).into_response()
}

async fn update_product(
    State(backend): State<Backend>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Response {
    let contentType = content_type(&headers);
    let (fields, hasImage) = product_fields(&contentType, &body);

    let updated = backend.with(|s| {
        s.content_types.push(contentType);
        let Some(product) = s.products.iter_mut().find(|p| p["id"] == id) else {
            return false;
        };
        for (key, value) in fields {
            product[key] = value;
        }
        if hasImage {
            product["image_url"] = json!(format!("/uploads/products/{id}.png"));
        }
        true
    });
    if updated {
        Json(json!({"message": "updated"})).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Product not found"})),
        )
            .into_response()
    }
}

async fn delete_product(State(backend): State<Backend>, Path(id): Path<u64>) -> Response {
    let removed = backend.with(|s| {
        let before = s.products.len();
        s.products.retain(|p| p["id"] != id);
        before != s.products.len()
    });
    if removed {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Product not found"})),
        )
            .into_response()
    }
}

async fn categories() -> Json<Value> {
    Json(json!(["Corrugated", {"name": "Rigid"}]))
}

async fn list_users(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    if expired(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let users = backend.with(|s| {
        s.user_lists += 1;
        s.users.clone()
    });
    Json(Value::Array(users)).into_response()
}

async fn update_user(
    State(backend): State<Backend>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let updated = backend.with(|s| {
        s.user_updates.push(body.clone());
        let Some(user) = s.users.iter_mut().find(|u| u["id"] == id) else {
            return false;
        };
        for key in ["name", "email", "role", "status"] {
            if let Some(value) = body.get(key) {
                user[key] = value.clone();
            }
        }
        true
    });
    if updated {
        Json(json!({"message": "updated"})).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"message": "User not found"}))).into_response()
    }
}

async fn list_bulletins(State(backend): State<Backend>) -> Response {
    let listing = backend.with(|s| {
        s.bulletin_lists += 1;
        (!s.bulletins_down).then(|| s.bulletins.clone())
    });
    match listing {
        Some(bulletins) => Json(json!({ "data": bulletins })).into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

async fn create_bulletin(State(backend): State<Backend>, Json(mut body): Json<Value>) -> Response {
    backend.with(|s| {
        let id = s.next_id;
        s.next_id += 1;
        body["id"] = json!(id);
        s.bulletins.push(body);
    });
    (StatusCode::CREATED, Json(json!({"message": "created"}))).into_response()
}

async fn update_bulletin(
    State(backend): State<Backend>,
    Path(id): Path<u64>,
    Json(mut body): Json<Value>,
) -> Response {
    let updated = backend.with(|s| {
        let Some(bulletin) = s.bulletins.iter_mut().find(|b| b["id"] == id) else {
            return false;
        };
        body["id"] = json!(id);
        *bulletin = body;
        true
    });
    if updated {
        Json(json!({"message": "updated"})).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"message": "Bulletin not found"}))).into_response()
    }
}

async fn delete_bulletin(State(backend): State<Backend>, Path(id): Path<u64>) -> Response {
    backend.with(|s| s.bulletins.retain(|b| b["id"] != id));
    StatusCode::NO_CONTENT.into_response()
}

async fn contact(Json(body): Json<Value>) -> Response {
    if body["email"].as_str().is_some_and(|e| e.contains('@')) {
        Json(json!({"message": "Thanks"})).into_response()
    } else {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"error": "The email must be a valid email address."})),
        )
            .into_response()
    }
}

pub fn router(backend: Backend) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
        .route("/products", get(list_products).post(create_product))
        .route("/products/categories", get(categories))
        .route("/products/:id", put(update_product).delete(delete_product))
        .route("/admin/users", get(list_users))
        .route("/admin/users/:id", put(update_user))
        .route("/bulletins", get(list_bulletins).post(create_bulletin))
        .route(
            "/bulletins/:id",
            put(update_bulletin).delete(delete_bulletin),
        )
        .route("/contact", post(contact))
        .with_state(backend)
}

pub async fn spawn(backend: Backend) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake backend");
    let addr = listener.local_addr().expect("local addr");
    let app = router(backend);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake backend");
    });
    format!("http://{addr}")
}

pub struct Harness {
    pub backend: Backend,
    pub storage: Arc<MemoryStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub api: ApiClient,
    pub sessions: SessionStore,
}

impl Harness {
    pub async fn start(backend: Backend) -> Self {
        let baseUrl = spawn(backend.clone()).await;
        Self::against(backend, &baseUrl)
    }

    pub fn against(backend: Backend, baseUrl: &str) -> Self {
        let storage = Arc::new(MemoryStore::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let shared: Arc<dyn KeyValueStore> = storage.clone();
        let api = ApiClient::new(
            ClientConfig::new(baseUrl),
            SessionContext::init(shared),
            navigator.clone(),
        );
        let sessions = SessionStore::new(api.clone());
        Self {
            backend,
            storage,
            navigator,
            api,
            sessions,
        }
    }
}
