// tests/common/mod.rs

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{FromRequest, Multipart, Path, Request, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Map, Value, json};
use tower_http::trace::TraceLayer;

use pte_admin::api::{Backend, HttpBackend};
use pte_admin::config::Config;

/// In-memory stand-in for the practice platform's REST API.
#[derive(Default)]
pub struct Store {
    pub collections: HashMap<String, Vec<Value>>,
    /// Unused pool per resource, returned by `/<resource>/get/unused`.
    pub unused: HashMap<String, Value>,
    /// `METHOD /path [multipart]` for every request received.
    pub requests: Vec<String>,
    /// Ids whose DELETE answers 500.
    pub failing_deletes: HashSet<String>,
    /// Resources whose list answers `success: false`.
    pub rejecting: HashSet<String>,
    /// Uploaded files as (field, file name, size).
    pub uploads: Vec<(String, String, usize)>,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    pub store: Arc<Mutex<Store>>,
}

impl MockBackend {
    pub fn seed(&self, resource: &str, docs: Vec<Value>) {
        self.store
            .lock()
            .unwrap()
            .collections
            .insert(resource.to_string(), docs);
    }

    pub fn set_unused(&self, resource: &str, pool: Value) {
        self.store.lock().unwrap().unused.insert(resource.to_string(), pool);
    }

    pub fn fail_delete(&self, id: &str) {
        self.store.lock().unwrap().failing_deletes.insert(id.to_string());
    }

    pub fn reject(&self, resource: &str) {
        self.store.lock().unwrap().rejecting.insert(resource.to_string());
    }

    pub fn requests(&self) -> Vec<String> {
        self.store.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.store.lock().unwrap().requests.len()
    }

    pub fn docs(&self, resource: &str) -> Vec<Value> {
        self.store
            .lock()
            .unwrap()
            .collections
            .get(resource)
            .cloned()
            .unwrap_or_default()
    }

    pub fn uploads(&self) -> Vec<(String, String, usize)> {
        self.store.lock().unwrap().uploads.clone()
    }

    fn log(&self, line: String) {
        self.store.lock().unwrap().requests.push(line);
    }
}

fn ok(data: Value) -> Response {
    Json(json!({ "success": true, "data": data })).into_response()
}

fn fail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "message": message }))).into_response()
}

async fn list(State(mock): State<MockBackend>, Path(resource): Path<String>) -> Response {
    mock.log(format!("GET /api/{}", resource));
    if mock.store.lock().unwrap().rejecting.contains(&resource) {
        return Json(json!({ "success": false, "message": "not allowed" })).into_response();
    }
    ok(Value::Array(mock.docs(&resource)))
}

async fn special(
    State(mock): State<MockBackend>,
    Path((resource, key)): Path<(String, String)>,
) -> Response {
    mock.log(format!("GET /api/{}/get/{}", resource, key));
    if key == "unused" {
        let pool = mock
            .store
            .lock()
            .unwrap()
            .unused
            .get(&resource)
            .cloned()
            .unwrap_or_else(|| json!({}));
        return ok(pool);
    }
    ok(Value::Array(mock.docs(&resource)))
}

async fn detail(
    State(mock): State<MockBackend>,
    Path((resource, id)): Path<(String, String)>,
) -> Response {
    mock.log(format!("GET /api/{}/{}", resource, id));
    match mock
        .docs(&resource)
        .into_iter()
        .find(|doc| doc["_id"] == json!(id))
    {
        Some(doc) => ok(doc),
        None => fail(StatusCode::NOT_FOUND, "Not found"),
    }
}

/// Text parts holding JSON arrays, objects or booleans are decoded back.
fn decode_text(text: String) -> Value {
    let looks_structured = text.starts_with('[') || text.starts_with('{') || text == "true" || text == "false";
    if looks_structured {
        serde_json::from_str(&text).unwrap_or(Value::String(text))
    } else {
        Value::String(text)
    }
}

async fn read_body(mock: &MockBackend, request: Request) -> (Map<String, Value>, bool) {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, &()).await.unwrap();
        let mut doc = Map::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field.bytes().await.unwrap();
                    mock.store
                        .lock()
                        .unwrap()
                        .uploads
                        .push((name.clone(), file_name.clone(), bytes.len()));
                    doc.insert(name, json!(format!("/uploads/{}", file_name)));
                }
                None => {
                    let text = field.text().await.unwrap();
                    doc.insert(name, decode_text(text));
                }
            }
        }
        (doc, true)
    } else {
        let Json(body) = Json::<Value>::from_request(request, &()).await.unwrap();
        (body.as_object().cloned().unwrap_or_default(), false)
    }
}

fn tag(multipart: bool) -> &'static str {
    if multipart { " multipart" } else { "" }
}

async fn insert(mock: &MockBackend, resource: &str, request: Request, path: String) -> Response {
    let (mut doc, multipart) = read_body(mock, request).await;
    mock.log(format!("POST {}{}", path, tag(multipart)));
    doc.insert("_id".to_string(), json!(uuid::Uuid::new_v4().to_string()));
    let doc = Value::Object(doc);
    mock.store
        .lock()
        .unwrap()
        .collections
        .entry(resource.to_string())
        .or_default()
        .push(doc.clone());
    (StatusCode::CREATED, Json(json!({ "success": true, "data": doc }))).into_response()
}

async fn create(State(mock): State<MockBackend>, Path(resource): Path<String>, request: Request) -> Response {
    let path = format!("/api/{}", resource);
    insert(&mock, &resource, request, path).await
}

async fn create_add(
    State(mock): State<MockBackend>,
    Path((resource, action)): Path<(String, String)>,
    request: Request,
) -> Response {
    if action != "add" {
        return fail(StatusCode::METHOD_NOT_ALLOWED, "Use /add");
    }
    let path = format!("/api/{}/add", resource);
    insert(&mock, &resource, request, path).await
}

async fn update(
    State(mock): State<MockBackend>,
    Path((resource, id)): Path<(String, String)>,
    request: Request,
) -> Response {
    let (changes, multipart) = read_body(&mock, request).await;
    mock.log(format!("PUT /api/{}/{}{}", resource, id, tag(multipart)));
    let mut store = mock.store.lock().unwrap();
    let docs = store.collections.entry(resource).or_default();
    match docs.iter_mut().find(|doc| doc["_id"] == json!(id)) {
        Some(doc) => {
            if let Some(object) = doc.as_object_mut() {
                object.extend(changes);
            }
            ok(doc.clone())
        }
        None => fail(StatusCode::NOT_FOUND, "Not found"),
    }
}

async fn remove(
    State(mock): State<MockBackend>,
    Path((resource, id)): Path<(String, String)>,
) -> Response {
    mock.log(format!("DELETE /api/{}/{}", resource, id));
    let mut store = mock.store.lock().unwrap();
    if store.failing_deletes.contains(&id) {
        return fail(StatusCode::INTERNAL_SERVER_ERROR, "Delete failed");
    }
    let docs = store.collections.entry(resource).or_default();
    let before = docs.len();
    docs.retain(|doc| doc["_id"] != json!(id));
    if docs.len() == before {
        return fail(StatusCode::NOT_FOUND, "Not found");
    }
    ok(Value::Null)
}

/// Spawns the mock API on a random port.
/// Returns the base URL (e.g., "http://127.0.0.1:12345/api") and a handle on its state.
pub async fn spawn_backend() -> (String, MockBackend) {
    let mock = MockBackend::default();

    let app = Router::new()
        .route("/api/{resource}", get(list).post(create))
        .route(
            "/api/{resource}/{id}",
            get(detail).post(create_add).put(update).delete(remove),
        )
        .route("/api/{resource}/get/{key}", get(special))
        .layer(TraceLayer::new_for_http())
        .with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://127.0.0.1:{}/api", port), mock)
}

/// HTTP client for `base_url`, acting as admin `admin-1`.
pub fn client(base_url: &str) -> Arc<dyn Backend> {
    let mut config = Config::for_url(base_url).expect("valid base URL");
    config.user_id = Some("admin-1".to_string());
    Arc::new(HttpBackend::new(&config).expect("client builds"))
}
