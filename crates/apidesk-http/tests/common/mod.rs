use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Form, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

pub const PETSTORE: &str = include_str!("../fixtures/petstore-2.0.json");

/// Form submissions received on the language endpoint.
pub type LanguagePosts = Arc<Mutex<Vec<Vec<(String, String)>>>>;

fn header(headers: &HeaderMap, name: &str) -> Value {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map_or(Value::Null, |v| json!(v))
}

async fn get_pet(Path(id): Path<String>, headers: HeaderMap) -> Json<Value> {
    Json(json!({
        "id": id,
        "name": "Rex",
        "trace": header(&headers, "x-trace-id"),
    }))
}

async fn delete_pet(Path(_id): Path<String>) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "no such pet")
}

async fn echo(headers: HeaderMap, body: String) -> Json<Value> {
    Json(json!({
        "contentType": header(&headers, "content-type"),
        "cacheControl": header(&headers, "cache-control"),
        "body": body,
    }))
}

async fn list_pets(headers: HeaderMap, body: String) -> Json<Value> {
    Json(json!([{
        "id": 1,
        "name": "Rex",
        "bodyLength": body.len(),
        "cacheControl": header(&headers, "cache-control"),
    }]))
}

async fn health() -> &'static str {
    "ok"
}

async fn api_docs() -> impl IntoResponse {
    ([("content-type", "application/json")], PETSTORE)
}

async fn language(
    State(posts): State<LanguagePosts>,
    Form(fields): Form<Vec<(String, String)>>,
) -> StatusCode {
    posts.lock().unwrap().push(fields);
    StatusCode::OK
}

/// A small petstore backend serving the fixture document.
pub fn petstore_app(posts: LanguagePosts) -> Router {
    Router::new()
        .route("/api/pets", get(list_pets).post(echo))
        .route("/api/pets/{id}", get(get_pet).delete(delete_pet))
        .route("/api/pets/{id}/photo", post(echo))
        .route("/api/owners", post(echo))
        .route("/api/health", get(health))
        .route("/v2/api-docs", get(api_docs))
        .route("/static/swagger.json", get(api_docs))
        .route("/i18n/language", post(language))
        .with_state(posts)
}

/// Serve `app` on an ephemeral port from a background runtime.
pub fn spawn(app: Router) -> String {
    let (tx, rx) = std::sync::mpsc::channel::<SocketAddr>();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    format!("http://{}", rx.recv().unwrap())
}

pub fn spawn_petstore() -> (String, LanguagePosts) {
    let posts = LanguagePosts::default();
    let url = spawn(petstore_app(posts.clone()));
    (url, posts)
}
