//! Shared fixtures for integration tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use json_api_router::http::{raise, Envelope};
use json_api_router::routing::{HandlerRegistry, HandlerRequest, HandlerResult};
use serde_json::{json, Value};
use tower::ServiceExt;

/// The sample configuration used across tests, as JSON text.
pub const SAMPLE_JSON: &str = r#"{
    "domain": {"scheme": "http", "host": "api-json.test"},
    "routes": [
        {"method": "GET", "route": "/", "controller": "Controller::response"},
        {"method": "GET", "route": "/{name}", "controller": "Controller::response_args"},
        {"method": "GET", "route": "/users/{id:number}", "controller": "Users::show"},
        {"method": "GET", "route": "/users/{slug:slug}", "controller": "Users::by_slug"},
        {"method": "POST", "route": "/users", "controller": "Users::create"},
        {"method": "DELETE", "route": "/users/{id:number}", "controller": "Users::forbidden"},
        {"method": "GET", "route": "/teapot", "controller": "Teapot::brew"}
    ]
}"#;

/// The sample configuration as structured data.
#[allow(dead_code)]
pub fn sample_value() -> Value {
    serde_json::from_str(SAMPLE_JSON).unwrap()
}

async fn response(_request: HandlerRequest) -> HandlerResult {
    Ok(Envelope::ok(json!("Hello, world!")))
}

async fn response_args(request: HandlerRequest) -> HandlerResult {
    let name = request.param("name").unwrap_or_default().to_string();
    Ok(Envelope::ok(json!({ "name": name })))
}

async fn show(request: HandlerRequest) -> HandlerResult {
    let id: u64 = request
        .param("id")
        .and_then(|id| id.parse().ok())
        .ok_or(json_api_router::HttpError::BadRequest)?;
    if id == 0 {
        return raise(404);
    }
    Ok(Envelope::ok(json!({ "id": id })))
}

async fn by_slug(request: HandlerRequest) -> HandlerResult {
    Ok(Envelope::ok(json!({ "slug": request.param("slug") })))
}

async fn create(request: HandlerRequest) -> HandlerResult {
    let user: Value = request.json()?;
    Ok(Envelope::new(201, user))
}

async fn forbidden(_request: HandlerRequest) -> HandlerResult {
    raise(403)
}

async fn brew(_request: HandlerRequest) -> HandlerResult {
    raise(418)
}

/// Registry with every controller named in [`SAMPLE_JSON`].
pub fn registry() -> HandlerRegistry {
    HandlerRegistry::new()
        .with("Controller::response", response)
        .with("Controller::response_args", response_args)
        .with("Users::show", show)
        .with("Users::by_slug", by_slug)
        .with("Users::create", create)
        .with("Users::forbidden", forbidden)
        .with("Teapot::brew", brew)
}

/// Send one request through `router` and decode the envelope.
#[allow(dead_code)]
pub async fn call(router: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}
