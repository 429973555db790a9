#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use coursebook::router::init_router;
use coursebook::state::AppState;
use coursebook_config::{CorsConfig, JwtConfig};
use coursebook_db::Gateway;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";
pub const TEST_PASSWORD: &str = "hunter22";

pub fn jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET, 3600)
}

pub fn test_state() -> AppState {
    AppState::new(
        Gateway::in_memory(),
        jwt_config(),
        CorsConfig::from_list("http://localhost:5173"),
    )
}

pub fn test_app() -> Router {
    init_router(test_state())
}

/// Sends one request through a clone of `app` and returns status and JSON body
/// (`Value::Null` for an empty body).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn register(app: &Router, username: &str, role: Option<&str>) -> (StatusCode, Value) {
    let mut body = json!({
        "username": username,
        "email": format!("{}@example.com", username),
        "password": TEST_PASSWORD,
    });
    if let Some(role) = role {
        body["role"] = json!(role);
    }
    send(app, "POST", "/api/users/register", None, Some(body)).await
}

pub async fn login(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await
}

/// Registers `username` with `role` and returns a session token.
pub async fn token_for(app: &Router, username: &str, role: &str) -> String {
    let (status, _) = register(app, username, Some(role)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = login(app, username, TEST_PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

pub fn course_body(subject: &str, number: i64, credits: i64) -> Value {
    json!({
        "name": format!("{} {}", subject, number),
        "subject": subject,
        "number": number,
        "credits": credits,
    })
}

/// Creates a course as `teacher_token` and returns its id.
pub async fn create_course(app: &Router, teacher_token: &str, subject: &str, number: i64) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/courses",
        Some(teacher_token),
        Some(course_body(subject, number, 3)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_str().unwrap().to_string()
}

pub async fn list_courses(app: &Router) -> Vec<Value> {
    let (status, body) = send(app, "GET", "/api/courses", None, None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().unwrap().clone()
}
