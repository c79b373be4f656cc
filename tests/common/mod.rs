//! Shared helpers for the HTTP flow tests.
//!
//! Every test runs against a full router over a private in-memory database,
//! driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use todos::api::routes::create_router;
use todos::infrastructure::{AppConfig, AppDependencies, InMemorySessionStore, database};

/// A router over a fresh, seeded in-memory database.
pub async fn create_test_app() -> Router {
    let pool = database::connect("sqlite::memory:").await.unwrap();
    database::initialize_schema(&pool).await.unwrap();
    database::seed_reference_data(&pool).await.unwrap();

    create_router(AppDependencies::new(
        AppConfig::default(),
        pool,
        Arc::new(InMemorySessionStore::new(Duration::from_secs(1800))),
    ))
}

pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

pub fn get(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn form_post(path: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// The `Location` header of a redirect response.
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("response carries no Location header")
        .to_str()
        .unwrap()
}

/// The `name=value` pair of the first `Set-Cookie` header, ready to be sent
/// back as a `Cookie` header.
pub fn session_cookie_pair(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response carries no Set-Cookie header")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers an account and logs it in, returning the session cookie pair.
pub async fn register_and_login(router: &Router, name: &str, login: &str, password: &str) -> String {
    let registration = format!(
        "name={name}&login={login}&password={password}&repassword={password}"
    );
    let response = send(router, form_post("/registration", &registration, None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let credentials = format!("login={login}&password={password}");
    let response = send(router, form_post("/login", &credentials, None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/tasks");

    session_cookie_pair(&response)
}

/// Saves a new task through the form endpoint and returns its id.
pub async fn create_task(router: &Router, cookie: &str, name: &str, priority: &str) -> i64 {
    let body = format!("name={name}&description={name}+description&priority={priority}");
    let response = send(router, form_post("/addOrUpdateTask", &body, Some(cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let list = body_json(send(router, get("/tasks", Some(cookie))).await).await;
    list["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|task| task["name"] == name)
        .expect("saved task is missing from the list")["id"]
        .as_i64()
        .unwrap()
}
