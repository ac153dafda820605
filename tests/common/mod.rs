use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use eruditx::config::cors::CorsConfig;
use eruditx::config::jwt::JwtConfig;
use eruditx::router::init_router;
use eruditx::state::AppState;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub async fn setup_test_app(pool: PgPool) -> Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

/// Send a JSON request and return the status plus parsed body (or Null for
/// an empty body).
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = builder
        .body(match body {
            Some(value) => Body::from(serde_json::to_string(&value).unwrap()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

#[allow(dead_code)]
pub async fn get_auth_token(app: Router, role: &str, email: &str, password: &str) -> String {
    let (status, body) = send_json(
        app,
        "POST",
        &format!("/api/accounts/{}/login", role),
        None,
        Some(serde_json::json!({
            "email": email,
            "password": password
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn generate_unique_school_name() -> String {
    format!("Test School {}", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn generate_unique_tenant_code() -> String {
    let mut code = format!("T{}", Uuid::new_v4().simple());
    code.truncate(12);
    code
}
