mod common;

use axum::http::StatusCode;
use common::{generate_unique_school_name, generate_unique_tenant_code, send_json, setup_test_app};
use eruditx::modules::tenants::model::CreateTenantDto;
use eruditx::modules::tenants::service::TenantService;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_register_tenant(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let name = generate_unique_school_name();
    let code = generate_unique_tenant_code();

    let (status, body) = send_json(
        app,
        "POST",
        "/api/tenants/create",
        None,
        Some(json!({ "name": name, "code": code })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], name);
    assert_eq!(body["code"], code);
    assert_eq!(body["provisioned"], true);

    // The scope schema and its collections must exist.
    let schema = format!("tenant_{}", code.to_lowercase());
    for collection in ["questions", "assignments", "analytics", "classes"] {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM information_schema.tables
                 WHERE table_schema = $1 AND table_name = $2
             )",
        )
        .bind(&schema)
        .bind(collection)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(exists, "collection {} missing in scope {}", collection, schema);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_code_conflict(pool: PgPool) {
    let code = generate_unique_tenant_code();

    let app = setup_test_app(pool.clone()).await;
    let (status, _) = send_json(
        app,
        "POST",
        "/api/tenants/create",
        None,
        Some(json!({ "name": generate_unique_school_name(), "code": code })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let app = setup_test_app(pool).await;
    let (status, _) = send_json(
        app,
        "POST",
        "/api/tenants/create",
        None,
        Some(json!({ "name": generate_unique_school_name(), "code": code })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_name_conflict(pool: PgPool) {
    let name = generate_unique_school_name();

    let app = setup_test_app(pool.clone()).await;
    let (status, _) = send_json(
        app,
        "POST",
        "/api/tenants/create",
        None,
        Some(json!({ "name": name, "code": generate_unique_tenant_code() })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let app = setup_test_app(pool).await;
    let (status, _) = send_json(
        app,
        "POST",
        "/api/tenants/create",
        None,
        Some(json!({ "name": name, "code": generate_unique_tenant_code() })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_invalid_code_rejected(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let (status, _) = send_json(
        app,
        "POST",
        "/api/tenants/create",
        None,
        Some(json!({ "name": generate_unique_school_name(), "code": "bad code;" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_registration_exactly_one_succeeds(pool: PgPool) {
    let name = generate_unique_school_name();
    let code = generate_unique_tenant_code();

    let dto = || CreateTenantDto {
        name: name.clone(),
        code: code.clone(),
    };

    let (a, b) = tokio::join!(
        TenantService::register(&pool, dto()),
        TenantService::register(&pool, dto()),
    );

    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one registration must win");

    let loser = if a.is_ok() { b } else { a };
    assert_eq!(loser.unwrap_err().status, StatusCode::CONFLICT);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tenants WHERE name = $1")
        .bind(&name)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_provisioning_is_idempotent(pool: PgPool) {
    let code = generate_unique_tenant_code();
    let tenant = TenantService::register(
        &pool,
        CreateTenantDto {
            name: generate_unique_school_name(),
            code: code.clone(),
        },
    )
    .await
    .unwrap();
    assert!(tenant.provisioned);

    // Seed a document, then re-provision: the document must survive.
    let schema = format!("tenant_{}", code.to_lowercase());
    sqlx::query(&format!(
        "INSERT INTO \"{}\".\"questions\" (data) VALUES ($1)",
        schema
    ))
    .bind(json!({ "prompt": "What is 2 + 2?" }))
    .execute(&pool)
    .await
    .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    TenantService::provision_scope(&mut conn, &code).await.unwrap();

    let count: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM \"{}\".\"questions\"",
        schema
    ))
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_resolve_unknown_tenant_not_found(pool: PgPool) {
    let result = TenantService::resolve(&pool, "NOPE01").await;
    assert_eq!(result.unwrap_err().status, StatusCode::NOT_FOUND);

    let result = TenantService::resolve_by_name(&pool, "No Such School").await;
    assert_eq!(result.unwrap_err().status, StatusCode::NOT_FOUND);
}
