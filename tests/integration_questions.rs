mod common;

use axum::http::StatusCode;
use common::{
    generate_unique_email, generate_unique_school_name, generate_unique_tenant_code,
    get_auth_token, send_json, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;

/// Onboard a school with one teacher and one student; returns their
/// tokens.
async fn onboard_school_with_staff(pool: &PgPool) -> (String, String) {
    let name = generate_unique_school_name();
    let code = generate_unique_tenant_code();
    let teacher_email = generate_unique_email();
    let student_email = generate_unique_email();

    let app = setup_test_app(pool.clone()).await;
    let (status, _) = send_json(
        app,
        "POST",
        "/api/accounts/school/onboard",
        None,
        Some(json!({
            "name": name,
            "code": code,
            "admin": { "email": generate_unique_email(), "password": "pw123" },
            "teachers": [ { "email": teacher_email, "password": "pw123" } ],
            "students": [ { "email": student_email, "password": "pw123" } ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let app = setup_test_app(pool.clone()).await;
    let teacher_token = get_auth_token(app, "teacher", &teacher_email, "pw123").await;
    let app = setup_test_app(pool.clone()).await;
    let student_token = get_auth_token(app, "student", &student_email, "pw123").await;

    (teacher_token, student_token)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_question_crud(pool: PgPool) {
    let (teacher_token, _) = onboard_school_with_staff(&pool).await;

    // Create.
    let app = setup_test_app(pool.clone()).await;
    let (status, body) = send_json(
        app,
        "POST",
        "/api/questions/create",
        Some(&teacher_token),
        Some(json!({
            "prompt": "What is 2 + 2?",
            "options": ["3", "4"],
            "answer": "4",
            "subject": "math"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["prompt"], "What is 2 + 2?");
    let question_id = body["id"].as_str().unwrap().to_string();

    // List.
    let app = setup_test_app(pool.clone()).await;
    let (status, body) = send_json(app, "GET", "/api/questions", Some(&teacher_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Fetch one.
    let app = setup_test_app(pool.clone()).await;
    let (status, body) = send_json(
        app,
        "GET",
        &format!("/api/questions/{}", question_id),
        Some(&teacher_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["answer"], "4");

    // Partial update keeps untouched fields.
    let app = setup_test_app(pool.clone()).await;
    let (status, body) = send_json(
        app,
        "PUT",
        &format!("/api/questions/update/{}", question_id),
        Some(&teacher_token),
        Some(json!({ "prompt": "What is 3 + 1?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["prompt"], "What is 3 + 1?");
    assert_eq!(body["data"]["answer"], "4");

    // Delete, then the fetch misses.
    let app = setup_test_app(pool.clone()).await;
    let (status, _) = send_json(
        app,
        "DELETE",
        &format!("/api/questions/delete/{}", question_id),
        Some(&teacher_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let app = setup_test_app(pool).await;
    let (status, _) = send_json(
        app,
        "GET",
        &format!("/api/questions/{}", question_id),
        Some(&teacher_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_question_bank_requires_teacher_role(pool: PgPool) {
    let (_, student_token) = onboard_school_with_staff(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let (status, _) = send_json(app, "GET", "/api/questions", Some(&student_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let app = setup_test_app(pool).await;
    let (status, _) = send_json(app, "GET", "/api/questions", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_question_banks_are_tenant_isolated(pool: PgPool) {
    let (teacher_a, _) = onboard_school_with_staff(&pool).await;
    let (teacher_b, _) = onboard_school_with_staff(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let (status, _) = send_json(
        app,
        "POST",
        "/api/questions/create",
        Some(&teacher_a),
        Some(json!({
            "prompt": "Only visible to school A",
            "options": ["yes", "no"],
            "answer": "yes"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // School A sees its question; school B sees an empty bank.
    let app = setup_test_app(pool.clone()).await;
    let (status, body) = send_json(app, "GET", "/api/questions", Some(&teacher_a), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let app = setup_test_app(pool).await;
    let (status, body) = send_json(app, "GET", "/api/questions", Some(&teacher_b), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}
