use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;
use utoipa::ToSchema;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    CreateAccountDto, CreateAccountsBulkDto, CreatedAccountResponse, CreatedAccountsResponse,
    LoginRequest, LoginResponse, OnboardSchoolDto, OnboardingSummary, Role,
};
use super::service::AccountService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Create a school admin account
#[utoipa::path(
    post,
    path = "/api/accounts/admin/create",
    request_body = CreateAccountDto,
    responses(
        (status = 201, description = "Admin account created", body = CreatedAccountResponse),
        (status = 404, description = "School not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Accounts"
)]
#[instrument(skip(state, dto))]
pub async fn create_admin(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAccountDto>,
) -> Result<(StatusCode, Json<CreatedAccountResponse>), AppError> {
    let id = AccountService::create_account(&state.db, Role::Admin, dto).await?;
    Ok((StatusCode::CREATED, Json(CreatedAccountResponse { id })))
}

/// Create a teacher account
#[utoipa::path(
    post,
    path = "/api/accounts/teacher/create",
    request_body = CreateAccountDto,
    responses(
        (status = 201, description = "Teacher account created", body = CreatedAccountResponse),
        (status = 404, description = "School not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Accounts"
)]
#[instrument(skip(state, dto))]
pub async fn create_teacher(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAccountDto>,
) -> Result<(StatusCode, Json<CreatedAccountResponse>), AppError> {
    let id = AccountService::create_account(&state.db, Role::Teacher, dto).await?;
    Ok((StatusCode::CREATED, Json(CreatedAccountResponse { id })))
}

/// Create a student account
#[utoipa::path(
    post,
    path = "/api/accounts/student/create",
    request_body = CreateAccountDto,
    responses(
        (status = 201, description = "Student account created", body = CreatedAccountResponse),
        (status = 404, description = "School not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Accounts"
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAccountDto>,
) -> Result<(StatusCode, Json<CreatedAccountResponse>), AppError> {
    let id = AccountService::create_account(&state.db, Role::Student, dto).await?;
    Ok((StatusCode::CREATED, Json(CreatedAccountResponse { id })))
}

/// Create a list of teacher accounts in one batch
#[utoipa::path(
    post,
    path = "/api/accounts/teacher/create-bulk",
    request_body = CreateAccountsBulkDto,
    responses(
        (status = 201, description = "All teacher accounts created", body = CreatedAccountsResponse),
        (status = 404, description = "School not found", body = ErrorResponse),
        (status = 409, description = "Email already registered; batch rolled back", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Accounts"
)]
#[instrument(skip(state, dto))]
pub async fn create_teachers_bulk(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAccountsBulkDto>,
) -> Result<(StatusCode, Json<CreatedAccountsResponse>), AppError> {
    let ids = AccountService::create_accounts_bulk(&state.db, Role::Teacher, dto).await?;
    Ok((StatusCode::CREATED, Json(CreatedAccountsResponse { ids })))
}

/// Create a list of student accounts in one batch
#[utoipa::path(
    post,
    path = "/api/accounts/student/create-bulk",
    request_body = CreateAccountsBulkDto,
    responses(
        (status = 201, description = "All student accounts created", body = CreatedAccountsResponse),
        (status = 404, description = "School not found", body = ErrorResponse),
        (status = 409, description = "Email already registered; batch rolled back", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Accounts"
)]
#[instrument(skip(state, dto))]
pub async fn create_students_bulk(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAccountsBulkDto>,
) -> Result<(StatusCode, Json<CreatedAccountsResponse>), AppError> {
    let ids = AccountService::create_accounts_bulk(&state.db, Role::Student, dto).await?;
    Ok((StatusCode::CREATED, Json(CreatedAccountsResponse { ids })))
}

/// Log in as a school admin
#[utoipa::path(
    post,
    path = "/api/accounts/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Accounts"
)]
#[instrument(skip(state, dto))]
pub async fn login_admin(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AccountService::login(&state.db, Role::Admin, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Log in as a teacher
#[utoipa::path(
    post,
    path = "/api/accounts/teacher/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Accounts"
)]
#[instrument(skip(state, dto))]
pub async fn login_teacher(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AccountService::login(&state.db, Role::Teacher, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Log in as a student
#[utoipa::path(
    post,
    path = "/api/accounts/student/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Accounts"
)]
#[instrument(skip(state, dto))]
pub async fn login_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AccountService::login(&state.db, Role::Student, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Onboard a whole school: tenant, admin, and rosters in one call
#[utoipa::path(
    post,
    path = "/api/accounts/school/onboard",
    request_body = OnboardSchoolDto,
    responses(
        (status = 201, description = "School onboarded", body = OnboardingSummary),
        (status = 409, description = "School name or code already registered", body = ErrorResponse),
        (status = 422, description = "Validation error; nothing persisted", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Accounts"
)]
#[instrument(skip(state, dto))]
pub async fn onboard_school(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<OnboardSchoolDto>,
) -> Result<(StatusCode, Json<OnboardingSummary>), AppError> {
    let summary = AccountService::onboard_school(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}
