use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::tenants::model::TenantScope;
use crate::modules::tenants::service::TenantService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateQuestionDto, Question, UpdateQuestionDto};
use super::service::QuestionService;

/// The data scope for the caller's tenant. The routing code comes from the
/// verified claims; path or body input never selects a tenant.
async fn caller_scope(state: &AppState, auth_user: &AuthUser) -> Result<TenantScope, AppError> {
    let tenant = TenantService::resolve(&state.db, &auth_user.0.tenant_code).await?;
    Ok(tenant.scope())
}

/// List the tenant's questions
#[utoipa::path(
    get,
    path = "/api/questions",
    responses(
        (status = 200, description = "Questions in the caller's tenant", body = [Question]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not a teacher"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state, auth_user))]
pub async fn fetch_questions(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Question>>, AppError> {
    let scope = caller_scope(&state, &auth_user).await?;
    let questions = QuestionService::fetch_questions(&state.db, &scope).await?;
    Ok(Json(questions))
}

/// Create a question in the tenant's question bank
#[utoipa::path(
    post,
    path = "/api/questions/create",
    request_body = CreateQuestionDto,
    responses(
        (status = 201, description = "Question created", body = Question),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not a teacher"),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_question(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateQuestionDto>,
) -> Result<(StatusCode, Json<Question>), AppError> {
    let scope = caller_scope(&state, &auth_user).await?;
    let question = QuestionService::create_question(&state.db, &scope, dto).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

/// Fetch one question by id
#[utoipa::path(
    get,
    path = "/api/questions/{question_id}",
    params(("question_id" = Uuid, Path, description = "Question id")),
    responses(
        (status = 200, description = "The question", body = Question),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not a teacher"),
        (status = 404, description = "Question not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state, auth_user))]
pub async fn fetch_question(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(question_id): Path<Uuid>,
) -> Result<Json<Question>, AppError> {
    let scope = caller_scope(&state, &auth_user).await?;
    let question = QuestionService::fetch_question(&state.db, &scope, question_id).await?;
    Ok(Json(question))
}

/// Update a question
#[utoipa::path(
    put,
    path = "/api/questions/update/{question_id}",
    params(("question_id" = Uuid, Path, description = "Question id")),
    request_body = UpdateQuestionDto,
    responses(
        (status = 200, description = "Updated question", body = Question),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not a teacher"),
        (status = 404, description = "Question not found"),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_question(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(question_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateQuestionDto>,
) -> Result<Json<Question>, AppError> {
    let scope = caller_scope(&state, &auth_user).await?;
    let question = QuestionService::update_question(&state.db, &scope, question_id, dto).await?;
    Ok(Json(question))
}

/// Delete a question
#[utoipa::path(
    delete,
    path = "/api/questions/delete/{question_id}",
    params(("question_id" = Uuid, Path, description = "Question id")),
    responses(
        (status = 204, description = "Question deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not a teacher"),
        (status = 404, description = "Question not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_question(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(question_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let scope = caller_scope(&state, &auth_user).await?;
    QuestionService::delete_question(&state.db, &scope, question_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
