use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateTenantDto, Tenant};
use super::service::TenantService;

/// Register a new school tenant and provision its data scope
#[utoipa::path(
    post,
    path = "/api/tenants/create",
    request_body = CreateTenantDto,
    responses(
        (status = 201, description = "Tenant registered and provisioned", body = Tenant),
        (status = 409, description = "School name or code already registered"),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Tenants"
)]
#[instrument(skip(state, dto))]
pub async fn create_tenant(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateTenantDto>,
) -> Result<(StatusCode, Json<Tenant>), AppError> {
    let tenant = TenantService::register(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(tenant)))
}

/// Fetch the caller's own tenant
///
/// The tenant is taken from the verified token claims, never from request
/// input.
#[utoipa::path(
    get,
    path = "/api/tenants/me",
    responses(
        (status = 200, description = "Caller's tenant", body = Tenant),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Tenants"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_my_tenant(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Tenant>, AppError> {
    let tenant = TenantService::resolve(&state.db, &auth_user.0.tenant_code).await?;
    Ok(Json(tenant))
}
