use std::str::FromStr;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::modules::accounts::model::{Claims, Role};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that verifies the bearer token and exposes the caller's
/// claims: identity id, role, and tenant code.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The authenticated identity's id.
    pub fn account_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid account id in token")))
    }

    /// The caller's role, parsed from the signed claim.
    pub fn role(&self) -> Result<Role, AppError> {
        Role::from_str(&self.0.role)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid role in token")))
    }

    /// The routing key of the caller's tenant data scope.
    pub fn tenant_code(&self) -> &str {
        &self.0.tenant_code
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::unauthorized(anyhow::anyhow!("Missing authorization header"))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized(anyhow::anyhow!("Invalid authorization header format"))
        })?;

        // Malformed, tampered, and expired tokens all collapse to 401; the
        // distinction stays in logs only.
        let claims =
            verify_token(token, &state.jwt_config).map_err(|e| AppError::unauthorized(e))?;

        Ok(AuthUser(claims))
    }
}
