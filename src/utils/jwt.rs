use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::accounts::model::{Claims, Role};
use crate::utils::errors::AppError;

/// Why a token failed verification. Every variant surfaces to the caller
/// as 401; the distinction exists for logging and for tests.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,
    #[error("Token signature is invalid")]
    SignatureInvalid,
    #[error("Token has expired")]
    Expired,
}

/// Issue a signed access token binding an identity to its role and tenant.
///
/// The tenant code is embedded in the claims so request-time tenant routing
/// never needs a lookup against the shared registry.
pub fn create_access_token(
    account_id: Uuid,
    role: Role,
    tenant_code: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: account_id.to_string(),
        role: role.as_str().to_string(),
        tenant_code: tenant_code.to_string(),
        iat: now,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verify a token and return its claims.
///
/// Zero leeway: a token whose expiry equals the current second is already
/// expired, so a zero ttl never yields a usable token.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
        _ => TokenError::Malformed,
    })?;

    // jsonwebtoken only rejects exp strictly in the past; an exp equal to
    // the current second must also count as expired.
    if claims.exp <= Utc::now().timestamp() as usize {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}
