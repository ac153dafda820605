//! Role-based authorization middleware.
//!
//! Endpoints declare the exact set of roles they accept; a caller's role
//! must be a member of that set. There is no implicit hierarchy: an
//! endpoint that should admit both admins and teachers lists both.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AuthUser;
use crate::modules::accounts::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Middleware that authenticates the request and checks the caller's role
/// against the endpoint's allowed set.
///
/// # Usage with axum::middleware::from_fn_with_state
///
/// ```rust,ignore
/// let guarded = Router::new()
///     .route("/questions", get(handler))
///     .route_layer(middleware::from_fn_with_state(
///         state.clone(),
///         |state, req, next| require_roles(state, req, next, vec![Role::Teacher]),
///     ));
/// ```
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: Vec<Role>,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    let role = auth_user.role()?;

    if !allowed_roles.contains(&role) {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Access denied. Allowed roles: {:?}, but caller has role: {:?}",
            allowed_roles,
            role
        )));
    }

    // Attach the verified claims for downstream handlers (tenant routing,
    // audit).
    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(auth_user);

    Ok(next.run(req).await)
}

/// Guard for admin-only routes.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![Role::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Guard for teacher-only routes.
pub async fn require_teacher(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![Role::Teacher]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_set_membership() {
        let allowed = vec![Role::Teacher];
        assert!(allowed.contains(&Role::Teacher));
        // No hierarchy: an admin does not pass a teacher-only set.
        assert!(!allowed.contains(&Role::Admin));
        assert!(!allowed.contains(&Role::Student));
    }

    #[test]
    fn test_multi_role_set() {
        let allowed = vec![Role::Admin, Role::Teacher];
        assert!(allowed.contains(&Role::Admin));
        assert!(allowed.contains(&Role::Teacher));
        assert!(!allowed.contains(&Role::Student));
    }
}
