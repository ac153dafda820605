use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::role::require_admin;
use crate::state::AppState;

use super::controller::{create_tenant, get_my_tenant};

pub fn init_tenants_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/create", post(create_tenant))
        .merge(
            Router::new()
                .route("/me", get(get_my_tenant))
                .route_layer(middleware::from_fn_with_state(state, require_admin)),
        )
}
