use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{
    create_admin, create_student, create_students_bulk, create_teacher, create_teachers_bulk,
    login_admin, login_student, login_teacher, onboard_school,
};

pub fn init_accounts_router() -> Router<AppState> {
    Router::new()
        .route("/admin/create", post(create_admin))
        .route("/admin/login", post(login_admin))
        .route("/teacher/create", post(create_teacher))
        .route("/teacher/create-bulk", post(create_teachers_bulk))
        .route("/teacher/login", post(login_teacher))
        .route("/student/create", post(create_student))
        .route("/student/create-bulk", post(create_students_bulk))
        .route("/student/login", post(login_student))
        .route("/school/onboard", post(onboard_school))
}
