use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

use super::controller::{
    create_question, delete_question, fetch_question, fetch_questions, update_question,
};

pub fn init_questions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(fetch_questions))
        .route("/create", post(create_question))
        .route("/{question_id}", get(fetch_question))
        .route("/update/{question_id}", put(update_question))
        .route("/delete/{question_id}", delete(delete_question))
}
