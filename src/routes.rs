// routes.rs
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, AppState};

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/polls/", get(handlers::index))
        .route("/polls/{question_id}/", get(handlers::detail))
        .route("/polls/{question_id}/results/", get(handlers::results))
        .route("/polls/{question_id}/vote/", post(handlers::vote))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn index_url() -> String {
    "/polls/".to_string()
}

pub fn detail_url(question_id: i64) -> String {
    format!("/polls/{question_id}/")
}

pub fn results_url(question_id: i64) -> String {
    format!("/polls/{question_id}/results/")
}

pub fn vote_url(question_id: i64) -> String {
    format!("/polls/{question_id}/vote/")
}
