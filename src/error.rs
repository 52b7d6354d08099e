// src/error.rs
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use validator::ValidationErrors;

const NOT_FOUND_PAGE: &str = include_str!("../templates/404.html");
const SERVER_ERROR_PAGE: &str = "<h1>Server Error (500)</h1>";

#[derive(Error, Debug)]
pub enum PollError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Not found")]
    NotFound,

    #[error("You did not select a choice.")]
    InvalidSelection,

    #[error("Question {0} does not exist")]
    UnknownQuestion(i64),

    #[error("Choice {0} cannot take more votes")]
    VoteLimit(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

impl IntoResponse for PollError {
    fn into_response(self) -> Response {
        match self {
            PollError::NotFound => (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response(),
            PollError::Validation(_) | PollError::InvalidSelection | PollError::UnknownQuestion(_) => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            PollError::VoteLimit(_) | PollError::Database(_) | PollError::Template(_) => {
                tracing::error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(SERVER_ERROR_PAGE)).into_response()
            }
        }
    }
}

pub type PollResult<T> = Result<T, PollError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,
}
