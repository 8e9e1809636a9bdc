use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PressError {
    #[error("{0}")]
    MiniJinja(#[from] minijinja::Error),

    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    NotFound(String),
}

impl IntoResponse for PressError {
    fn into_response(self) -> axum::response::Response {
        match self {
            PressError::NotFound(e) => (StatusCode::NOT_FOUND, e).into_response(),
            e => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
        }
    }
}
