use axum::{Json, http::StatusCode, response::IntoResponse};
use mongodb::error::Error as MongoError;
use serde::Serialize;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum AlbumError {
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("You must set your 'MONGODB_URI' environment variable")]
    MissingMongoUri,

    #[error("{0}")]
    Database(#[from] MongoError),

    /// Failure reported by a non-MongoDB `AlbumStore` implementation.
    #[error("{0}")]
    Backend(Box<dyn std::error::Error + Send + Sync>),

    #[error("album not found")]
    NotFound,

    #[error("invalid album payload: {0}")]
    InvalidBody(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for AlbumError {
    fn from(e: figment::Error) -> Self {
        AlbumError::Config(Box::new(e))
    }
}

impl IntoResponse for AlbumError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            AlbumError::NotFound => StatusCode::NOT_FOUND,
            AlbumError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AlbumError::Database(_)
            | AlbumError::Backend(_)
            | AlbumError::Config(_)
            | AlbumError::MissingMongoUri
            | AlbumError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ApiErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Error body shared by every failing route: `{"error": "<message>"}`.
#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}
