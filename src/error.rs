use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown map: {0}")]
    UnknownMap(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Map '{eid}' is already initialized")]
    AlreadyInitialized { eid: String },

    #[error("Map '{eid}' is not initialized")]
    NotInitialized { eid: String },

    #[error("Unknown layer entry: {0}")]
    UnknownLayerEntry(String),

    #[error("Map API error: {message}")]
    Api { message: String },
}

impl MapError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MapError::UnknownMap(_) => StatusCode::NOT_FOUND,
            MapError::MissingParameter(_) | MapError::UnknownLayerEntry(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for MapError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
